//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::SyncConfig;
use super::secret::secret_string;
use crate::domain::errors::SyncError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`SyncConfig`]
/// 4. Applies environment variable overrides (`OUVIDORIA_*` prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`SyncError::Configuration`] if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use ouvidoria_sync::config::load_config;
///
/// let config = load_config("ouvidoria.toml")?;
/// println!("Loading into {}", config.sink.table);
/// # Ok::<(), ouvidoria_sync::domain::SyncError>(())
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<SyncConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(SyncError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        SyncError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses configuration from TOML text
///
/// Same steps as [`load_config`] minus the file read.
///
/// # Errors
///
/// Returns [`SyncError::Configuration`] on substitution, parse or
/// validation failures.
pub fn parse_config(contents: &str) -> Result<SyncConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: SyncConfig = toml::from_str(&contents)
        .map_err(|e| SyncError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        SyncError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("placeholder pattern is valid")
    })
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = placeholder_regex();
    let mut missing_vars: Vec<String> = Vec::new();

    let lines: Vec<String> = input
        .lines()
        .map(|line| {
            if line.trim_start().starts_with('#') {
                return line.to_string();
            }
            re.replace_all(line, |cap: &regex::Captures<'_>| {
                let var_name = &cap[1];
                match std::env::var(var_name) {
                    Ok(value) => value,
                    Err(_) => {
                        if !missing_vars.iter().any(|v| v == var_name) {
                            missing_vars.push(var_name.to_string());
                        }
                        String::new()
                    }
                }
            })
            .into_owned()
        })
        .collect();

    if !missing_vars.is_empty() {
        return Err(SyncError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    let mut result = lines.join("\n");
    if input.ends_with('\n') {
        result.push('\n');
    }
    Ok(result)
}

fn parse_override<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        SyncError::Configuration(format!("Invalid value '{value}' for environment variable {name}"))
    })
}

/// Applies environment variable overrides using the `OUVIDORIA_*` prefix
///
/// Variables follow the pattern `OUVIDORIA_<SECTION>_<KEY>`, for example
/// `OUVIDORIA_SINK_TABLE` or `OUVIDORIA_SOURCE_TOKEN`.
fn apply_env_overrides(config: &mut SyncConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("OUVIDORIA_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("OUVIDORIA_APPLICATION_DRY_RUN") {
        config.application.dry_run = parse_override("OUVIDORIA_APPLICATION_DRY_RUN", &val)?;
    }

    // Source overrides
    if let Ok(val) = std::env::var("OUVIDORIA_SOURCE_BASE_URL") {
        config.source.base_url = val;
    }
    if let Ok(val) = std::env::var("OUVIDORIA_SOURCE_TOKEN") {
        config.source.token = secret_string(val);
    }
    if let Ok(val) = std::env::var("OUVIDORIA_SOURCE_TIMEOUT_SECONDS") {
        config.source.timeout_seconds =
            Some(parse_override("OUVIDORIA_SOURCE_TIMEOUT_SECONDS", &val)?);
    }

    // Sink overrides
    if let Ok(val) = std::env::var("OUVIDORIA_SINK_DSN") {
        config.sink.dsn = val;
    }
    if let Ok(val) = std::env::var("OUVIDORIA_SINK_USER") {
        config.sink.user = val;
    }
    if let Ok(val) = std::env::var("OUVIDORIA_SINK_PASSWORD") {
        config.sink.password = secret_string(val);
    }
    if let Ok(val) = std::env::var("OUVIDORIA_SINK_TABLE") {
        config.sink.table = val;
    }
    if let Ok(val) = std::env::var("OUVIDORIA_SINK_CONNECTION_TIMEOUT_SECONDS") {
        config.sink.connection_timeout_seconds = Some(parse_override(
            "OUVIDORIA_SINK_CONNECTION_TIMEOUT_SECONDS",
            &val,
        )?);
    }

    // Transform overrides
    if let Ok(val) = std::env::var("OUVIDORIA_TRANSFORM_BUSINESS_DAY_LIMIT") {
        config.transform.business_day_limit =
            parse_override("OUVIDORIA_TRANSFORM_BUSINESS_DAY_LIMIT", &val)?;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("OUVIDORIA_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_override("OUVIDORIA_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("OUVIDORIA_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}
