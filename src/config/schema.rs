//! Configuration schema types
//!
//! The configuration is built once at startup and handed to the coordinator,
//! the task source and the sink. Nothing below reads the environment on its
//! own.

use crate::config::SecretString;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Main configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Task source (ClickUp view) settings
    pub source: SourceConfig,

    /// Report table settings
    pub sink: SinkConfig,

    /// Column selection, renaming and derivation settings
    #[serde(default)]
    pub transform: TransformConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SyncConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.source.validate()?;
        self.sink.validate()?;
        self.transform.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (fetch, transform and check the schema, but don't load)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// Task source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// View task endpoint, without query string
    #[serde(default = "default_source_url")]
    pub base_url: String,

    /// API token sent verbatim in the `Authorization` header
    /// Stored securely in memory and automatically zeroized on drop
    pub token: SecretString,

    /// Request timeout in seconds; the client default applies when unset
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

impl SourceConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.base_url.is_empty() {
            return Err("source.base_url cannot be empty".to_string());
        }

        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| format!("source.base_url is not a valid URL: {e}"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err("source.base_url must start with http:// or https://".to_string());
        }
        if parsed.query().is_some() {
            return Err("source.base_url must not carry a query string".to_string());
        }

        if self.token.expose_secret().is_empty() {
            return Err("source.token cannot be empty".to_string());
        }

        if self.timeout_seconds == Some(0) {
            return Err("source.timeout_seconds must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Report table configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Connection string (key/value or URL form) without credentials
    pub dsn: String,

    /// Database user
    pub user: String,

    /// Database password
    /// Stored securely in memory and automatically zeroized on drop
    pub password: SecretString,

    /// Report table name
    #[serde(default = "default_table")]
    pub table: String,

    /// Column holding the month reference
    #[serde(default = "default_month_ref_column")]
    pub month_ref_column: String,

    /// Connection timeout in seconds; the driver default applies when unset
    #[serde(default)]
    pub connection_timeout_seconds: Option<u64>,

    /// Column-name pattern → coercion rules, first match wins
    #[serde(default = "default_coercion_rules")]
    pub coercion: Vec<CoercionRule>,
}

impl SinkConfig {
    fn validate(&self) -> Result<(), String> {
        if self.dsn.trim().is_empty() {
            return Err("sink.dsn cannot be empty".to_string());
        }
        if self.user.trim().is_empty() {
            return Err("sink.user cannot be empty".to_string());
        }
        for (field, value) in [
            ("sink.table", &self.table),
            ("sink.month_ref_column", &self.month_ref_column),
        ] {
            if !is_identifier(value) {
                return Err(format!(
                    "{field} '{value}' must be a plain SQL identifier (letters, digits, underscore)"
                ));
            }
        }
        for rule in &self.coercion {
            if rule.pattern.trim().is_empty() {
                return Err("sink.coercion patterns cannot be empty".to_string());
            }
        }
        Ok(())
    }
}

/// Coercion applied to a sink column before load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coercion {
    /// Value loaded as-is (text)
    Passthrough,
    /// Value parsed as a number, invalid values become null
    Numeric,
}

/// Maps a column-name substring to a coercion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoercionRule {
    /// Case-insensitive substring of the column name
    pub pattern: String,

    /// Coercion for matching columns
    pub rule: Coercion,
}

impl CoercionRule {
    /// Creates a new rule
    pub fn new(pattern: impl Into<String>, rule: Coercion) -> Self {
        Self {
            pattern: pattern.into(),
            rule,
        }
    }
}

/// Source → report column mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    /// Flattened source column
    pub source: String,

    /// Report column
    pub target: String,
}

impl ColumnMapping {
    /// Creates a new mapping
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Report columns that come straight from the source
pub const MAPPED_REPORT_COLUMNS: [&str; 6] = [
    "NOME_TAREFA",
    "RESPONSAVEL",
    "STATUS",
    "DATA_CRIACAO",
    "DATA_FECHAMENTO",
    "SLA",
];

/// Transformation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformConfig {
    /// Source columns to keep, in order, with their report names
    #[serde(default = "default_columns")]
    pub columns: Vec<ColumnMapping>,

    /// Source columns holding timestamps to reformat as `DD/MM/YYYY`
    #[serde(default = "default_date_columns")]
    pub date_columns: Vec<String>,

    /// Highest business-day count still flagged `OK`
    #[serde(default = "default_business_day_limit")]
    pub business_day_limit: u32,

    /// Holidays observed on top of the national calendar (`YYYY-MM-DD`)
    #[serde(default)]
    pub extra_holidays: Vec<NaiveDate>,
}

impl TransformConfig {
    fn validate(&self) -> Result<(), String> {
        for required in MAPPED_REPORT_COLUMNS {
            let count = self
                .columns
                .iter()
                .filter(|m| m.target == required)
                .count();
            if count != 1 {
                return Err(format!(
                    "transform.columns must map exactly one source column to {required}, found {count}"
                ));
            }
        }

        if let Some(extra) = self
            .columns
            .iter()
            .find(|m| !MAPPED_REPORT_COLUMNS.contains(&m.target.as_str()))
        {
            return Err(format!(
                "transform.columns target '{}' is not a mapped report column. Must be one of: {}",
                extra.target,
                MAPPED_REPORT_COLUMNS.join(", ")
            ));
        }

        if let Some(empty) = self.columns.iter().find(|m| m.source.trim().is_empty()) {
            return Err(format!(
                "transform.columns source for {} cannot be empty",
                empty.target
            ));
        }

        if let Some(unmapped) = self
            .date_columns
            .iter()
            .find(|date| !self.columns.iter().any(|m| &m.source == *date))
        {
            return Err(format!(
                "transform.date_columns entry '{unmapped}' is not a source column in transform.columns"
            ));
        }
        Ok(())
    }

    /// Source → report name pairs for renaming
    pub fn rename_pairs(&self) -> Vec<(String, String)> {
        self.columns
            .iter()
            .map(|m| (m.source.clone(), m.target.clone()))
            .collect()
    }

    /// Source columns in selection order
    pub fn source_columns(&self) -> Vec<String> {
        self.columns.iter().map(|m| m.source.clone()).collect()
    }
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            date_columns: default_date_columns(),
            business_day_limit: default_business_day_limit(),
            extra_holidays: Vec::new(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable JSON file logging next to console output
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Log rotation (daily, hourly, never)
    #[serde(default = "default_log_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled is true".to_string());
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_log_rotation(),
        }
    }
}

fn is_identifier(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// Default value functions

fn default_log_level() -> String {
    "info".to_string()
}

fn default_source_url() -> String {
    "https://api.clickup.com/api/v2/view/12zuj6-6773/task".to_string()
}

fn default_table() -> String {
    "DADOS_OUVIDORIA".to_string()
}

fn default_month_ref_column() -> String {
    "MES_REF".to_string()
}

/// Default coercion table: date-named columns pass through before
/// number-named ones are parsed
pub fn default_coercion_rules() -> Vec<CoercionRule> {
    vec![
        CoercionRule::new("DATA", Coercion::Passthrough),
        CoercionRule::new("NUM", Coercion::Numeric),
    ]
}

fn default_columns() -> Vec<ColumnMapping> {
    vec![
        ColumnMapping::new("name", "NOME_TAREFA"),
        ColumnMapping::new("assignees_0_username", "RESPONSAVEL"),
        ColumnMapping::new("status_status", "STATUS"),
        ColumnMapping::new("date_created", "DATA_CRIACAO"),
        ColumnMapping::new("date_closed", "DATA_FECHAMENTO"),
        ColumnMapping::new("custom_fields_3_value", "SLA"),
    ]
}

fn default_date_columns() -> Vec<String> {
    vec!["date_created".to_string(), "date_closed".to_string()]
}

fn default_business_day_limit() -> u32 {
    2
}

fn default_log_path() -> String {
    "logs".to_string()
}

fn default_log_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn valid_config() -> SyncConfig {
        SyncConfig {
            application: ApplicationConfig::default(),
            source: SourceConfig {
                base_url: default_source_url(),
                token: secret_string("pk_test".to_string()),
                timeout_seconds: None,
            },
            sink: SinkConfig {
                dsn: "host=localhost dbname=reports".to_string(),
                user: "etl".to_string(),
                password: secret_string("secret".to_string()),
                table: default_table(),
                month_ref_column: default_month_ref_column(),
                connection_timeout_seconds: None,
                coercion: default_coercion_rules(),
            },
            transform: TransformConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = valid_config();
        config.application.log_level = "verbose".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.contains("Invalid log_level"));
    }

    #[test]
    fn test_source_url_must_be_http() {
        let mut config = valid_config();
        config.source.base_url = "ftp://example.com/tasks".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_source_url_rejects_query_string() {
        let mut config = valid_config();
        config.source.base_url = "https://api.clickup.com/task?page=0".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.contains("query string"));
    }

    #[test]
    fn test_empty_token_rejected() {
        let mut config = valid_config();
        config.source.token = secret_string(String::new());
        let err = config.validate().unwrap_err();
        assert!(err.contains("source.token"));
    }

    #[test]
    fn test_table_must_be_identifier() {
        let mut config = valid_config();
        config.sink.table = "DADOS; DROP TABLE x".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.contains("sink.table"));
    }

    #[test]
    fn test_transform_requires_every_mapped_column() {
        let mut config = valid_config();
        config.transform.columns.retain(|m| m.target != "SLA");
        let err = config.validate().unwrap_err();
        assert!(err.contains("SLA"));
    }

    #[test]
    fn test_transform_rejects_derived_target() {
        let mut config = valid_config();
        config
            .transform
            .columns
            .push(ColumnMapping::new("whatever", "FILTRO"));
        let err = config.validate().unwrap_err();
        assert!(err.contains("FILTRO"));
    }

    #[test]
    fn test_date_columns_must_be_mapped_sources() {
        let mut config = valid_config();
        config.transform.columns = config
            .transform
            .columns
            .into_iter()
            .map(|m| {
                if m.target == "DATA_CRIACAO" {
                    ColumnMapping::new("created_at", "DATA_CRIACAO")
                } else {
                    m
                }
            })
            .collect();
        let err = config.validate().unwrap_err();
        assert!(err.contains("date_created"));

        config.transform.date_columns = vec!["created_at".to_string(), "date_closed".to_string()];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_coercion_order() {
        let rules = default_coercion_rules();
        assert_eq!(rules[0].rule, Coercion::Passthrough);
        assert_eq!(rules[1].rule, Coercion::Numeric);
    }

    #[test]
    fn test_invalid_rotation() {
        let mut config = valid_config();
        config.logging.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());
    }
}
