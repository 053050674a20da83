//! Console and rolling-file subscribers built on `tracing-subscriber`

use crate::config::LoggingConfig;
use crate::domain::{Result, SyncError};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const LOG_FILE_NAME: &str = "ouvidoria-sync.log";

const LEVELS: [(&str, Level); 5] = [
    ("trace", Level::TRACE),
    ("debug", Level::DEBUG),
    ("info", Level::INFO),
    ("warn", Level::WARN),
    ("error", Level::ERROR),
];

/// Keeps the file writer alive; buffered lines are flushed when it drops
#[must_use = "dropping the guard stops file logging"]
pub struct LoggingGuard {
    _file_writer: Option<WorkerGuard>,
}

/// Install the global subscriber
///
/// Console output is always on. With `local_enabled`, JSON lines also go to
/// `<local_path>/ouvidoria-sync.log`, rotated per `local_rotation`.
/// `RUST_LOG`, when set, replaces the level filter.
///
/// # Errors
///
/// Returns [`SyncError::Configuration`] for an unknown level, a log
/// directory that cannot be created, or a subscriber already installed.
pub fn init_logging(log_level_str: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let level = parse_log_level(log_level_str)?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ouvidoria_sync={level}")));

    let console = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_filter(filter.clone());

    let (file, file_writer) = if config.local_enabled {
        let (writer, guard) = file_writer(config)?;
        let layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_writer(writer)
            .with_filter(filter);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .try_init()
        .map_err(|e| SyncError::Configuration(format!("Failed to initialize logging: {e}")))?;

    tracing::debug!(
        level = %level,
        file = config.local_enabled,
        path = %config.local_path,
        "Logging ready"
    );

    Ok(LoggingGuard {
        _file_writer: file_writer,
    })
}

fn file_writer(
    config: &LoggingConfig,
) -> Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    std::fs::create_dir_all(&config.local_path).map_err(|e| {
        SyncError::Configuration(format!(
            "Cannot create log directory {}: {e}",
            config.local_path
        ))
    })?;

    let appender = RollingFileAppender::new(
        rotation(&config.local_rotation),
        &config.local_path,
        LOG_FILE_NAME,
    );
    Ok(tracing_appender::non_blocking(appender))
}

/// Unknown values fall back to daily; the config validator rejects them first
fn rotation(value: &str) -> Rotation {
    match value {
        "hourly" => Rotation::HOURLY,
        "never" => Rotation::NEVER,
        _ => Rotation::DAILY,
    }
}

/// Parse a level name, ignoring case
///
/// # Errors
///
/// Returns [`SyncError::Configuration`] for anything but trace, debug, info,
/// warn or error.
pub fn parse_log_level(level_str: &str) -> Result<Level> {
    LEVELS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(level_str.trim()))
        .map(|(_, level)| *level)
        .ok_or_else(|| {
            SyncError::Configuration(format!(
                "Invalid log level '{level_str}'. Must be one of: trace, debug, info, warn, error"
            ))
        })
}
