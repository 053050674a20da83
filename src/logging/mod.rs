//! Logging and observability
//!
//! Structured logging with:
//! - Configurable log levels (`RUST_LOG` takes precedence)
//! - Human-readable console output
//! - Optional JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use ouvidoria_sync::config::LoggingConfig;
//! use ouvidoria_sync::logging::init_logging;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config)?;
//!
//! tracing::info!("Sync started");
//! # Ok::<(), ouvidoria_sync::domain::SyncError>(())
//! ```

pub mod structured;

pub use structured::{init_logging, parse_log_level, LoggingGuard};
