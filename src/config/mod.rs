//! Configuration management.
//!
//! TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! The configuration file supports:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `OUVIDORIA_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level and dry-run switch
//! - [`SourceConfig`] - Task endpoint and API token
//! - [`SinkConfig`] - Database connection, report table and coercion rules
//! - [`TransformConfig`] - Column mapping, date columns, business-day limit, extra holidays
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [source]
//! base_url = "https://api.clickup.com/api/v2/view/12zuj6-6773/task"
//! token = "${CLICKUP_KEY}"
//!
//! [sink]
//! dsn = "${DB_DSN}"
//! user = "${DB_USER}"
//! password = "${DB_PASSWORD}"
//! table = "DADOS_OUVIDORIA"
//!
//! [transform]
//! business_day_limit = 2
//! extra_holidays = ["2025-01-25"]
//! ```
//!
//! # Validation
//!
//! ```rust,no_run
//! use ouvidoria_sync::config::load_config;
//!
//! match load_config("ouvidoria.toml") {
//!     Ok(_) => println!("Configuration valid"),
//!     Err(e) => eprintln!("Configuration error: {}", e),
//! }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, Coercion, CoercionRule, ColumnMapping, LoggingConfig, SinkConfig,
    SourceConfig, SyncConfig, TransformConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
