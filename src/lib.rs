//! # ouvidoria-sync
//!
//! Batch job that copies the current month of ombudsman tasks from a ClickUp
//! view into a PostgreSQL reporting table.
//!
//! One run:
//! - **Fetches** every task page created inside the reporting window
//! - **Flattens** each task into `key_subkey_index` columns
//! - **Transforms** the selected columns: date formatting, renaming, the
//!   business-day `FILTRO` flag and the `MES_REF` month reference
//! - **Replaces** that month in the report table inside one transaction
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Calendar rules, the transform pipeline and the sync coordinator
//! - [`adapters`] - ClickUp and PostgreSQL integrations
//! - [`domain`] - Report row, task record, month reference and errors
//! - [`config`] - TOML configuration with environment substitution
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ouvidoria_sync::adapters::clickup::ClickUpClient;
//! use ouvidoria_sync::adapters::database::create_report_sink;
//! use ouvidoria_sync::config::load_config;
//! use ouvidoria_sync::core::sync::SyncCoordinator;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("ouvidoria.toml")?;
//!     let source = Arc::new(ClickUpClient::new(&config.source)?);
//!     let sink = create_report_sink(&config.sink)?;
//!
//!     let summary = SyncCoordinator::new(config, source, sink)
//!         .run(chrono::Local::now().date_naive())
//!         .await?;
//!
//!     println!("Loaded {} rows for {}", summary.rows_inserted, summary.month_ref);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Library code returns [`domain::SyncError`]; each variant maps to a process
//! exit code through [`domain::SyncError::exit_code`].

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
