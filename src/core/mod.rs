//! Core business logic.
//!
//! # Modules
//!
//! - [`calendar`] - Fetch window, month reference, business days and holidays
//! - [`transform`] - Flattening, column transforms and projection to report rows
//! - [`sync`] - Paginated fetch, coercion and run coordination
//!
//! # Sync Workflow
//!
//! 1. **Window**: compute the fetch window and month reference from today
//! 2. **Fetch**: read task pages until an empty page or a non-success status
//! 3. **Transform**: flatten, select, reformat, rename, derive, project
//! 4. **Schema check**: compare report columns with the sink table
//! 5. **Coerce**: apply the column-name coercion rules
//! 6. **Replace**: delete the month and insert every row in one transaction
//! 7. **Report**: log the run summary
//!
//! # Example
//!
//! ```rust,no_run
//! use ouvidoria_sync::adapters::clickup::ClickUpClient;
//! use ouvidoria_sync::adapters::database::create_report_sink;
//! use ouvidoria_sync::config::load_config;
//! use ouvidoria_sync::core::sync::SyncCoordinator;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("ouvidoria.toml")?;
//!
//! let source = Arc::new(ClickUpClient::new(&config.source)?);
//! let sink = create_report_sink(&config.sink)?;
//!
//! let coordinator = SyncCoordinator::new(config, source, sink);
//! let summary = coordinator.run(chrono::Local::now().date_naive()).await?;
//!
//! println!("Inserted: {}", summary.rows_inserted);
//! # Ok(())
//! # }
//! ```

pub mod calendar;
pub mod sync;
pub mod transform;
