//! Domain models and types.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Task source types** ([`TaskRecord`], [`FetchWindow`])
//! - **Report model** ([`ReportRow`], [`Filtro`], [`REPORT_COLUMNS`])
//! - **Identifiers** ([`MonthReference`])
//! - **Error types** ([`SyncError`], [`FetchError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, SyncError>`]:
//!
//! ```rust
//! use ouvidoria_sync::domain::{MonthReference, Result, SyncError};
//! use std::str::FromStr;
//!
//! fn parse(value: &str) -> Result<MonthReference> {
//!     MonthReference::from_str(value).map_err(SyncError::Validation)
//! }
//! ```

pub mod errors;
pub mod ids;
pub mod report;
pub mod result;
pub mod task;

pub use errors::{FetchError, SyncError};
pub use ids::MonthReference;
pub use report::{Filtro, ReportRow, REPORT_COLUMNS};
pub use result::Result;
pub use task::{FetchWindow, TaskRecord};
