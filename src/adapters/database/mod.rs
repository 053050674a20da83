//! Database abstraction layer
//!
//! This module provides the trait-based seam between the sync coordinator and
//! the reporting table, so tests can substitute an in-memory sink.

pub mod factory;
pub mod traits;

pub use factory::create_report_sink;
pub use traits::{LoadBatch, LoadColumn, LoadOutcome, ReportSink, SqlValue};
