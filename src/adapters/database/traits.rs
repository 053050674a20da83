//! Report sink abstraction
//!
//! This module defines the trait the report table adapter implements, and
//! the batch shape handed to it.

use crate::config::Coercion;
use crate::domain::{MonthReference, Result};
use async_trait::async_trait;

/// A coerced value ready to be bound to a statement
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// SQL NULL
    Null,
    /// Text value
    Text(String),
    /// Numeric value
    Number(f64),
}

impl SqlValue {
    /// Text form used in diagnostics
    pub fn display_value(&self) -> Option<String> {
        match self {
            SqlValue::Null => None,
            SqlValue::Text(text) => Some(text.clone()),
            SqlValue::Number(number) => Some(number.to_string()),
        }
    }
}

/// A sink column and the coercion applied to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadColumn {
    /// Column name as reported by the sink catalog
    pub name: String,

    /// Coercion applied to the column's values
    pub coercion: Coercion,
}

/// Everything needed to replace one month of report rows
#[derive(Debug, Clone)]
pub struct LoadBatch {
    /// Target table
    pub table: String,

    /// Columns in sink order
    pub columns: Vec<LoadColumn>,

    /// Sink column holding the month reference
    pub month_ref_column: String,

    /// Month being replaced
    pub month_ref: MonthReference,

    /// Row values, one entry per column
    pub rows: Vec<Vec<SqlValue>>,
}

/// Result of a month replacement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadOutcome {
    /// Rows removed by the delete step
    pub deleted: u64,

    /// Rows inserted
    pub inserted: usize,
}

/// Report table client
///
/// Implementations must apply [`ReportSink::replace_month`] atomically: the
/// delete and every insert commit together or not at all.
#[async_trait]
pub trait ReportSink: Send + Sync {
    /// Test the database connection
    ///
    /// # Errors
    ///
    /// Returns an error if the connection test fails.
    async fn test_connection(&self) -> Result<()>;

    /// Column names of `table`, in catalog order
    ///
    /// An unknown table yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog query fails.
    async fn table_columns(&self, table: &str) -> Result<Vec<String>>;

    /// Delete the batch's month and insert its rows in one transaction
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::SyncError::Delete`] or
    /// [`crate::domain::SyncError::Insert`] after rolling back.
    async fn replace_month(&self, batch: &LoadBatch) -> Result<LoadOutcome>;

    /// Human-readable sink description for logs (no credentials)
    fn describe(&self) -> String;
}
