//! Task source domain types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A semi-structured task record as returned by the source
///
/// No fixed schema: nested objects and arrays are kept as-is until the
/// flattener turns them into columns.
pub type TaskRecord = serde_json::Map<String, serde_json::Value>;

/// Date window passed to the task source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchWindow {
    /// Inclusive lower bound
    pub start: NaiveDate,
    /// Inclusive upper bound
    pub end: NaiveDate,
}

impl FetchWindow {
    /// Creates a new fetch window
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Lower bound formatted for the API (`YYYY-MM-DD`)
    pub fn start_param(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    /// Upper bound formatted for the API (`YYYY-MM-DD`)
    pub fn end_param(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }
}

impl fmt::Display for FetchWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start_param(), self.end_param())
    }
}
