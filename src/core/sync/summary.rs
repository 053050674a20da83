//! Sync summary and reporting

use super::fetch::PaginationStop;
use crate::domain::{FetchWindow, MonthReference};
use std::time::Duration;

/// How the load step ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// The month was replaced
    Loaded,
    /// No report rows; the month was left untouched
    SkippedEmpty,
    /// Dry run; nothing was written
    DryRun,
}

/// Summary of a sync run
#[derive(Debug, Clone)]
pub struct SyncSummary {
    /// Month reference of the run
    pub month_ref: MonthReference,

    /// Fetch window
    pub window: FetchWindow,

    /// Pages that returned tasks
    pub pages_fetched: u32,

    /// How pagination ended
    pub pagination_stop: PaginationStop,

    /// Tasks fetched across pages
    pub tasks_fetched: usize,

    /// Report rows produced by the transform
    pub report_rows: usize,

    /// Rows deleted for the month reference
    pub rows_deleted: u64,

    /// Rows inserted
    pub rows_inserted: usize,

    /// Load outcome
    pub load_status: LoadStatus,

    /// Duration of the run
    pub duration: Duration,
}

impl SyncSummary {
    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Whether the sink was written
    pub fn is_loaded(&self) -> bool {
        self.load_status == LoadStatus::Loaded
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            month_ref = %self.month_ref,
            window = %self.window,
            pages = self.pages_fetched,
            tasks = self.tasks_fetched,
            report_rows = self.report_rows,
            deleted = self.rows_deleted,
            inserted = self.rows_inserted,
            load_status = ?self.load_status,
            duration_secs = self.duration.as_secs(),
            "Sync completed"
        );

        if let PaginationStop::Status(status) = self.pagination_stop {
            tracing::warn!(
                status,
                "Pagination ended on a non-success status; the report may be incomplete"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn summary(load_status: LoadStatus) -> SyncSummary {
        SyncSummary {
            month_ref: MonthReference::new(2025, 3).unwrap(),
            window: FetchWindow::new(
                NaiveDate::from_ymd_opt(2025, 2, 28).unwrap(),
                NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            ),
            pages_fetched: 2,
            pagination_stop: PaginationStop::EmptyPage,
            tasks_fetched: 3,
            report_rows: 3,
            rows_deleted: 0,
            rows_inserted: 3,
            load_status,
            duration: Duration::default(),
        }
    }

    #[test]
    fn test_with_duration() {
        let summary = summary(LoadStatus::Loaded).with_duration(Duration::from_secs(12));
        assert_eq!(summary.duration, Duration::from_secs(12));
    }

    #[test]
    fn test_is_loaded() {
        assert!(summary(LoadStatus::Loaded).is_loaded());
        assert!(!summary(LoadStatus::DryRun).is_loaded());
        assert!(!summary(LoadStatus::SkippedEmpty).is_loaded());
    }
}
