//! Sync coordinator - main orchestrator for a run
//!
//! Coordinates fetch, transform, schema check, coercion and the
//! transactional replace of one month of report rows.

use super::coercion::{coerce_value, coercion_for};
use super::fetch::fetch_all_tasks;
use super::summary::{LoadStatus, SyncSummary};
use crate::adapters::clickup::TaskSource;
use crate::adapters::database::{LoadBatch, LoadColumn, ReportSink, SqlValue};
use crate::config::SyncConfig;
use crate::core::calendar::{add_month_reference, fetch_window};
use crate::core::transform::TransformPipeline;
use crate::domain::report::column_index;
use crate::domain::{MonthReference, ReportRow, Result, SyncError, REPORT_COLUMNS};
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Instant;

/// Sync coordinator
pub struct SyncCoordinator {
    config: SyncConfig,
    source: Arc<dyn TaskSource>,
    sink: Arc<dyn ReportSink>,
    pipeline: TransformPipeline,
    dry_run: bool,
}

impl SyncCoordinator {
    /// Create a new sync coordinator
    ///
    /// Dry-run mode starts from `application.dry_run`.
    pub fn new(config: SyncConfig, source: Arc<dyn TaskSource>, sink: Arc<dyn ReportSink>) -> Self {
        let pipeline = TransformPipeline::new(config.transform.clone());
        let dry_run = config.application.dry_run;
        Self {
            config,
            source,
            sink,
            pipeline,
            dry_run,
        }
    }

    /// Override dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Run one sync as of `today`
    ///
    /// # Errors
    ///
    /// - [`SyncError::Fetch`] on transport errors or unreadable pages
    /// - [`SyncError::SchemaMismatch`] when the report does not fit the table,
    ///   before anything is written
    /// - [`SyncError::Delete`] / [`SyncError::Insert`] when the load fails;
    ///   the transaction is rolled back
    pub async fn run(&self, today: NaiveDate) -> Result<SyncSummary> {
        let start_time = Instant::now();
        let window = fetch_window(today);
        let month_ref = add_month_reference(today);

        tracing::info!(
            today = %today,
            window = %window,
            month_ref = %month_ref,
            dry_run = self.dry_run,
            "Starting sync"
        );

        let fetched = fetch_all_tasks(self.source.as_ref(), &window).await?;
        let tasks_fetched = fetched.records.len();

        let rows = self.pipeline.run(fetched.records, &month_ref)?;
        tracing::info!(rows = rows.len(), "Transformed tasks into report rows");

        let batch = self.build_batch(&rows, &month_ref).await?;

        let mut summary = SyncSummary {
            month_ref: month_ref.clone(),
            window,
            pages_fetched: fetched.pages,
            pagination_stop: fetched.stop,
            tasks_fetched,
            report_rows: rows.len(),
            rows_deleted: 0,
            rows_inserted: 0,
            load_status: LoadStatus::DryRun,
            duration: Default::default(),
        };

        if self.dry_run {
            tracing::info!(
                table = %batch.table,
                month_ref = %month_ref,
                rows = batch.rows.len(),
                "DRY RUN: Would replace month in report table"
            );
        } else if batch.rows.is_empty() {
            tracing::warn!(
                table = %batch.table,
                month_ref = %month_ref,
                "No report rows; existing rows for the month were left untouched"
            );
            summary.load_status = LoadStatus::SkippedEmpty;
        } else {
            let outcome = self.sink.replace_month(&batch).await?;
            summary.rows_deleted = outcome.deleted;
            summary.rows_inserted = outcome.inserted;
            summary.load_status = LoadStatus::Loaded;
        }

        Ok(summary.with_duration(start_time.elapsed()))
    }

    /// Check the sink schema and lay rows out in sink column order
    async fn build_batch(&self, rows: &[ReportRow], month_ref: &MonthReference) -> Result<LoadBatch> {
        let table = &self.config.sink.table;
        let sink_columns = self.sink.table_columns(table).await?;
        tracing::debug!(table = %table, columns = ?sink_columns, "Read sink columns");

        let mismatch = |detail: String| SyncError::SchemaMismatch {
            table: table.clone(),
            report_columns: REPORT_COLUMNS.len(),
            sink_columns: sink_columns.len(),
            detail,
        };

        if sink_columns.is_empty() {
            return Err(mismatch(" (table not found or has no columns)".to_string()));
        }
        if sink_columns.len() != REPORT_COLUMNS.len() {
            return Err(mismatch(String::new()));
        }

        let positions = sink_columns
            .iter()
            .map(|name| {
                column_index(name).ok_or_else(|| {
                    mismatch(format!(" (sink column {name} has no report counterpart)"))
                })
            })
            .collect::<Result<Vec<usize>>>()?;

        let month_ref_column = sink_columns
            .iter()
            .find(|name| name.eq_ignore_ascii_case(&self.config.sink.month_ref_column))
            .cloned()
            .ok_or_else(|| {
                mismatch(format!(
                    " (month reference column {} not found)",
                    self.config.sink.month_ref_column
                ))
            })?;

        let columns: Vec<LoadColumn> = sink_columns
            .iter()
            .map(|name| LoadColumn {
                name: name.clone(),
                coercion: coercion_for(name, &self.config.sink.coercion),
            })
            .collect();

        let values: Vec<Vec<SqlValue>> = rows
            .iter()
            .map(|row| {
                let row_values = row.values();
                positions
                    .iter()
                    .zip(&columns)
                    .map(|(position, column)| coerce_value(row_values[*position], column.coercion))
                    .collect()
            })
            .collect();

        Ok(LoadBatch {
            table: table.clone(),
            columns,
            month_ref_column,
            month_ref: month_ref.clone(),
            rows: values,
        })
    }
}
