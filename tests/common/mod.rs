//! Shared fakes for sync integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use ouvidoria_sync::adapters::clickup::TaskSource;
use ouvidoria_sync::adapters::database::{LoadBatch, LoadOutcome, ReportSink};
use ouvidoria_sync::config::{secret_string, parse_config, SyncConfig};
use ouvidoria_sync::domain::{FetchError, FetchWindow, Result, TaskRecord, REPORT_COLUMNS};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Task source replaying scripted pages
pub struct ScriptedSource {
    pages: Mutex<VecDeque<std::result::Result<Vec<TaskRecord>, FetchError>>>,
    pub requests: Mutex<Vec<(u32, FetchWindow)>>,
}

impl ScriptedSource {
    pub fn new(pages: Vec<std::result::Result<Vec<TaskRecord>, FetchError>>) -> Self {
        Self {
            pages: Mutex::new(pages.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Pages of tasks followed by an empty page
    pub fn with_pages(pages: Vec<Vec<Value>>) -> Self {
        let mut scripted: Vec<_> = pages.into_iter().map(|p| Ok(records(p))).collect();
        scripted.push(Ok(Vec::new()));
        Self::new(scripted)
    }
}

#[async_trait]
impl TaskSource for ScriptedSource {
    async fn fetch_page(
        &self,
        page: u32,
        window: &FetchWindow,
    ) -> std::result::Result<Vec<TaskRecord>, FetchError> {
        self.requests.lock().unwrap().push((page, *window));
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    fn endpoint(&self) -> &str {
        "scripted"
    }
}

/// Sink recording every batch it receives
pub struct RecordingSink {
    pub columns: Vec<String>,
    pub existing_rows: u64,
    pub batches: Mutex<Vec<LoadBatch>>,
}

impl RecordingSink {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            existing_rows: 0,
            batches: Mutex::new(Vec::new()),
        }
    }

    /// Sink whose table matches the report layout
    pub fn matching() -> Self {
        Self::new(REPORT_COLUMNS.iter().map(|c| c.to_string()).collect())
    }

    pub fn replace_calls(&self) -> usize {
        self.batches.lock().unwrap().len()
    }
}

#[async_trait]
impl ReportSink for RecordingSink {
    async fn test_connection(&self) -> Result<()> {
        Ok(())
    }

    async fn table_columns(&self, _table: &str) -> Result<Vec<String>> {
        Ok(self.columns.clone())
    }

    async fn replace_month(&self, batch: &LoadBatch) -> Result<LoadOutcome> {
        self.batches.lock().unwrap().push(batch.clone());
        Ok(LoadOutcome {
            deleted: self.existing_rows,
            inserted: batch.rows.len(),
        })
    }

    fn describe(&self) -> String {
        "recording sink".to_string()
    }
}

pub fn records(values: Vec<Value>) -> Vec<TaskRecord> {
    values
        .into_iter()
        .filter_map(|v| v.as_object().cloned())
        .collect()
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Minimal valid configuration with default transform settings
pub fn test_config() -> SyncConfig {
    let mut config = parse_config(
        r#"
[source]
token = "placeholder"

[sink]
dsn = "host=localhost dbname=ouvidoria"
user = "loader"
password = "placeholder"
"#,
    )
    .unwrap();
    config.source.token = secret_string("pk_test".to_string());
    config
}
