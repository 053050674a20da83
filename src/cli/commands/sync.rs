//! Sync command implementation
//!
//! This module implements the `sync` command: fetch the month's tasks and
//! replace them in the report table.

use crate::adapters::clickup::ClickUpClient;
use crate::adapters::database::create_report_sink;
use crate::config::SyncConfig;
use crate::core::calendar::parse_report_date;
use crate::core::sync::{LoadStatus, SyncCoordinator, SyncSummary};
use chrono::NaiveDate;
use clap::Args;
use std::sync::Arc;

/// Arguments for the sync command
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Dry run mode - fetch, transform and check the table without writing
    #[arg(long)]
    pub dry_run: bool,

    /// Run as if today were this date (DD/MM/YYYY)
    #[arg(long, value_name = "DD/MM/YYYY", value_parser = parse_run_date)]
    pub date: Option<NaiveDate>,
}

fn parse_run_date(value: &str) -> Result<NaiveDate, String> {
    parse_report_date(value).ok_or_else(|| format!("'{value}' is not a DD/MM/YYYY date"))
}

impl SyncArgs {
    /// Execute the sync command
    pub async fn execute(&self, mut config: SyncConfig) -> anyhow::Result<i32> {
        tracing::info!("Starting sync command");

        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }
        if config.application.dry_run {
            println!("🔍 DRY RUN MODE - No data will be written to the database");
            println!();
        }

        let today = self
            .date
            .unwrap_or_else(|| chrono::Local::now().date_naive());

        let source = match ClickUpClient::new(&config.source) {
            Ok(client) => Arc::new(client),
            Err(e) => {
                tracing::error!(error = %e, "Failed to create task source client");
                eprintln!("Failed to initialize task source: {e}");
                return Ok(e.exit_code());
            }
        };

        let sink = match create_report_sink(&config.sink) {
            Ok(sink) => sink,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create report sink");
                eprintln!("Failed to initialize report sink: {e}");
                return Ok(e.exit_code());
            }
        };

        tracing::info!(sink = %sink.describe(), table = %config.sink.table, "Report sink ready");

        let coordinator = SyncCoordinator::new(config, source, sink);

        println!("🚀 Starting sync...");
        println!();

        let summary = match coordinator.run(today).await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::error!(error = %e, "Sync failed");
                eprintln!("Sync failed: {e}");
                return Ok(e.exit_code());
            }
        };

        summary.log_summary();
        print_summary(&summary);

        Ok(0)
    }
}

fn print_summary(summary: &SyncSummary) {
    println!("📊 Sync Summary:");
    println!("  Month Reference: {}", summary.month_ref);
    println!("  Window: {}", summary.window);
    println!("  Pages: {}", summary.pages_fetched);
    println!("  Tasks: {}", summary.tasks_fetched);
    println!("  Report Rows: {}", summary.report_rows);
    match summary.load_status {
        LoadStatus::Loaded => {
            println!("  Deleted: {}", summary.rows_deleted);
            println!("  Inserted: {}", summary.rows_inserted);
        }
        LoadStatus::SkippedEmpty => {
            println!("  ⚠️  No rows to load; the month was left untouched");
        }
        LoadStatus::DryRun => {
            println!("  Dry run: would replace {} rows", summary.report_rows);
        }
    }
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!();
}
