//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the configuration file and, optionally, the report table.

use crate::adapters::database::create_report_sink;
use crate::config::load_config;
use crate::core::calendar::HolidayCalendar;
use crate::domain::REPORT_COLUMNS;
use chrono::Datelike;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Also connect to the database and check the report table's columns
    #[arg(long)]
    pub check_connection: bool,
}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(e.exit_code());
            }
        };

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Dry Run: {}", config.application.dry_run);
        println!("  Task Source: {}", config.source.base_url);
        println!("  Report Table: {}", config.sink.table);
        println!("  Month Reference Column: {}", config.sink.month_ref_column);
        println!("  Business Day Limit: {}", config.transform.business_day_limit);
        println!("  Extra Holidays: {}", config.transform.extra_holidays.len());
        let year = chrono::Local::now().year();
        let calendar =
            HolidayCalendar::with_extra_dates(config.transform.extra_holidays.iter().copied());
        println!("  Holidays in {year}: {}", format_holidays(&calendar, year));
        for mapping in &config.transform.columns {
            println!("  Column: {} -> {}", mapping.source, mapping.target);
        }
        println!();

        if !self.check_connection {
            return Ok(0);
        }

        let sink = match create_report_sink(&config.sink) {
            Ok(sink) => sink,
            Err(e) => {
                println!("❌ Failed to create report sink: {e}");
                return Ok(e.exit_code());
            }
        };

        if let Err(e) = sink.test_connection().await {
            println!("❌ Connection to {} failed: {e}", sink.describe());
            return Ok(e.exit_code());
        }
        println!("✅ Connected to {}", sink.describe());

        let columns = match sink.table_columns(&config.sink.table).await {
            Ok(columns) => columns,
            Err(e) => {
                println!("❌ Failed to read table columns: {e}");
                return Ok(e.exit_code());
            }
        };

        if columns.len() != REPORT_COLUMNS.len() {
            println!(
                "❌ Table {} has {} columns, the report has {}",
                config.sink.table,
                columns.len(),
                REPORT_COLUMNS.len()
            );
            return Ok(3);
        }

        println!("✅ Table {} has {} columns", config.sink.table, columns.len());
        println!();
        Ok(0)
    }
}

/// Holidays of `year` as `DD/MM`, in date order
fn format_holidays(calendar: &HolidayCalendar, year: i32) -> String {
    calendar
        .holidays_in_year(year)
        .iter()
        .map(|date| date.format("%d/%m").to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_format_holidays_includes_extra_dates() {
        let calendar =
            HolidayCalendar::with_extra_dates([NaiveDate::from_ymd_opt(2025, 1, 25).unwrap()]);
        let listed = format_holidays(&calendar, 2025);
        assert!(listed.starts_with("01/01, 25/01, 18/04, 21/04"));
        assert!(listed.ends_with("20/11, 25/12"));
    }

    #[tokio::test]
    async fn test_validate_missing_file() {
        let args = ValidateArgs {
            check_connection: false,
        };
        let code = args.execute("does-not-exist.toml").await.unwrap();
        assert_eq!(code, 2);
    }
}
