//! Column-level transformations
//!
//! Date reformatting, SLA digit extraction and the business-day filter,
//! each applied to a whole frame column at a time.

use super::frame::Frame;
use crate::core::calendar::{count_business_days, parse_report_date, HolidayCalendar};
use crate::domain::Filtro;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Output format of every reformatted date column
pub const REPORT_DATE_FORMAT: &str = "%d/%m/%Y";

fn digits_regex() -> &'static Regex {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    DIGITS.get_or_init(|| Regex::new(r"\d+").expect("digit pattern is valid"))
}

/// Reformat the given columns as `DD/MM/YYYY`
///
/// Absent columns are skipped and unparseable values become null; a bad
/// value never fails the row.
pub fn reformat_dates(frame: &mut Frame, columns: &[String]) {
    for column in columns {
        if !frame.has_column(column) {
            continue;
        }
        let formatted: Vec<Value> = frame
            .column_values(column)
            .map(|value| match parse_timestamp(value) {
                Some(date) => Value::String(date.format(REPORT_DATE_FORMAT).to_string()),
                None => Value::Null,
            })
            .collect();
        frame.set_column(column, formatted);
    }
}

/// Parse a timestamp cell into a calendar date
///
/// Accepts epoch milliseconds (as a number or a digit string), RFC 3339,
/// `YYYY-MM-DD[ HH:MM:SS]` and already formatted `DD/MM/YYYY` values.
pub fn parse_timestamp(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::Number(number) => {
            let millis = number
                .as_i64()
                .or_else(|| number.as_f64().map(|f| f as i64))?;
            from_epoch_millis(millis)
        }
        Value::String(text) => parse_timestamp_str(text.trim()),
        _ => None,
    }
}

fn parse_timestamp_str(text: &str) -> Option<NaiveDate> {
    if text.is_empty() {
        return None;
    }
    if text.bytes().all(|b| b.is_ascii_digit()) {
        return text.parse().ok().and_then(from_epoch_millis);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Some(datetime.date_naive());
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|datetime| datetime.date())
        .or_else(|| NaiveDate::parse_from_str(text, "%Y-%m-%d").ok())
        .or_else(|| parse_report_date(text))
}

fn from_epoch_millis(millis: i64) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp_millis(millis).map(|datetime| datetime.date_naive())
}

/// Every digit of the raw SLA, concatenated in order
///
/// # Examples
///
/// ```
/// use ouvidoria_sync::core::transform::columns::extract_sla_digits;
/// use serde_json::json;
///
/// assert_eq!(extract_sla_digits(&json!("Prazo: 5 dias")), "5");
/// assert_eq!(extract_sla_digits(&json!("sem prazo")), "");
/// ```
pub fn extract_sla_digits(value: &Value) -> String {
    let text = match value {
        Value::Null => return String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    };
    digits_regex()
        .find_iter(&text)
        .map(|m| m.as_str())
        .collect()
}

/// Add `target` holding the SLA digits of `source`
pub fn add_sla_digits_column(frame: &mut Frame, source: &str, target: &str) {
    let digits: Vec<Value> = frame
        .column_values(source)
        .map(|value| Value::String(extract_sla_digits(value)))
        .collect();
    frame.set_column(target, digits);
}

/// Add a column holding the same value on every row
pub fn add_constant_column(frame: &mut Frame, column: &str, value: &str) {
    let values = vec![Value::String(value.to_string()); frame.len()];
    frame.set_column(column, values);
}

/// Column names used by [`add_filter_columns`]
#[derive(Debug, Clone, Copy)]
pub struct FilterColumns<'a> {
    /// Creation date column (`DD/MM/YYYY`)
    pub created: &'a str,
    /// Closing date column (`DD/MM/YYYY`)
    pub closed: &'a str,
    /// Output column for the business-day count
    pub business_days: &'a str,
    /// Output column for the OK/FORA flag
    pub filter: &'a str,
}

/// Add the business-day count and the OK/FORA filter columns
pub fn add_filter_columns(
    frame: &mut Frame,
    columns: FilterColumns<'_>,
    calendar: &HolidayCalendar,
    limit: u32,
) {
    let counts: Vec<u32> = (0..frame.len())
        .map(|row| {
            let created = frame.value(row, columns.created).as_str().and_then(parse_report_date);
            let closed = frame.value(row, columns.closed).as_str().and_then(parse_report_date);
            count_business_days(created, closed, calendar)
        })
        .collect();

    let filters: Vec<Value> = counts
        .iter()
        .map(|days| Value::String(Filtro::from_business_days(*days, limit).to_string()))
        .collect();

    frame.set_column(columns.business_days, counts.into_iter().map(Value::from));
    frame.set_column(columns.filter, filters);
}
