//! Domain identifier types with validation
//!
//! Newtype wrappers for the values that key a monthly report batch.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Month reference (`MES_REF`) of a report batch
///
/// Always the first day of a month, rendered as `01/MM/YYYY`. It is the key
/// used to replace a month's rows on every run.
///
/// # Examples
///
/// ```
/// use ouvidoria_sync::domain::ids::MonthReference;
/// use std::str::FromStr;
///
/// let month_ref = MonthReference::from_str("01/04/2025").unwrap();
/// assert_eq!(month_ref.as_str(), "01/04/2025");
/// assert_eq!(month_ref.month(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonthReference {
    value: String,
    year: i32,
    month: u32,
}

impl MonthReference {
    /// Creates the month reference for the given year and month
    pub fn new(year: i32, month: u32) -> Result<Self, String> {
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(format!("Invalid month reference: {month:02}/{year}"));
        }
        Ok(Self {
            value: format!("01/{month:02}/{year}"),
            year,
            month,
        })
    }

    /// Creates the month reference of the month containing `date`
    pub fn of(date: NaiveDate) -> Self {
        Self {
            value: format!("01/{:02}/{}", date.month(), date.year()),
            year: date.year(),
            month: date.month(),
        }
    }

    /// Returns the month reference as a string slice
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Year of the referenced month
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Referenced month (1-12)
    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for MonthReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl FromStr for MonthReference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date = NaiveDate::parse_from_str(s.trim(), "%d/%m/%Y")
            .map_err(|e| format!("Invalid month reference '{s}': {e}"))?;
        if date.day() != 1 {
            return Err(format!(
                "Invalid month reference '{s}': must be the first day of a month"
            ));
        }
        Ok(Self::of(date))
    }
}

impl AsRef<str> for MonthReference {
    fn as_ref(&self) -> &str {
        &self.value
    }
}
