//! Calendar windows and business-day counting
//!
//! Every function here is a pure function of the dates it receives; the
//! caller decides what "today" is.

pub mod holidays;

pub use holidays::HolidayCalendar;

use crate::domain::{FetchWindow, MonthReference};
use chrono::{Datelike, Months, NaiveDate, Weekday};

/// Day of month the fetch window starts on
const WINDOW_START_DAY: u32 = 29;

/// Lower bound of the fetch window
///
/// The 29th of the prior month (December 29th of the prior year in January).
/// From the 30th on, the window starts on the 29th of the current month,
/// matching the month reference rolling over. Months without a 29th clamp
/// to their last day.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use ouvidoria_sync::core::calendar::calculate_start_date;
///
/// let today = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
/// assert_eq!(calculate_start_date(today), NaiveDate::from_ymd_opt(2024, 12, 29).unwrap());
/// ```
pub fn calculate_start_date(today: NaiveDate) -> NaiveDate {
    if today.day() > WINDOW_START_DAY {
        return clamp_day(today.year(), today.month(), WINDOW_START_DAY);
    }

    let (year, month) = if today.month() == 1 {
        (today.year() - 1, 12)
    } else {
        (today.year(), today.month() - 1)
    };
    clamp_day(year, month, WINDOW_START_DAY)
}

/// Upper bound of the fetch window: yesterday
pub fn calculate_end_date(today: NaiveDate) -> NaiveDate {
    today.pred_opt().unwrap_or(today)
}

/// Fetch window for a run on `today`
pub fn fetch_window(today: NaiveDate) -> FetchWindow {
    FetchWindow::new(calculate_start_date(today), calculate_end_date(today))
}

/// Month reference of a run on `today`
///
/// On the 30th and 31st the batch already belongs to the next month.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use ouvidoria_sync::core::calendar::add_month_reference;
///
/// let today = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
/// assert_eq!(add_month_reference(today).as_str(), "01/01/2026");
/// ```
pub fn add_month_reference(today: NaiveDate) -> MonthReference {
    let first = today.with_day(1).unwrap_or(today);
    if matches!(today.day(), 30 | 31) {
        if let Some(next) = first.checked_add_months(Months::new(1)) {
            return MonthReference::of(next);
        }
    }
    MonthReference::of(first)
}

/// Inclusive count of business days between two dates
///
/// Sundays and holidays are skipped; Saturdays count. An absent date or a
/// start after the end yields zero.
pub fn count_business_days(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    calendar: &HolidayCalendar,
) -> u32 {
    let (Some(start), Some(end)) = (start, end) else {
        return 0;
    };

    let days = start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| day.weekday() != Weekday::Sun && !calendar.is_holiday(*day))
        .count();
    u32::try_from(days).unwrap_or(u32::MAX)
}

/// Parses a report date (`DD/MM/YYYY`), returning `None` when unparseable
pub fn parse_report_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%d/%m/%Y").ok()
}

fn clamp_day(year: i32, month: u32, day: u32) -> NaiveDate {
    (1..=day)
        .rev()
        .find_map(|d| NaiveDate::from_ymd_opt(year, month, d))
        .unwrap_or_default()
}
