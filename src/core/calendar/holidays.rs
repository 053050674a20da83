//! Brazilian national holiday calendar
//!
//! Fixed-date national holidays plus Good Friday, which moves with Easter.
//! Extra dates (state or municipal holidays, bridge days) can be added from
//! configuration.

use chrono::{Datelike, Duration, NaiveDate};
use std::collections::BTreeSet;

/// Fixed-date national holidays as (month, day, name, first year observed)
const FIXED_HOLIDAYS: [(u32, u32, &str, i32); 9] = [
    (1, 1, "Confraternização Universal", i32::MIN),
    (4, 21, "Tiradentes", i32::MIN),
    (5, 1, "Dia do Trabalhador", i32::MIN),
    (9, 7, "Independência do Brasil", i32::MIN),
    (10, 12, "Nossa Senhora Aparecida", i32::MIN),
    (11, 2, "Finados", i32::MIN),
    (11, 15, "Proclamação da República", i32::MIN),
    (11, 20, "Dia Nacional de Zumbi e da Consciência Negra", 2024),
    (12, 25, "Natal", i32::MIN),
];

/// Holiday calendar used by the business-day counter
#[derive(Debug, Clone, Default)]
pub struct HolidayCalendar {
    extra: BTreeSet<NaiveDate>,
}

impl HolidayCalendar {
    /// Brazilian national holidays only
    pub fn brazil() -> Self {
        Self::default()
    }

    /// Brazilian national holidays plus the given dates
    pub fn with_extra_dates(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            extra: dates.into_iter().collect(),
        }
    }

    /// Whether `date` is a holiday
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holiday_name(date).is_some()
    }

    /// Name of the holiday falling on `date`, if any
    pub fn holiday_name(&self, date: NaiveDate) -> Option<&'static str> {
        let fixed = FIXED_HOLIDAYS
            .iter()
            .find(|(month, day, _, since)| {
                date.month() == *month && date.day() == *day && date.year() >= *since
            })
            .map(|(_, _, name, _)| *name);

        fixed
            .or_else(|| (good_friday(date.year()) == Some(date)).then_some("Sexta-feira Santa"))
            .or_else(|| self.extra.contains(&date).then_some("Feriado configurado"))
    }

    /// Every holiday of `year`, sorted
    pub fn holidays_in_year(&self, year: i32) -> Vec<NaiveDate> {
        let mut dates: BTreeSet<NaiveDate> = FIXED_HOLIDAYS
            .iter()
            .filter(|(_, _, _, since)| year >= *since)
            .filter_map(|(month, day, _, _)| NaiveDate::from_ymd_opt(year, *month, *day))
            .collect();
        dates.extend(good_friday(year));
        dates.extend(self.extra.iter().filter(|d| d.year() == year));
        dates.into_iter().collect()
    }
}

/// Easter Sunday (anonymous Gregorian algorithm)
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;

    NaiveDate::from_ymd_opt(year, u32::try_from(month).ok()?, u32::try_from(day).ok()?)
}

fn good_friday(year: i32) -> Option<NaiveDate> {
    easter_sunday(year).map(|easter| easter - Duration::days(2))
}
