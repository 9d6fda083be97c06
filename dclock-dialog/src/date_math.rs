//! Calendar arithmetic for the remaining-time report.
//!
//! chrono has no year/month difference (no `relativedelta`), so [`calendar_diff`] borrows
//! months and years by hand: a month only counts once its day-of-month has been reached.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime};

/// Display and input format for dates: `DD.MM.YYYY`.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Completed years and months from `start` to `end`.
///
/// `end >= start` is expected but not enforced; earlier `end` gives negative parts.
pub fn calendar_diff(start: NaiveDate, end: NaiveDate) -> (i32, i32) {
    let mut years = end.year() - start.year();
    let mut months = end.month() as i32 - start.month() as i32;

    if end.day() < start.day() {
        months -= 1;
    }

    if months < 0 {
        years -= 1;
        months += 12;
    }

    (years, months)
}

/// Years/months/weeks/days between now and the death date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemainingTime {
    pub years: i32,
    pub months: i32,
    pub total_months: i32,
    pub weeks: i64,
    pub days: i64,
    /// Midnight of the death date is strictly before `now`.
    pub passed: bool,
}

impl RemainingTime {
    /// The death date is already behind `now`, even by less than a day.
    pub fn is_negative(&self) -> bool {
        self.passed
    }
}

const SECONDS_PER_DAY: i64 = 86_400;

/// Breakdown of the interval from `now` to midnight of `death_date`.
///
/// `days` is the floor of the exact interval in days (so any part of a day past the death
/// date counts as a whole negative day), `weeks` is `days / 7`, years and months come from
/// [`calendar_diff`] on the calendar dates.
pub fn remaining_breakdown(death_date: NaiveDate, now: NaiveDateTime) -> RemainingTime {
    let death_at = death_date.and_time(NaiveTime::MIN);
    let days = (death_at - now).num_seconds().div_euclid(SECONDS_PER_DAY);
    let weeks = days / 7;
    let (years, months) = calendar_diff(now.date(), death_date);

    RemainingTime {
        years,
        months,
        total_months: years * 12 + months,
        weeks,
        days,
        passed: death_at < now,
    }
}

/// `birth_date` plus `lifespan_years` calendar years; 29 February clamps to 28 February.
///
/// `None` when the result falls outside chrono's date range.
pub fn death_date(birth_date: NaiveDate, lifespan_years: u32) -> Option<NaiveDate> {
    birth_date.checked_add_months(Months::new(lifespan_years.checked_mul(12)?))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
