// Date utility functions shared by layout, projection and navigation.

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, Weekday};

pub fn is_same_day(date1: DateTime<Local>, date2: DateTime<Local>) -> bool {
    date1.date_naive() == date2.date_naive()
}

/// The Monday on or before the given date.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_monday() as i64;
    date - Duration::days(offset)
}

/// Whole days from `from` to `to`. Negative when `to` precedes `from`.
pub fn days_since(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Time-of-day expressed in fractional hours (e.g. 09:30 -> 9.5).
pub fn time_of_day_hours(time: DateTime<Local>) -> f64 {
    let tod = time.time();
    tod.signed_duration_since(chrono::NaiveTime::MIN).num_seconds() as f64 / 3600.0
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
