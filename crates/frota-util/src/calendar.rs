//! Calendar-date parsing and arithmetic
//!
//! Every relative computation in frota works on whole local calendar days.
//! Dates are built from their written year/month/day components, so a
//! timestamp such as `2024-01-31T23:00:00-03:00` is the calendar date
//! `2024-01-31` regardless of the host timezone.
//!
//! Month arithmetic is component-wise (not a 30-day approximation) and
//! clamps to the end of the month: `2024-08-31 + 6 months = 2025-02-28`.

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime};
use thiserror::Error;

/// Canonical calendar-date format (`YYYY-MM-DD`)
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Timestamp layouts accepted besides RFC 3339
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Why a date-like input could not be turned into a calendar date
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Null, empty or whitespace-only input ("not recorded")
    #[error("date not recorded")]
    Missing,

    /// Present but not a valid calendar date
    #[error("invalid date: {0:?}")]
    Invalid(String),
}

/// Parse a nullable date-like string into a calendar date.
///
/// Accepts `YYYY-MM-DD` and full timestamps (RFC 3339 or naive); for
/// timestamps only the written date part is kept.
pub fn parse_calendar_date(input: Option<&str>) -> Result<NaiveDate, InputError> {
    let raw = input
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(InputError::Missing)?;

    if let Ok(date) = NaiveDate::parse_from_str(raw, ISO_DATE_FORMAT) {
        return Ok(date);
    }

    parse_timestamp(raw)
        .map(|ts| ts.date())
        .ok_or_else(|| InputError::Invalid(raw.to_string()))
}

/// Parse a timestamp string, keeping the wall-clock time as written.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }

    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// Render a calendar date as `YYYY-MM-DD`
pub fn to_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Shift a date by a signed number of calendar months, clamping the day to
/// the end of the target month. `None` only when leaving chrono's range.
pub fn add_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let delta = Months::new(months.unsigned_abs());
    if months >= 0 {
        date.checked_add_months(delta)
    } else {
        date.checked_sub_months(delta)
    }
}

/// Signed whole days from `from` to `to` (positive when `to` is later)
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

/// Signed whole calendar months from `from` to `to`, truncated toward zero.
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i32 {
    let mut months =
        (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32;

    // The raw month count overshoots by one when the day of month has not
    // been reached yet.
    if months > 0 && add_months(from, months).is_some_and(|shifted| shifted > to) {
        months -= 1;
    } else if months < 0 && add_months(from, months).is_some_and(|shifted| shifted < to) {
        months += 1;
    }

    months
}
