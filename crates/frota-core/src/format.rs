//! pt-BR display formatting for dates and times
//!
//! Formatting never fails: missing input renders as [`PLACEHOLDER`] and
//! unparseable input as [`INVALID_DATE`] / [`INVALID_TIME`], which are
//! deliberately distinct from the placeholder.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime};
use frota_util::{ISO_DATE_FORMAT, InputError, parse_calendar_date, parse_timestamp};

/// Rendered for a value that was never recorded
pub const PLACEHOLDER: &str = "-";

/// Rendered for a date that is present but unparseable
pub const INVALID_DATE: &str = "Data inválida";

/// Rendered for a time that is present but unparseable
pub const INVALID_TIME: &str = "Hora inválida";

const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";
const DISPLAY_TIME_FORMAT: &str = "%H:%M";

/// Bare time-of-day layouts, most specific first
const BARE_TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];

const MONTH_NAMES: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Anything the formatters accept: a parsed value, a string, or nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateInput<'a> {
    Missing,
    Text(&'a str),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl<'a> From<&'a str> for DateInput<'a> {
    fn from(s: &'a str) -> Self {
        DateInput::Text(s)
    }
}

impl<'a> From<&'a String> for DateInput<'a> {
    fn from(s: &'a String) -> Self {
        DateInput::Text(s.as_str())
    }
}

impl<'a> From<Option<&'a str>> for DateInput<'a> {
    fn from(s: Option<&'a str>) -> Self {
        s.map_or(DateInput::Missing, DateInput::Text)
    }
}

impl From<NaiveDate> for DateInput<'_> {
    fn from(date: NaiveDate) -> Self {
        DateInput::Date(date)
    }
}

impl From<Option<NaiveDate>> for DateInput<'_> {
    fn from(date: Option<NaiveDate>) -> Self {
        date.map_or(DateInput::Missing, DateInput::Date)
    }
}

impl From<NaiveDateTime> for DateInput<'_> {
    fn from(dt: NaiveDateTime) -> Self {
        DateInput::DateTime(dt)
    }
}

impl From<DateTime<Local>> for DateInput<'_> {
    fn from(dt: DateTime<Local>) -> Self {
        DateInput::DateTime(dt.naive_local())
    }
}

/// Format a date as `DD/MM/YYYY`
pub fn format_date<'a>(input: impl Into<DateInput<'a>>) -> String {
    let date = match input.into() {
        DateInput::Missing => return PLACEHOLDER.to_string(),
        DateInput::Date(date) => date,
        DateInput::DateTime(dt) => dt.date(),
        DateInput::Text(raw) => match parse_calendar_date(Some(raw)) {
            Ok(date) => date,
            Err(InputError::Missing) => return PLACEHOLDER.to_string(),
            Err(InputError::Invalid(_)) => return INVALID_DATE.to_string(),
        },
    };

    date.format(DISPLAY_DATE_FORMAT).to_string()
}

/// Format a time of day as `HH:mm`.
///
/// Text input may be a bare `HH:mm` / `HH:mm:ss`, a full timestamp or a
/// bare `YYYY-MM-DD` date. A date has no time component and renders as
/// midnight, whether it arrives as text or as a value.
pub fn format_time<'a>(input: impl Into<DateInput<'a>>) -> String {
    let time = match input.into() {
        DateInput::Missing => return PLACEHOLDER.to_string(),
        DateInput::Date(_) => NaiveTime::MIN,
        DateInput::DateTime(dt) => dt.time(),
        DateInput::Text(raw) => {
            let raw = raw.trim();
            if raw.is_empty() {
                return PLACEHOLDER.to_string();
            }
            match parse_time_of_day(raw) {
                Some(time) => time,
                None => return INVALID_TIME.to_string(),
            }
        }
    };

    time.format(DISPLAY_TIME_FORMAT).to_string()
}

fn parse_time_of_day(raw: &str) -> Option<NaiveTime> {
    BARE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(raw, fmt).ok())
        .or_else(|| parse_timestamp(raw).map(|ts| ts.time()))
        .or_else(|| {
            NaiveDate::parse_from_str(raw, ISO_DATE_FORMAT)
                .ok()
                .map(|_| NaiveTime::MIN)
        })
}

/// pt-BR month name (lowercase) for a 1-based month number
pub fn month_name(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month.checked_sub(1)?).ok()?;
    MONTH_NAMES.get(index).copied()
}

/// `outubro de 2023`
pub fn format_month_year(date: NaiveDate) -> String {
    // Datelike::month is always 1..=12
    let name = month_name(date.month()).unwrap_or_default();
    format!("{} de {}", name, date.year())
}
