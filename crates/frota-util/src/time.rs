//! Reference time for frota
//!
//! All relative date arithmetic is anchored on a single reference day,
//! sampled once per engine call through [`today`]. Engine functions also
//! come in `_at` variants that take the reference day explicitly.
//!
//! # Mock Time for Development
//!
//! In debug builds, the `FROTA_MOCK_TIME` environment variable can be set
//! to override the system time. This is useful for checking how a roster
//! will look on a given day (end of month, a future audit date).
//!
//! Format: `YYYY-MM-DD HH:MM:SS` (e.g., `2025-12-25 14:30:00`)
//!
//! Example:
//! ```bash
//! FROTA_MOCK_TIME="2025-12-25 14:30:00" frota dashboard
//! ```

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use std::sync::OnceLock;

/// Environment variable name for mock time (debug builds only)
pub const MOCK_TIME_ENV_VAR: &str = "FROTA_MOCK_TIME";

/// Expected layout of [`MOCK_TIME_ENV_VAR`]
pub const MOCK_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Cached mock time offset from the real time when the process started.
/// This allows mock time to advance naturally.
static MOCK_TIME_OFFSET: OnceLock<Option<chrono::Duration>> = OnceLock::new();

/// Returns the offset between mock time and real time at process start.
#[allow(clippy::disallowed_methods)] // This is the internal implementation that wraps Local::now()
fn get_mock_time_offset() -> Option<chrono::Duration> {
    *MOCK_TIME_OFFSET.get_or_init(|| {
        #[cfg(debug_assertions)]
        {
            if let Ok(mock_time_str) = std::env::var(MOCK_TIME_ENV_VAR) {
                return mock_offset_from(&mock_time_str, chrono::Local::now());
            }
            None
        }
        #[cfg(not(debug_assertions))]
        {
            None
        }
    })
}

/// Offset that moves `real_now` onto the mock time string.
#[cfg_attr(not(debug_assertions), allow(dead_code))]
fn mock_offset_from(mock_time_str: &str, real_now: DateTime<Local>) -> Option<chrono::Duration> {
    let Ok(naive_dt) = NaiveDateTime::parse_from_str(mock_time_str, MOCK_TIME_FORMAT) else {
        tracing::warn!(
            mock_time = %mock_time_str,
            expected_format = MOCK_TIME_FORMAT,
            "Invalid mock time format"
        );
        return None;
    };

    let Some(mock_dt) = Local.from_local_datetime(&naive_dt).single() else {
        tracing::warn!(
            mock_time = %mock_time_str,
            "Failed to convert mock time to local timezone"
        );
        return None;
    };

    let offset = mock_dt.signed_duration_since(real_now);
    tracing::info!(
        mock_time = %mock_time_str,
        offset_secs = offset.num_seconds(),
        "Mock time enabled"
    );
    Some(offset)
}

/// Returns whether mock time is currently active.
pub fn is_mock_time_active() -> bool {
    get_mock_time_offset().is_some()
}

/// Get the current local time, respecting mock time settings in debug builds.
#[allow(clippy::disallowed_methods)] // This is the wrapper that provides mock time support
pub fn now() -> DateTime<Local> {
    let real_now = chrono::Local::now();

    if let Some(offset) = get_mock_time_offset() {
        real_now + offset
    } else {
        real_now
    }
}

/// The reference day: the local calendar date of [`now`].
///
/// Callers sample this once and pass it down; it is never re-read in the
/// middle of a computation.
pub fn today() -> NaiveDate {
    now().date_naive()
}

/// Format a DateTime with full date and time (log and report footers)
pub fn format_datetime_full(dt: &DateTime<Local>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_now_returns_time() {
        let t = now();
        assert!(t.year() >= 2020);
        assert!(t.year() <= 2100);
    }

    #[test]
    fn test_today_matches_now() {
        let before = now().date_naive();
        let day = today();
        let after = now().date_naive();
        assert!(day >= before && day <= after);
    }

    #[test]
    fn test_format_datetime_full() {
        let dt = Local.with_ymd_and_hms(2025, 12, 25, 14, 30, 45).unwrap();
        assert_eq!(format_datetime_full(&dt), "2025-12-25 14:30:45");
    }

    #[test]
    fn test_mock_offset_from_valid_string() {
        let real_now = Local.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        let offset = mock_offset_from("2025-01-02 12:00:00", real_now).unwrap();
        assert_eq!(offset.num_hours(), 24);
        assert_eq!((real_now + offset).date_naive(), NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());
    }

    #[test]
    fn test_mock_offset_rejects_invalid_formats() {
        let real_now = Local.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        let invalid_formats = [
            "2025-12-25",          // Missing time
            "14:30:00",            // Missing date
            "2025/12/25 14:30:00", // Wrong date separator
            "2025-12-25T14:30:00", // ISO format (not supported)
            "25-12-2025 14:30:00", // Wrong date order
            "",
            "not a date",
        ];

        for format_str in &invalid_formats {
            assert!(
                mock_offset_from(format_str, real_now).is_none(),
                "Expected '{}' to be rejected",
                format_str
            );
        }
    }

    #[test]
    fn test_mock_time_env_var_name() {
        assert_eq!(MOCK_TIME_ENV_VAR, "FROTA_MOCK_TIME");
    }
}
