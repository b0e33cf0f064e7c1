//! Omnilink Score registration window
//!
//! An Omnilink Score is valid for six calendar months from its
//! registration date. All three functions here take the *registration*
//! date; the expiry is always derived from it and never stored apart.
//!
//! Sign convention: `days_difference` and `months_difference` are
//! **positive when the expiry is in the future** (`expiry - today`). This is
//! the opposite of the CNH function, and the range buckets rely on it.

use chrono::NaiveDate;
use frota_api::{DateOffset, OmnilinkDescriptor, OmnilinkStatus, ScoreStatus, StatusDescriptor};
use frota_util::{
    InputError, add_months, days_between, months_between, parse_calendar_date, to_iso_date, today,
};

use crate::messages::{Granularity, describe_span};

/// Validity window of a registration, in calendar months
pub const OMNILINK_VALIDITY_MONTHS: i32 = 6;

/// An expiry within this many days (inclusive) is "prestes a vencer"
pub const OMNILINK_EXPIRING_SOON_DAYS: i64 = 90;

pub const OMNILINK_MISSING_MESSAGE: &str = "Score Omnilink não cadastrado";
pub const OMNILINK_INVALID_MESSAGE: &str = "Data de cadastro do Score Omnilink inválida";

/// Expiry date of a registration: registration + 6 calendar months.
///
/// `None` when the registration date is missing or unparseable.
pub fn omnilink_expiry(registration: Option<&str>) -> Option<NaiveDate> {
    let registered = parse_calendar_date(registration).ok()?;
    add_months(registered, OMNILINK_VALIDITY_MONTHS)
}

/// Expiry date of a registration as a `YYYY-MM-DD` string.
pub fn calculate_omnilink_score_expiry(registration: Option<&str>) -> Option<String> {
    omnilink_expiry(registration).map(to_iso_date)
}

/// Two-value status persisted with the driver record, relative to today.
pub fn omnilink_score_status(registration: Option<&str>) -> Option<ScoreStatus> {
    omnilink_score_status_at(registration, today())
}

/// Two-value status persisted with the driver record.
///
/// `EmDia` only while the expiry is strictly after the current instant.
/// The expiry is a calendar date (local midnight), so an expiry of `today`
/// has already passed.
pub fn omnilink_score_status_at(
    registration: Option<&str>,
    today: NaiveDate,
) -> Option<ScoreStatus> {
    let expiry = omnilink_expiry(registration)?;
    Some(if expiry > today {
        ScoreStatus::EmDia
    } else {
        ScoreStatus::Inapto
    })
}

/// Three-state status for display, relative to today.
pub fn detailed_omnilink_status(registration: Option<&str>) -> OmnilinkDescriptor {
    detailed_omnilink_status_at(registration, today())
}

/// Three-state status for display, relative to `today`.
pub fn detailed_omnilink_status_at(
    registration: Option<&str>,
    today: NaiveDate,
) -> OmnilinkDescriptor {
    let registered = match parse_calendar_date(registration) {
        Ok(date) => date,
        Err(InputError::Missing) => return StatusDescriptor::unknown(OMNILINK_MISSING_MESSAGE),
        Err(InputError::Invalid(_)) => return StatusDescriptor::unknown(OMNILINK_INVALID_MESSAGE),
    };
    let Some(expiry) = add_months(registered, OMNILINK_VALIDITY_MONTHS) else {
        return StatusDescriptor::unknown(OMNILINK_INVALID_MESSAGE);
    };

    let days = days_between(today, expiry);
    let months = months_between(today, expiry);
    let offset = DateOffset::between(today, expiry);
    let span = describe_span(&offset, Granularity::Months);

    let (status, message) = if days < 0 {
        (OmnilinkStatus::Vencido, format!("Vencido há {span}"))
    } else if days == 0 {
        (OmnilinkStatus::PrestVencer, "Em dia, vence hoje".to_string())
    } else if days <= OMNILINK_EXPIRING_SOON_DAYS {
        (OmnilinkStatus::PrestVencer, format!("Em dia, vence em {span}"))
    } else {
        (OmnilinkStatus::EmDia, format!("Em dia, expira em {span}"))
    };

    StatusDescriptor {
        status,
        message,
        days_difference: days,
        months_difference: months,
        expiry_date: Some(expiry),
        offset: Some(offset),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2024, 6, 15)
    }

    #[test]
    fn expiry_is_six_calendar_months() {
        assert_eq!(
            calculate_omnilink_score_expiry(Some("2024-01-31")).as_deref(),
            Some("2024-07-31")
        );
        assert_eq!(
            calculate_omnilink_score_expiry(Some("2023-01-01")).as_deref(),
            Some("2023-07-01")
        );
        // Clamped to the end of a shorter month
        assert_eq!(
            calculate_omnilink_score_expiry(Some("2023-08-31")).as_deref(),
            Some("2024-02-29")
        );
        assert_eq!(calculate_omnilink_score_expiry(None), None);
        assert_eq!(calculate_omnilink_score_expiry(Some("ontem")), None);
    }

    #[test]
    fn expiry_tracks_registration_for_every_day_of_a_year() {
        let mut registered = date(2023, 1, 1);
        while registered < date(2024, 1, 1) {
            let iso = to_iso_date(registered);
            let expiry = omnilink_expiry(Some(&iso)).unwrap();
            assert_eq!(expiry, add_months(registered, 6).unwrap());
            assert_eq!(
                detailed_omnilink_status_at(Some(&iso), today()).expiry_date,
                Some(expiry)
            );
            registered += Duration::days(1);
        }
    }

    #[test]
    fn score_status_is_strictly_after_today() {
        // Expires tomorrow
        assert_eq!(
            omnilink_score_status_at(Some("2023-12-16"), today()),
            Some(ScoreStatus::EmDia)
        );
        // Expires today
        assert_eq!(
            omnilink_score_status_at(Some("2023-12-15"), today()),
            Some(ScoreStatus::Inapto)
        );
        assert_eq!(
            omnilink_score_status_at(Some("2023-01-01"), today()),
            Some(ScoreStatus::Inapto)
        );
        assert_eq!(omnilink_score_status_at(None, today()), None);
        assert_eq!(omnilink_score_status_at(Some("xx"), today()), None);
    }

    #[test]
    fn unknown_for_missing_or_invalid_registration() {
        let descriptor = detailed_omnilink_status_at(None, today());
        assert_eq!(descriptor.status, OmnilinkStatus::Unknown);
        assert_eq!(descriptor.message, OMNILINK_MISSING_MESSAGE);
        assert!(descriptor.expiry_date.is_none());

        let descriptor = detailed_omnilink_status_at(Some("2024-02-30"), today());
        assert_eq!(descriptor.status, OmnilinkStatus::Unknown);
        assert_eq!(descriptor.message, OMNILINK_INVALID_MESSAGE);
        assert_eq!(descriptor.days_difference, 0);
    }

    #[test]
    fn boundary_ninety_days_is_expiring_soon() {
        // Expiry 2024-09-13, 90 days after today
        let descriptor = detailed_omnilink_status_at(Some("2024-03-13"), today());
        assert_eq!(descriptor.days_difference, 90);
        assert_eq!(descriptor.status, OmnilinkStatus::PrestVencer);
        assert_eq!(descriptor.message, "Em dia, vence em 2 meses");
    }

    #[test]
    fn boundary_ninety_one_days_is_current() {
        let descriptor = detailed_omnilink_status_at(Some("2024-03-14"), today());
        assert_eq!(descriptor.days_difference, 91);
        assert_eq!(descriptor.status, OmnilinkStatus::EmDia);
        assert_eq!(descriptor.message, "Em dia, expira em 2 meses");
    }

    #[test]
    fn boundary_expiry_today_is_expiring_soon() {
        let descriptor = detailed_omnilink_status_at(Some("2023-12-15"), today());
        assert_eq!(descriptor.days_difference, 0);
        assert_eq!(descriptor.status, OmnilinkStatus::PrestVencer);
        assert_eq!(descriptor.message, "Em dia, vence hoje");
    }

    #[test]
    fn expired_registration_prefers_months() {
        let descriptor = detailed_omnilink_status_at(Some("2023-01-01"), date(2023, 10, 15));
        assert_eq!(descriptor.expiry_date, Some(date(2023, 7, 1)));
        assert_eq!(descriptor.days_difference, -106);
        assert_eq!(descriptor.months_difference, -3);
        assert_eq!(descriptor.status, OmnilinkStatus::Vencido);
        assert!(descriptor.message.contains("3 meses"));
        assert_eq!(descriptor.message, "Vencido há 3 meses");
    }

    #[test]
    fn expired_recently_uses_days_and_never_years() {
        let descriptor = detailed_omnilink_status_at(Some("2023-12-05"), today());
        assert_eq!(descriptor.days_difference, -10);
        assert_eq!(descriptor.message, "Vencido há 10 dias");

        let descriptor = detailed_omnilink_status_at(Some("2021-01-01"), today());
        assert_eq!(descriptor.status, OmnilinkStatus::Vencido);
        assert_eq!(descriptor.message, "Vencido há 35 meses");
    }

    #[test]
    fn classification_matches_day_difference_over_two_years() {
        let mut registered = date(2023, 6, 1);
        while registered < date(2025, 6, 1) {
            let iso = to_iso_date(registered);
            let descriptor = detailed_omnilink_status_at(Some(&iso), today());
            let expiry = add_months(registered, 6).unwrap();
            let days = (expiry - today()).num_days();

            assert_eq!(descriptor.days_difference, days);
            let expected = if days < 0 {
                OmnilinkStatus::Vencido
            } else if days <= 90 {
                OmnilinkStatus::PrestVencer
            } else {
                OmnilinkStatus::EmDia
            };
            assert_eq!(descriptor.status, expected, "registration {iso}");
            registered += Duration::days(1);
        }
    }

    #[test]
    fn same_day_calls_are_identical() {
        let first = detailed_omnilink_status_at(Some("2024-02-01"), today());
        let second = detailed_omnilink_status_at(Some("2024-02-01"), today());
        assert_eq!(first, second);

        let day = frota_util::today();
        let first = detailed_omnilink_status(Some("2024-02-01"));
        let second = detailed_omnilink_status(Some("2024-02-01"));
        if frota_util::today() == day {
            assert_eq!(first, second);
            assert_eq!(
                omnilink_score_status(Some("2024-02-01")),
                omnilink_score_status(Some("2024-02-01"))
            );
        }
    }
}
