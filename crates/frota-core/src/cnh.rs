//! CNH (driver's license) expiry status
//!
//! Sign convention: `days_difference` and `months_difference` are
//! **positive when the expiry is in the past** (`today - expiry`). This is
//! the opposite of the Omnilink functions.

use chrono::NaiveDate;
use frota_api::{CnhDescriptor, CnhStatus, DateOffset, StatusDescriptor};
use frota_util::{InputError, days_between, months_between, parse_calendar_date, today};

use crate::messages::{Granularity, describe_span};

/// A licence expiring within this many days is flagged as expiring soon
pub const CNH_EXPIRING_SOON_DAYS: i64 = 90;

/// Severity tag appended to expired-licence messages
pub const CNH_EXPIRED_SEVERITY: &str = "gravíssima";

pub const CNH_MISSING_MESSAGE: &str = "Validade da CNH não informada";
pub const CNH_INVALID_MESSAGE: &str = "Data de validade da CNH inválida";

/// Status of a CNH given its expiry date, relative to today.
pub fn cnh_status(expiry: Option<&str>) -> CnhDescriptor {
    cnh_status_at(expiry, today())
}

/// Status of a CNH given its expiry date, relative to `today`.
pub fn cnh_status_at(expiry: Option<&str>, today: NaiveDate) -> CnhDescriptor {
    let expiry_date = match parse_calendar_date(expiry) {
        Ok(date) => date,
        Err(InputError::Missing) => return StatusDescriptor::unknown(CNH_MISSING_MESSAGE),
        Err(InputError::Invalid(_)) => return StatusDescriptor::unknown(CNH_INVALID_MESSAGE),
    };

    let days = days_between(expiry_date, today);
    let months = months_between(expiry_date, today);
    let offset = DateOffset::between(today, expiry_date);
    let span = describe_span(&offset, Granularity::Years);

    let (status, message) = if days == 0 {
        (CnhStatus::ExpiringSoon, "CNH vence hoje".to_string())
    } else if days < 0 {
        if -days <= CNH_EXPIRING_SOON_DAYS {
            (CnhStatus::ExpiringSoon, format!("CNH vence em {span}"))
        } else {
            (CnhStatus::Valid, format!("CNH válida, vence em {span}"))
        }
    } else {
        (
            CnhStatus::Expired,
            format!("CNH vencida há {span} ({CNH_EXPIRED_SEVERITY})"),
        )
    };

    StatusDescriptor {
        status,
        message,
        days_difference: days,
        months_difference: months,
        expiry_date: None,
        offset: Some(offset),
    }
}
