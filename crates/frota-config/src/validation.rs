//! Roster validation

use crate::schema::{RawConfig, RawDriver};
use frota_util::{DriverId, InputError, parse_calendar_date};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Validation error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Driver '{driver_id}': {message}")]
    DriverError { driver_id: String, message: String },

    #[error("Duplicate driver ID: {0}")]
    DuplicateDriverId(String),

    #[error("Driver #{index} has an empty ID")]
    EmptyDriverId { index: usize },
}

/// Validate a raw roster.
///
/// Unparseable dates are not errors; see [`date_warnings`].
pub fn validate_config(config: &RawConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    // Compared as loaded, so "d-1" and " d-1 " collide
    let mut seen_ids = HashSet::new();
    for (index, driver) in config.drivers.iter().enumerate() {
        let id = DriverId::new(driver.id.trim());
        if id.is_empty() {
            errors.push(ValidationError::EmptyDriverId { index });
            continue;
        }
        if seen_ids.contains(&id) {
            errors.push(ValidationError::DuplicateDriverId(id.to_string()));
        } else {
            seen_ids.insert(id);
        }
    }

    for driver in &config.drivers {
        errors.extend(validate_driver(driver));
    }

    errors
}

fn validate_driver(driver: &RawDriver) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if driver.name.trim().is_empty() {
        errors.push(ValidationError::DriverError {
            driver_id: driver.id.clone(),
            message: "name cannot be empty".into(),
        });
    }

    errors
}

/// A date that is present but could not be parsed.
///
/// The driver is still loaded; the credential just reports as unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateWarning {
    pub driver_id: String,
    pub field: &'static str,
    pub value: String,
}

impl fmt::Display for DateWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Driver '{}': {} '{}' is not a valid date",
            self.driver_id, self.field, self.value
        )
    }
}

/// Every unparseable date in the roster
pub fn date_warnings(config: &RawConfig) -> Vec<DateWarning> {
    let mut warnings = Vec::new();

    for driver in &config.drivers {
        let fields = [
            ("cnh_expiry", &driver.cnh_expiry),
            ("omnilink_registration", &driver.omnilink_registration),
        ];
        for (field, value) in fields {
            if let Err(InputError::Invalid(value)) = parse_calendar_date(value.as_deref()) {
                warnings.push(DateWarning {
                    driver_id: driver.id.clone(),
                    field,
                    value,
                });
            }
        }
    }

    warnings
}
