//! Driver credential record
//!
//! Only the fields the status engine reads or writes back. Storage, forms
//! and everything else about a driver live with the caller.

use frota_util::DriverId;
use serde::{Deserialize, Serialize};

use crate::ScoreStatus;

/// A driver and the dates of their tracked credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverRecord {
    pub id: DriverId,
    pub name: String,

    /// CNH expiry date (`YYYY-MM-DD`), if recorded
    #[serde(default)]
    pub cnh_expiry: Option<String>,

    /// Omnilink Score registration date (`YYYY-MM-DD`), if recorded
    #[serde(default)]
    pub omnilink_registration: Option<String>,

    /// Persisted two-value status, derived from the registration date
    #[serde(default)]
    pub omnilink_status: Option<ScoreStatus>,

    /// Persisted expiry date, derived from the registration date
    #[serde(default)]
    pub omnilink_expiry: Option<String>,
}

impl DriverRecord {
    pub fn new(id: impl Into<DriverId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cnh_expiry: None,
            omnilink_registration: None,
            omnilink_status: None,
            omnilink_expiry: None,
        }
    }

    pub fn with_cnh_expiry(mut self, date: impl Into<String>) -> Self {
        self.cnh_expiry = Some(date.into());
        self
    }

    pub fn with_omnilink_registration(mut self, date: impl Into<String>) -> Self {
        self.omnilink_registration = Some(date.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_dates() {
        let record = DriverRecord::new("d-001", "Maria Souza")
            .with_cnh_expiry("2026-03-01")
            .with_omnilink_registration("2025-11-10");

        assert_eq!(record.id.as_str(), "d-001");
        assert_eq!(record.cnh_expiry.as_deref(), Some("2026-03-01"));
        assert_eq!(record.omnilink_registration.as_deref(), Some("2025-11-10"));
        assert!(record.omnilink_status.is_none());
    }

    #[test]
    fn missing_fields_deserialize_as_none() {
        let record: DriverRecord =
            serde_json::from_str(r#"{"id":"d-002","name":"João Lima"}"#).unwrap();
        assert!(record.cnh_expiry.is_none());
        assert!(record.omnilink_expiry.is_none());
    }

    #[test]
    fn score_status_round_trips_through_record() {
        let mut record = DriverRecord::new("d-003", "Ana");
        record.omnilink_status = Some(ScoreStatus::Inapto);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["omnilink_status"], "inapto");
    }
}
