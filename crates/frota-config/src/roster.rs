//! Validated roster structures

use crate::schema::{RawConfig, RawDriver, RawServiceConfig};
use frota_api::DriverRecord;
use frota_util::{DriverId, default_data_dir};
use std::path::PathBuf;

/// Validated roster ready for the status engine
#[derive(Debug, Clone)]
pub struct Roster {
    /// Service configuration
    pub service: ServiceConfig,

    /// Drivers, in file order
    pub drivers: Vec<DriverRecord>,
}

impl Roster {
    /// Convert from raw config (after validation)
    pub fn from_raw(raw: RawConfig) -> Self {
        Self {
            service: ServiceConfig::from_raw(raw.service),
            drivers: raw.drivers.into_iter().map(driver_from_raw).collect(),
        }
    }

    /// Get driver by ID
    pub fn get_driver(&self, id: &DriverId) -> Option<&DriverRecord> {
        self.drivers.iter().find(|d| &d.id == id)
    }
}

/// Service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub data_dir: PathBuf,
}

impl ServiceConfig {
    fn from_raw(raw: RawServiceConfig) -> Self {
        Self {
            data_dir: raw.data_dir.unwrap_or_else(default_data_dir),
        }
    }
}

fn driver_from_raw(raw: RawDriver) -> DriverRecord {
    let mut record = DriverRecord::new(raw.id.trim(), raw.name.trim());
    record.cnh_expiry = non_blank(raw.cnh_expiry);
    record.omnilink_registration = non_blank(raw.omnilink_registration);
    record
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_drivers_in_order() {
        let raw: RawConfig = toml::from_str(
            r#"
            config_version = 1

            [service]
            data_dir = "/srv/frota"

            [[drivers]]
            id = " d-2 "
            name = "Bruno"
            cnh_expiry = "2026-01-01"
            omnilink_registration = "  "

            [[drivers]]
            id = "d-1"
            name = "Ana"
            "#,
        )
        .unwrap();

        let roster = Roster::from_raw(raw);
        assert_eq!(roster.service.data_dir, PathBuf::from("/srv/frota"));
        assert_eq!(roster.drivers.len(), 2);
        assert_eq!(roster.drivers[0].id.as_str(), "d-2");
        assert_eq!(roster.drivers[0].cnh_expiry.as_deref(), Some("2026-01-01"));
        assert!(roster.drivers[0].omnilink_registration.is_none());
        assert!(roster.drivers[0].omnilink_status.is_none());

        let ana = roster.get_driver(&DriverId::new("d-1")).unwrap();
        assert_eq!(ana.name, "Ana");
        assert!(roster.get_driver(&DriverId::new("d-9")).is_none());
    }
}
