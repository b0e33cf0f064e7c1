//! Store trait definitions

use frota_api::{DriverRecord, ScoreStatus};
use frota_util::DriverId;

use crate::StoreResult;

/// Main store trait
pub trait Store: Send + Sync {
    // Drivers

    /// Insert a driver, or replace every field of an existing one
    fn upsert_driver(&self, record: &DriverRecord) -> StoreResult<()>;

    /// Get a driver by ID
    fn get_driver(&self, id: &DriverId) -> StoreResult<Option<DriverRecord>>;

    /// All drivers, ordered by ID
    fn list_drivers(&self) -> StoreResult<Vec<DriverRecord>>;

    // Derived fields

    /// Overwrite the persisted Omnilink status and expiry of a driver.
    ///
    /// Fails with `NotFound` when the driver does not exist.
    fn update_omnilink(
        &self,
        id: &DriverId,
        status: Option<ScoreStatus>,
        expiry: Option<&str>,
    ) -> StoreResult<()>;

    // Health

    /// Check if store is healthy
    fn is_healthy(&self) -> bool;
}
