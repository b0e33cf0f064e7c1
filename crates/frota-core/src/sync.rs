//! Roster write-back into the store

use chrono::NaiveDate;
use frota_api::DriverRecord;
use frota_store::{Store, StoreResult};
use tracing::info;

use crate::derive_omnilink_fields;

/// Outcome of [`sync_roster`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Drivers written
    pub synced: usize,
    /// Drivers whose stored Omnilink status differs from the previous one
    pub status_changes: usize,
}

/// Write every driver to `store` with its Omnilink status and expiry
/// recomputed for `today`.
///
/// Each driver is written in one upsert, so a failure never leaves a row
/// with its derived fields cleared. Stops at the first store error.
pub fn sync_roster(
    store: &dyn Store,
    drivers: &[DriverRecord],
    today: NaiveDate,
) -> StoreResult<SyncReport> {
    let mut report = SyncReport::default();

    for record in drivers {
        let previous_status = store
            .get_driver(&record.id)?
            .and_then(|stored| stored.omnilink_status);
        let derived = derive_omnilink_fields(record, today);

        store.upsert_driver(&derived)?;
        report.synced += 1;

        if previous_status != derived.omnilink_status {
            report.status_changes += 1;
            info!(
                driver_id = %derived.id,
                previous = ?previous_status,
                current = ?derived.omnilink_status,
                "Omnilink status written back"
            );
        }
    }

    Ok(report)
}
