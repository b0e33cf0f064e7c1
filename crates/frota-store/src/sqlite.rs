//! SQLite-based store implementation

use frota_api::{DriverRecord, ScoreStatus};
use frota_util::DriverId;
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

use crate::{Store, StoreError, StoreResult};

/// SQLite-based store
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

/// Column values as stored, before the status string is parsed
type DriverRow = (
    String,
    String,
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
);

const DRIVER_COLUMNS: &str =
    "id, name, cnh_expiry, omnilink_registration, omnilink_status, omnilink_expiry";

impl SqliteStore {
    /// Open or create a store at the given path
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory store (for testing)
    pub fn in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }

    fn init_schema(&self) -> StoreResult<()> {
        let conn = self.lock()?;

        conn.execute_batch(
            r#"
            -- Drivers and their credential dates
            CREATE TABLE IF NOT EXISTS drivers (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                cnh_expiry TEXT,
                omnilink_registration TEXT,
                omnilink_status TEXT,
                omnilink_expiry TEXT,
                updated_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_drivers_omnilink_status ON drivers(omnilink_status);
            "#,
        )?;

        debug!("Store schema initialized");
        Ok(())
    }
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<DriverRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
    ))
}

fn into_record(row: DriverRow) -> StoreResult<DriverRecord> {
    let (id, name, cnh_expiry, omnilink_registration, omnilink_status, omnilink_expiry) = row;
    let omnilink_status = omnilink_status
        .map(|s| s.parse::<ScoreStatus>())
        .transpose()?;

    Ok(DriverRecord {
        id: DriverId::new(id),
        name,
        cnh_expiry,
        omnilink_registration,
        omnilink_status,
        omnilink_expiry,
    })
}

fn timestamp() -> String {
    frota_util::now().to_rfc3339()
}

impl Store for SqliteStore {
    fn upsert_driver(&self, record: &DriverRecord) -> StoreResult<()> {
        let conn = self.lock()?;

        conn.execute(
            r#"
            INSERT INTO drivers (id, name, cnh_expiry, omnilink_registration,
                                 omnilink_status, omnilink_expiry, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id)
            DO UPDATE SET name = excluded.name,
                          cnh_expiry = excluded.cnh_expiry,
                          omnilink_registration = excluded.omnilink_registration,
                          omnilink_status = excluded.omnilink_status,
                          omnilink_expiry = excluded.omnilink_expiry,
                          updated_at = excluded.updated_at
            "#,
            params![
                record.id.as_str(),
                record.name,
                record.cnh_expiry,
                record.omnilink_registration,
                record.omnilink_status.map(|s| s.as_str()),
                record.omnilink_expiry,
                timestamp(),
            ],
        )?;

        debug!(driver_id = %record.id, "Driver upserted");
        Ok(())
    }

    fn get_driver(&self, id: &DriverId) -> StoreResult<Option<DriverRecord>> {
        let conn = self.lock()?;

        let row = conn
            .query_row(
                &format!("SELECT {DRIVER_COLUMNS} FROM drivers WHERE id = ?"),
                [id.as_str()],
                read_row,
            )
            .optional()?;

        row.map(into_record).transpose()
    }

    fn list_drivers(&self) -> StoreResult<Vec<DriverRecord>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(&format!("SELECT {DRIVER_COLUMNS} FROM drivers ORDER BY id"))?;
        let rows = stmt.query_map([], read_row)?;

        let mut drivers = Vec::new();
        for row in rows {
            drivers.push(into_record(row?)?);
        }

        Ok(drivers)
    }

    fn update_omnilink(
        &self,
        id: &DriverId,
        status: Option<ScoreStatus>,
        expiry: Option<&str>,
    ) -> StoreResult<()> {
        let conn = self.lock()?;

        let changed = conn.execute(
            r#"
            UPDATE drivers
            SET omnilink_status = ?, omnilink_expiry = ?, updated_at = ?
            WHERE id = ?
            "#,
            params![status.map(|s| s.as_str()), expiry, timestamp(), id.as_str()],
        )?;

        if changed == 0 {
            return Err(StoreError::NotFound(format!("driver {id}")));
        }

        debug!(driver_id = %id, status = ?status, expiry = ?expiry, "Omnilink fields updated");
        Ok(())
    }

    fn is_healthy(&self) -> bool {
        match self.conn.lock() {
            Ok(conn) => conn.query_row("SELECT 1", [], |_| Ok(())).is_ok(),
            Err(_) => {
                warn!("Store lock poisoned");
                false
            }
        }
    }
}
