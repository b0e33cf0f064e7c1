//! Integration tests for frota
//!
//! These tests run the roster, store and status engine together.

use chrono::NaiveDate;
use frota_api::{CnhStatus, OmnilinkStatus, ScoreStatus};
use frota_config::{Roster, load_config, parse_config};
use frota_core::{
    Bucket, ComplianceSummary, SyncReport, detailed_omnilink_status_at, filter_by_bucket,
    matches_bucket_key, report_rows, sync_roster,
};
use frota_store::{SqliteStore, Store};
use frota_util::{DriverId, database_path};
use std::sync::Arc;
use std::thread;

const ROSTER: &str = r#"
config_version = 1

[[drivers]]
id = "d-001"
name = "Maria Souza"
cnh_expiry = "2027-03-01"
omnilink_registration = "2024-05-01"

[[drivers]]
id = "d-002"
name = "João Lima"
cnh_expiry = "2024-07-01"
omnilink_registration = "2023-11-01"

[[drivers]]
id = "d-003"
name = "Carla Dias"
cnh_expiry = "2023-01-10"
omnilink_registration = "2024-01-25"

[[drivers]]
id = "d-004"
name = "Davi Rocha"
cnh_expiry = "10/10/2025"
"#;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn roster() -> Roster {
    parse_config(ROSTER).unwrap()
}

#[test]
fn test_roster_loading() {
    let roster = roster();
    assert_eq!(roster.drivers.len(), 4);
    assert_eq!(roster.drivers[3].cnh_expiry.as_deref(), Some("10/10/2025"));
}

#[test]
fn test_dashboard_counts() {
    let summary = ComplianceSummary::from_records(&roster().drivers, today());

    assert_eq!(summary.total, 4);
    assert_eq!(summary.cnh_count(CnhStatus::Valid), 1);
    assert_eq!(summary.cnh_count(CnhStatus::ExpiringSoon), 1);
    assert_eq!(summary.cnh_count(CnhStatus::Expired), 1);
    // Unparseable date
    assert_eq!(summary.cnh_count(CnhStatus::Unknown), 1);

    assert_eq!(summary.omnilink_count(OmnilinkStatus::EmDia), 1);
    assert_eq!(summary.omnilink_count(OmnilinkStatus::PrestVencer), 1);
    assert_eq!(summary.omnilink_count(OmnilinkStatus::Vencido), 1);
    assert_eq!(summary.omnilink_count(OmnilinkStatus::Unknown), 1);
}

#[test]
fn test_bucket_filter_over_roster() {
    let roster = roster();

    let expired = filter_by_bucket(&roster.drivers, Bucket::Vencidos31To90Days, today());
    let ids: Vec<_> = expired.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, ["d-002"]);

    let soon = filter_by_bucket(&roster.drivers, Bucket::PrestVencer31To60Days, today());
    assert_eq!(soon.len(), 1);
    assert_eq!(soon[0].id.as_str(), "d-003");

    assert!("vencidos_7d".parse::<Bucket>().is_err());
}

#[test]
fn test_sync_writes_back_omnilink_fields() {
    let store = SqliteStore::in_memory().unwrap();
    let report = sync_roster(&store, &roster().drivers, today()).unwrap();
    // d-004 has no registration, so its status stays unset
    assert_eq!(report, SyncReport { synced: 4, status_changes: 3 });

    let drivers = store.list_drivers().unwrap();
    assert_eq!(drivers.len(), 4);

    let maria = store.get_driver(&DriverId::new("d-001")).unwrap().unwrap();
    assert_eq!(maria.omnilink_status, Some(ScoreStatus::EmDia));
    assert_eq!(maria.omnilink_expiry.as_deref(), Some("2024-11-01"));

    let joao = store.get_driver(&DriverId::new("d-002")).unwrap().unwrap();
    assert_eq!(joao.omnilink_status, Some(ScoreStatus::Inapto));
    assert_eq!(joao.omnilink_expiry.as_deref(), Some("2024-05-01"));

    let davi = store.get_driver(&DriverId::new("d-004")).unwrap().unwrap();
    assert!(davi.omnilink_status.is_none());
    assert!(davi.omnilink_expiry.is_none());
}

#[test]
fn test_resync_on_later_day_flips_status() {
    let store = SqliteStore::in_memory().unwrap();
    let roster = roster();
    sync_roster(&store, &roster.drivers, today()).unwrap();

    let again = sync_roster(&store, &roster.drivers, today()).unwrap();
    assert_eq!(again, SyncReport { synced: 4, status_changes: 0 });

    // Carla's score expires 2024-07-25
    let id = DriverId::new("d-003");
    assert_eq!(
        store.get_driver(&id).unwrap().unwrap().omnilink_status,
        Some(ScoreStatus::EmDia)
    );

    let later = NaiveDate::from_ymd_opt(2024, 7, 25).unwrap();
    let report = sync_roster(&store, &roster.drivers, later).unwrap();
    assert_eq!(report.status_changes, 1);
    assert_eq!(
        store.get_driver(&id).unwrap().unwrap().omnilink_status,
        Some(ScoreStatus::Inapto)
    );
    assert_eq!(store.list_drivers().unwrap().len(), 4);
}

#[test]
fn test_store_round_trip_matches_roster_report() {
    let dir = tempfile::tempdir().unwrap();
    let roster_path = dir.path().join("roster.toml");
    std::fs::write(&roster_path, ROSTER).unwrap();

    let roster = load_config(&roster_path).unwrap();
    let db_path = database_path(dir.path().join("data"));
    {
        let store = SqliteStore::open(&db_path).unwrap();
        sync_roster(&store, &roster.drivers, today()).unwrap();
    }

    let store = SqliteStore::open(&db_path).unwrap();
    let stored = store.list_drivers().unwrap();

    let from_roster = report_rows(&roster.drivers, today());
    let from_store = report_rows(&stored, today());
    assert_eq!(from_roster, from_store);
    assert_eq!(from_store[2].cnh.message, "CNH vencida há 1 ano (gravíssima)");
    assert_eq!(from_store[3].cnh_expiry, "Data inválida");
}

#[test]
fn test_concurrent_readers_agree() {
    let roster = Arc::new(roster());
    let day = today();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let roster = Arc::clone(&roster);
            thread::spawn(move || ComplianceSummary::from_records(&roster.drivers, day))
        })
        .collect();

    let summaries: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(summaries.windows(2).all(|pair| pair[0] == pair[1]));
}

#[test]
fn test_lenient_key_matching() {
    let descriptor = detailed_omnilink_status_at(Some("2023-11-01"), today());
    assert!(matches_bucket_key(&descriptor, "vencidos_31-90d"));
    assert!(!matches_bucket_key(&descriptor, "vencidos-31-90d"));
}
