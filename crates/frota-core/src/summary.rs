//! Dashboard counters over a roster

use chrono::NaiveDate;
use frota_api::{CnhStatus, CredentialStatus, DriverRecord, OmnilinkStatus};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::{Bucket, cnh_status_at, detailed_omnilink_status_at};

/// Per-status and per-bucket counts for a set of drivers.
///
/// Every status and bucket is present, with zero when nothing matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceSummary {
    pub reference_day: NaiveDate,
    pub total: usize,
    /// Drivers with at least one credential expired or about to expire
    pub needs_attention: usize,
    pub cnh: BTreeMap<CnhStatus, usize>,
    pub omnilink: BTreeMap<OmnilinkStatus, usize>,
    pub buckets: BTreeMap<Bucket, usize>,
}

fn zeroed<S: CredentialStatus>() -> BTreeMap<S, usize> {
    S::ALL.iter().map(|status| (*status, 0)).collect()
}

impl ComplianceSummary {
    /// Count `records` as of `today`
    pub fn from_records(records: &[DriverRecord], today: NaiveDate) -> Self {
        let mut summary = Self {
            reference_day: today,
            total: records.len(),
            needs_attention: 0,
            cnh: zeroed(),
            omnilink: zeroed(),
            buckets: Bucket::ALL.into_iter().map(|bucket| (bucket, 0)).collect(),
        };

        for record in records {
            let cnh = cnh_status_at(record.cnh_expiry.as_deref(), today);
            let omnilink =
                detailed_omnilink_status_at(record.omnilink_registration.as_deref(), today);

            *summary.cnh.entry(cnh.status).or_default() += 1;
            *summary.omnilink.entry(omnilink.status).or_default() += 1;

            for bucket in Bucket::for_status(omnilink.status) {
                if bucket.contains(&omnilink) {
                    *summary.buckets.entry(bucket).or_default() += 1;
                }
            }

            let cnh_flagged = matches!(cnh.status, CnhStatus::Expired | CnhStatus::ExpiringSoon);
            let omnilink_flagged = matches!(
                omnilink.status,
                OmnilinkStatus::Vencido | OmnilinkStatus::PrestVencer
            );
            if cnh_flagged || omnilink_flagged {
                summary.needs_attention += 1;
            }
        }

        summary
    }

    pub fn cnh_count(&self, status: CnhStatus) -> usize {
        self.cnh.get(&status).copied().unwrap_or(0)
    }

    pub fn omnilink_count(&self, status: OmnilinkStatus) -> usize {
        self.omnilink.get(&status).copied().unwrap_or(0)
    }

    pub fn bucket_count(&self, bucket: Bucket) -> usize {
        self.buckets.get(&bucket).copied().unwrap_or(0)
    }
}
