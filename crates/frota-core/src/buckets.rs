//! Range buckets over Omnilink descriptors
//!
//! Dashboard filters and reports group drivers into named buckets such as
//! `vencidos_31-90d`. Each bucket is a rule over a target status, a unit,
//! and a half-open range `(above, up_to]` on the *unsigned* distance to the
//! expiry. Reading [`DateOffset`] instead of the signed differences keeps
//! bucket membership independent of the descriptor's sign convention.

use chrono::NaiveDate;
use frota_api::{DateOffset, DriverRecord, OmnilinkDescriptor, OmnilinkStatus};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

use crate::detailed_omnilink_status_at;
use OmnilinkStatus::{EmDia, PrestVencer, Unknown, Vencido};
use RangeUnit::{Days, Months, Years};

/// Unit a bucket range is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeUnit {
    Days,
    Months,
    Years,
}

impl RangeUnit {
    fn magnitude(&self, offset: &DateOffset) -> u32 {
        match self {
            RangeUnit::Days => offset.days,
            RangeUnit::Months => offset.months,
            RangeUnit::Years => offset.years(),
        }
    }
}

/// Membership rule: `status` matches and `above < |distance| <= up_to`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketRule {
    pub status: OmnilinkStatus,
    pub unit: RangeUnit,
    /// Exclusive lower bound; `None` is unbounded
    pub above: Option<u32>,
    /// Inclusive upper bound; `None` is unbounded
    pub up_to: Option<u32>,
}

impl BucketRule {
    pub fn contains(&self, descriptor: &OmnilinkDescriptor) -> bool {
        if descriptor.status != self.status {
            return false;
        }

        let magnitude = descriptor
            .offset
            .map(|offset| self.unit.magnitude(&offset))
            .unwrap_or(0);

        self.above.is_none_or(|above| magnitude > above)
            && self.up_to.is_none_or(|up_to| magnitude <= up_to)
    }
}

/// Named range bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bucket {
    VencidosAny,
    Vencidos0To30Days,
    Vencidos31To90Days,
    Vencidos91To180Days,
    VencidosOver180Days,
    VencidosOver1Year,
    PrestVencerAny,
    PrestVencer0To30Days,
    PrestVencer31To60Days,
    PrestVencer61To90Days,
    PrestVencer1To3Months,
    EmDiaAny,
    EmDia0To3Months,
    EmDia4To5Months,
    EmDia6MonthsPlus,
    UnknownOmnilinkAny,
}

struct BucketDef {
    bucket: Bucket,
    key: &'static str,
    rule: BucketRule,
}

const fn bucket_def(
    bucket: Bucket,
    key: &'static str,
    status: OmnilinkStatus,
    unit: RangeUnit,
    above: Option<u32>,
    up_to: Option<u32>,
) -> BucketDef {
    BucketDef {
        bucket,
        key,
        rule: BucketRule {
            status,
            unit,
            above,
            up_to,
        },
    }
}

/// Indexed by `Bucket as usize`
static BUCKETS: [BucketDef; 16] = [
    bucket_def(Bucket::VencidosAny, "vencidos_any", Vencido, Days, None, None),
    bucket_def(Bucket::Vencidos0To30Days, "vencidos_0-30d", Vencido, Days, None, Some(30)),
    bucket_def(Bucket::Vencidos31To90Days, "vencidos_31-90d", Vencido, Days, Some(30), Some(90)),
    bucket_def(Bucket::Vencidos91To180Days, "vencidos_91-180d", Vencido, Days, Some(90), Some(180)),
    bucket_def(Bucket::VencidosOver180Days, "vencidos_180d+", Vencido, Days, Some(180), None),
    bucket_def(Bucket::VencidosOver1Year, "vencidos_1y+", Vencido, Years, Some(0), None),
    bucket_def(Bucket::PrestVencerAny, "prest_vencer_any", PrestVencer, Days, None, None),
    bucket_def(Bucket::PrestVencer0To30Days, "prest_vencer_0-30d", PrestVencer, Days, None, Some(30)),
    bucket_def(Bucket::PrestVencer31To60Days, "prest_vencer_31-60d", PrestVencer, Days, Some(30), Some(60)),
    bucket_def(Bucket::PrestVencer61To90Days, "prest_vencer_61-90d", PrestVencer, Days, Some(60), Some(90)),
    bucket_def(Bucket::PrestVencer1To3Months, "prest_vencer_1-3m", PrestVencer, Months, Some(0), Some(3)),
    bucket_def(Bucket::EmDiaAny, "em_dia_any", EmDia, Days, None, None),
    bucket_def(Bucket::EmDia0To3Months, "em_dia_0-3m", EmDia, Months, None, Some(3)),
    bucket_def(Bucket::EmDia4To5Months, "em_dia_4-5m", EmDia, Months, Some(3), Some(5)),
    bucket_def(Bucket::EmDia6MonthsPlus, "em_dia_6m+", EmDia, Months, Some(5), None),
    bucket_def(Bucket::UnknownOmnilinkAny, "unknown_omnilink_any", Unknown, Days, None, None),
];

impl Bucket {
    /// Every bucket, in dashboard order
    pub const ALL: [Bucket; 16] = [
        Bucket::VencidosAny,
        Bucket::Vencidos0To30Days,
        Bucket::Vencidos31To90Days,
        Bucket::Vencidos91To180Days,
        Bucket::VencidosOver180Days,
        Bucket::VencidosOver1Year,
        Bucket::PrestVencerAny,
        Bucket::PrestVencer0To30Days,
        Bucket::PrestVencer31To60Days,
        Bucket::PrestVencer61To90Days,
        Bucket::PrestVencer1To3Months,
        Bucket::EmDiaAny,
        Bucket::EmDia0To3Months,
        Bucket::EmDia4To5Months,
        Bucket::EmDia6MonthsPlus,
        Bucket::UnknownOmnilinkAny,
    ];

    fn def(self) -> &'static BucketDef {
        &BUCKETS[self as usize]
    }

    /// Filter key used by the UI (e.g. `vencidos_31-90d`)
    pub fn key(self) -> &'static str {
        self.def().key
    }

    pub fn rule(self) -> BucketRule {
        self.def().rule
    }

    pub fn contains(self, descriptor: &OmnilinkDescriptor) -> bool {
        self.rule().contains(descriptor)
    }

    /// Buckets whose rule targets `status`
    pub fn for_status(status: OmnilinkStatus) -> impl Iterator<Item = Bucket> {
        Bucket::ALL
            .into_iter()
            .filter(move |bucket| bucket.rule().status == status)
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl Serialize for Bucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

/// A bucket key that names no bucket
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown bucket key: {0}")]
pub struct UnknownBucket(pub String);

impl FromStr for Bucket {
    type Err = UnknownBucket;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        BUCKETS
            .iter()
            .find(|def| def.key == key)
            .map(|def| def.bucket)
            .ok_or_else(|| UnknownBucket(key.to_string()))
    }
}

/// Lenient membership check by key, for string-keyed UI filters.
///
/// An unrecognized key is not a member of anything.
pub fn matches_bucket_key(descriptor: &OmnilinkDescriptor, key: &str) -> bool {
    match key.parse::<Bucket>() {
        Ok(bucket) => bucket.contains(descriptor),
        Err(err) => {
            debug!(key, error = %err, "Unrecognized bucket key");
            false
        }
    }
}

/// Records whose Omnilink status falls in `bucket`, in input order
pub fn filter_by_bucket<'a>(
    records: &'a [DriverRecord],
    bucket: Bucket,
    today: NaiveDate,
) -> Vec<&'a DriverRecord> {
    records
        .iter()
        .filter(|record| {
            let descriptor =
                detailed_omnilink_status_at(record.omnilink_registration.as_deref(), today);
            bucket.contains(&descriptor)
        })
        .collect()
}
