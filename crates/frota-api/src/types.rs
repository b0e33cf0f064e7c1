//! Status enums and descriptors
//!
//! The serialized status strings (`valid`, `expiring_soon`, `expired`,
//! `unknown`, `em_dia`, `prest_vencer`, `vencido`, `inapto`) are persisted
//! and matched verbatim by badge rendering and filter dialogs. Do not rename.

use chrono::NaiveDate;
use frota_util::{days_between, months_between};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Common surface of the credential status enums
pub trait CredentialStatus: Copy + Eq + Ord + fmt::Debug + 'static {
    /// Every variant, in badge order
    const ALL: &'static [Self];

    /// Status for a missing or unparseable date
    const UNKNOWN: Self;

    /// Exact wire string
    fn as_str(&self) -> &'static str;

    /// Badge label (pt-BR)
    fn label(&self) -> &'static str;

    fn is_unknown(&self) -> bool;
}

/// Lifecycle of a CNH (driver's license) relative to its expiry date
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CnhStatus {
    Valid,
    ExpiringSoon,
    Expired,
    Unknown,
}

impl CredentialStatus for CnhStatus {
    const ALL: &'static [Self] = &[
        CnhStatus::Valid,
        CnhStatus::ExpiringSoon,
        CnhStatus::Expired,
        CnhStatus::Unknown,
    ];
    const UNKNOWN: Self = CnhStatus::Unknown;

    fn as_str(&self) -> &'static str {
        match self {
            CnhStatus::Valid => "valid",
            CnhStatus::ExpiringSoon => "expiring_soon",
            CnhStatus::Expired => "expired",
            CnhStatus::Unknown => "unknown",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            CnhStatus::Valid => "Válida",
            CnhStatus::ExpiringSoon => "Vence em breve",
            CnhStatus::Expired => "Vencida",
            CnhStatus::Unknown => "Não informada",
        }
    }

    fn is_unknown(&self) -> bool {
        matches!(self, CnhStatus::Unknown)
    }
}

/// Three-state Omnilink Score lifecycle used by the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OmnilinkStatus {
    EmDia,
    PrestVencer,
    Vencido,
    Unknown,
}

impl CredentialStatus for OmnilinkStatus {
    const ALL: &'static [Self] = &[
        OmnilinkStatus::EmDia,
        OmnilinkStatus::PrestVencer,
        OmnilinkStatus::Vencido,
        OmnilinkStatus::Unknown,
    ];
    const UNKNOWN: Self = OmnilinkStatus::Unknown;

    fn as_str(&self) -> &'static str {
        match self {
            OmnilinkStatus::EmDia => "em_dia",
            OmnilinkStatus::PrestVencer => "prest_vencer",
            OmnilinkStatus::Vencido => "vencido",
            OmnilinkStatus::Unknown => "unknown",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            OmnilinkStatus::EmDia => "Em dia",
            OmnilinkStatus::PrestVencer => "Prestes a vencer",
            OmnilinkStatus::Vencido => "Vencido",
            OmnilinkStatus::Unknown => "Não cadastrado",
        }
    }

    fn is_unknown(&self) -> bool {
        matches!(self, OmnilinkStatus::Unknown)
    }
}

impl fmt::Display for CnhStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for OmnilinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flattened, storage-oriented Omnilink status (no "expiring soon" bucket)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreStatus {
    EmDia,
    Inapto,
}

impl ScoreStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreStatus::EmDia => "em_dia",
            ScoreStatus::Inapto => "inapto",
        }
    }
}

impl fmt::Display for ScoreStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted score status string that is neither `em_dia` nor `inapto`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown score status: {0}")]
pub struct UnknownScoreStatus(pub String);

impl FromStr for ScoreStatus {
    type Err = UnknownScoreStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "em_dia" => Ok(ScoreStatus::EmDia),
            "inapto" => Ok(ScoreStatus::Inapto),
            other => Err(UnknownScoreStatus(other.to_string())),
        }
    }
}

/// Where an expiry date falls relative to the reference day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Past,
    Today,
    Future,
}

/// Unsigned distance between the reference day and an expiry date.
///
/// The signed `*_difference` fields of a descriptor follow a per-function
/// sign convention; this view does not, and is what range logic reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateOffset {
    pub direction: Direction,
    pub days: u32,
    pub months: u32,
}

impl DateOffset {
    /// Offset of `expiry` as seen from `today`
    pub fn between(today: NaiveDate, expiry: NaiveDate) -> Self {
        let days = days_between(today, expiry);
        let months = months_between(today, expiry);
        let direction = match days {
            d if d < 0 => Direction::Past,
            0 => Direction::Today,
            _ => Direction::Future,
        };

        Self {
            direction,
            days: u32::try_from(days.unsigned_abs()).unwrap_or(u32::MAX),
            months: months.unsigned_abs(),
        }
    }

    /// Whole years, truncated
    pub fn years(&self) -> u32 {
        self.months / 12
    }
}

/// Output of every status function.
///
/// `days_difference` and `months_difference` keep the sign convention of
/// the function that produced them:
/// - CNH: positive when the expiry is in the past
/// - Omnilink: positive when the expiry is in the future
///
/// `offset` carries the same distance without a sign; it is `None` exactly
/// when the status is unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusDescriptor<S> {
    pub status: S,
    pub message: String,
    pub days_difference: i64,
    pub months_difference: i32,
    /// Computed expiry (Omnilink only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub offset: Option<DateOffset>,
}

impl<S: CredentialStatus> StatusDescriptor<S> {
    /// Descriptor for a missing or unparseable date
    pub fn unknown(message: impl Into<String>) -> Self {
        Self {
            status: S::UNKNOWN,
            message: message.into(),
            days_difference: 0,
            months_difference: 0,
            expiry_date: None,
            offset: None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.status.is_unknown()
    }
}

pub type CnhDescriptor = StatusDescriptor<CnhStatus>;
pub type OmnilinkDescriptor = StatusDescriptor<OmnilinkStatus>;
