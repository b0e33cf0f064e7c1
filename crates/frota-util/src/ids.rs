//! Strongly-typed identifiers for frota

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a driver record
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DriverId(String);

impl DriverId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for DriverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for DriverId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for DriverId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn driver_id_equality() {
        let id1 = DriverId::new("d-001");
        let id2 = DriverId::from("d-001");
        let id3 = DriverId::new("d-002");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
    }

    #[test]
    fn driver_id_blank_is_empty() {
        assert!(DriverId::new("   ").is_empty());
        assert!(!DriverId::new("d-001").is_empty());
    }

    #[test]
    fn driver_id_serializes_as_plain_string() {
        let id = DriverId::new("d-001");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"d-001\"");

        let parsed: DriverId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }
}
