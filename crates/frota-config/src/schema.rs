//! Raw roster schema (as parsed from TOML)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw roster as parsed from TOML
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawConfig {
    /// Config schema version
    pub config_version: u32,

    /// Service-level settings
    #[serde(default)]
    pub service: RawServiceConfig,

    /// Drivers whose credentials are tracked
    #[serde(default)]
    pub drivers: Vec<RawDriver>,
}

/// Service-level settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawServiceConfig {
    /// Data directory for the store
    pub data_dir: Option<PathBuf>,
}

/// Raw driver definition
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawDriver {
    /// Unique stable ID
    pub id: String,

    /// Display name
    pub name: String,

    /// CNH expiry date (YYYY-MM-DD)
    pub cnh_expiry: Option<String>,

    /// Omnilink Score registration date (YYYY-MM-DD)
    pub omnilink_registration: Option<String>,
}
