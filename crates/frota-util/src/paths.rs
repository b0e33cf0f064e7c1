//! Default paths for frota components
//!
//! Paths are user-writable by default (no root required):
//! - Roster: `$XDG_CONFIG_HOME/frota/roster.toml` or `~/.config/frota/roster.toml`
//! - Data: `$XDG_DATA_HOME/frota` or `~/.local/share/frota`

use std::path::PathBuf;

/// Environment variable for overriding the roster path
pub const FROTA_CONFIG_ENV: &str = "FROTA_CONFIG";

/// Environment variable for overriding the data directory
pub const FROTA_DATA_DIR_ENV: &str = "FROTA_DATA_DIR";

/// Roster filename within the config directory
const ROSTER_FILENAME: &str = "roster.toml";

/// Database filename within the data directory
const DATABASE_FILENAME: &str = "frota.db";

/// Application subdirectory name
const APP_DIR: &str = "frota";

/// Get the default roster path.
///
/// Order of precedence:
/// 1. `$FROTA_CONFIG` environment variable (if set)
/// 2. `$XDG_CONFIG_HOME/frota/roster.toml` (if XDG_CONFIG_HOME is set)
/// 3. `~/.config/frota/roster.toml` (fallback)
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(FROTA_CONFIG_ENV) {
        return PathBuf::from(path);
    }

    config_path_without_env()
}

/// Get the roster path without checking the FROTA_CONFIG env var.
pub fn config_path_without_env() -> PathBuf {
    if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(config_home).join(APP_DIR).join(ROSTER_FILENAME);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home)
            .join(".config")
            .join(APP_DIR)
            .join(ROSTER_FILENAME);
    }

    PathBuf::from("/etc").join(APP_DIR).join(ROSTER_FILENAME)
}

/// Get the default data directory.
///
/// Order of precedence:
/// 1. `$FROTA_DATA_DIR` environment variable (if set)
/// 2. `$XDG_DATA_HOME/frota` (if XDG_DATA_HOME is set)
/// 3. `~/.local/share/frota` (fallback)
pub fn default_data_dir() -> PathBuf {
    if let Ok(path) = std::env::var(FROTA_DATA_DIR_ENV) {
        return PathBuf::from(path);
    }

    data_dir_without_env()
}

/// Get the data directory without checking the FROTA_DATA_DIR env var.
/// Used for default values in configs where the env var is checked separately.
pub fn data_dir_without_env() -> PathBuf {
    if let Ok(data_home) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(data_home).join(APP_DIR);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home)
            .join(".local")
            .join("share")
            .join(APP_DIR);
    }

    // Last resort
    PathBuf::from("/tmp").join(APP_DIR).join("data")
}

/// Database file inside a data directory
pub fn database_path(data_dir: impl Into<PathBuf>) -> PathBuf {
    data_dir.into().join(DATABASE_FILENAME)
}
