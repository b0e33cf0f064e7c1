//! Roster configuration parsing and validation for frota
//!
//! Supports TOML rosters with:
//! - Versioned schema
//! - Driver definitions with CNH and Omnilink Score dates
//! - Validation with clear error messages
//!
//! Unparseable dates do not fail validation. They are logged at load and
//! the affected credential reports as unknown.

mod roster;
mod schema;
mod validation;

pub use roster::*;
pub use schema::*;
pub use validation::*;

use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation failed: {errors:?}")]
    ValidationFailed { errors: Vec<ValidationError> },

    #[error("Unsupported config version: {0}")]
    UnsupportedVersion(u32),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Load and validate a roster from a TOML file
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<Roster> {
    let path = path.as_ref();
    debug!(path = %path.display(), "Loading roster");
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate a roster from a TOML string
pub fn parse_config(content: &str) -> ConfigResult<Roster> {
    let raw: RawConfig = toml::from_str(content)?;

    if raw.config_version != CURRENT_CONFIG_VERSION {
        return Err(ConfigError::UnsupportedVersion(raw.config_version));
    }

    let errors = validate_config(&raw);
    if !errors.is_empty() {
        return Err(ConfigError::ValidationFailed { errors });
    }

    for warning in date_warnings(&raw) {
        warn!(
            driver_id = %warning.driver_id,
            field = warning.field,
            value = %warning.value,
            "Unparseable date in roster"
        );
    }

    Ok(Roster::from_raw(raw))
}

/// Current supported config version
pub const CURRENT_CONFIG_VERSION: u32 = 1;
