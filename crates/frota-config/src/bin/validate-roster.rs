//! Roster validation CLI tool
//!
//! Validates a frota roster file and reports any errors.

use frota_config::{CURRENT_CONFIG_VERSION, ConfigError, RawConfig, date_warnings, load_config};
use frota_util::default_config_path;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    let config_path = match args.get(1) {
        Some(path) => PathBuf::from(path),
        None => {
            let default_path = default_config_path();
            eprintln!("Usage: validate-roster [roster-file]");
            eprintln!();
            eprintln!("Validates a frota roster file.");
            eprintln!();
            eprintln!("If no path is provided, uses: {}", default_path.display());
            eprintln!();
            eprintln!("Example:");
            eprintln!("  validate-roster {}", default_path.display());
            eprintln!("  validate-roster roster.example.toml");
            return ExitCode::from(2);
        }
    };

    if !config_path.exists() {
        eprintln!("Error: Roster file not found: {}", config_path.display());
        return ExitCode::from(1);
    }

    match load_config(&config_path) {
        Ok(roster) => {
            println!("✓ Roster is valid");
            println!();
            println!("Summary:");
            println!("  Config version: {}", CURRENT_CONFIG_VERSION);
            println!("  Data dir: {}", roster.service.data_dir.display());
            println!("  Drivers: {}", roster.drivers.len());

            if !roster.drivers.is_empty() {
                println!();
                println!("Drivers:");
                for driver in &roster.drivers {
                    println!(
                        "  - {}: {} [CNH {}, Omnilink {}]",
                        driver.id,
                        driver.name,
                        driver.cnh_expiry.as_deref().unwrap_or("-"),
                        driver.omnilink_registration.as_deref().unwrap_or("-"),
                    );
                }
            }

            // Re-read the raw file only to list date warnings
            let warnings = std::fs::read_to_string(&config_path)
                .ok()
                .and_then(|content| toml::from_str::<RawConfig>(&content).ok())
                .map(|raw| date_warnings(&raw))
                .unwrap_or_default();
            if !warnings.is_empty() {
                println!();
                println!("Warnings ({}):", warnings.len());
                for warning in &warnings {
                    println!("  - {}", warning);
                }
            }

            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ Roster validation failed");
            eprintln!();
            match &e {
                ConfigError::ReadError(io_err) => {
                    eprintln!("Failed to read file: {}", io_err);
                }
                ConfigError::ParseError(parse_err) => {
                    eprintln!("TOML parse error:");
                    eprintln!("  {}", parse_err);
                }
                ConfigError::ValidationFailed { errors } => {
                    eprintln!("Validation errors ({}):", errors.len());
                    for err in errors {
                        eprintln!("  - {}", err);
                    }
                }
                ConfigError::UnsupportedVersion(ver) => {
                    eprintln!(
                        "Unsupported config version: {} (expected {})",
                        ver, CURRENT_CONFIG_VERSION
                    );
                }
            }
            ExitCode::from(1)
        }
    }
}
