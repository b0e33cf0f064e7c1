//! Shared utilities for frota
//!
//! This crate provides:
//! - ID types (DriverId)
//! - Reference time (`now`/`today`, with mock time for development)
//! - Calendar arithmetic (parsing, month shifting, signed differences)
//! - Default paths for config and data directories

mod calendar;
mod ids;
mod paths;
mod time;

pub use calendar::*;
pub use ids::*;
pub use paths::*;
pub use time::*;
