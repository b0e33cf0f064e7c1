//! Value types shared by every frota consumer
//!
//! This crate defines the stable shapes that badges, dashboards, filters
//! and reports depend on:
//! - Credential status enums (CNH, Omnilink Score) with their exact wire strings
//! - `StatusDescriptor`, the output of every status function
//! - `DateOffset`, a sign-free view of the distance to an expiry
//! - `DriverRecord`, the fields the engine reads and writes back

mod record;
mod types;

pub use record::*;
pub use types::*;
