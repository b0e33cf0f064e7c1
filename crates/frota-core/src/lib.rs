//! Compliance status engine for frota
//!
//! This crate is the heart of frota, containing:
//! - Date and time formatting for pt-BR display (`DD/MM/YYYY`, `HH:mm`)
//! - CNH licence status (valid / expiring soon / expired / unknown)
//! - Omnilink Score expiry, storage status and detailed status
//! - Range buckets used by dashboard filters and reports
//! - Roster-level summaries, report rows and record write-back
//! - Syncing a roster into a [`frota_store::Store`]
//!
//! Everything here is synchronous. Only `sync_roster` touches a store.
//! Functions that depend on "now" sample the reference day once on entry,
//! and each has an `_at` variant that takes the reference day explicitly.
//!
//! The CNH and Omnilink descriptors use opposite sign conventions for their
//! signed differences; see [`frota_api::StatusDescriptor`].

mod buckets;
mod cnh;
mod format;
mod messages;
mod omnilink;
mod report;
mod summary;
mod sync;

pub use buckets::*;
pub use cnh::*;
pub use format::*;
pub use omnilink::*;
pub use report::*;
pub use summary::*;
pub use sync::*;
