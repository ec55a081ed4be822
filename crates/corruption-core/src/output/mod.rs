//! Output Systems
//!
//! Builds read-only snapshots of the population for reporting.

pub mod snapshot;

pub use snapshot::*;
