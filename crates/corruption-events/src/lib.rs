//! Shared report types for the corruption simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! Downstream recorders and plotters depend on it instead of on the engine.

pub mod snapshot;

#[cfg(feature = "test-fixtures")]
pub mod fixtures;

// Re-export snapshot types
pub use snapshot::{generate_report_id, AgentSnapshot, AggregateSnapshot, GenerationReport};
