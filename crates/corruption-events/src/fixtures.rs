//! Sample data fixtures for testing.
//!
//! Enable the `test-fixtures` feature to access these helpers.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // corruption-events = { path = "../corruption-events", features = ["test-fixtures"] }
//!
//! use corruption_events::fixtures;
//!
//! let report = fixtures::sample_report();
//! ```

use crate::{AgentSnapshot, GenerationReport};

/// Returns the sample report from the fixtures file.
///
/// Contains 2 first-generation agents after one "corrupt" stage.
pub fn sample_report() -> GenerationReport {
    let json = include_str!("../tests/fixtures/sample_report.json");
    GenerationReport::from_json(json).expect("Failed to parse sample_report.json")
}

/// Returns the agents from the sample report.
pub fn sample_agents() -> Vec<AgentSnapshot> {
    sample_report().agents
}
