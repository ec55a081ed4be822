//! World Setup
//!
//! First-generation agent spawning.

pub mod agents;

pub use agents::*;
