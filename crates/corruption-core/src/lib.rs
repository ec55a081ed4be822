//! Corruption Simulation Engine
//!
//! Generations of agents choose how dishonest to be, earn a mixed legitimate
//! and illicit income, and hand capital down to a single offspring. The
//! population's capital-weighted dishonesty feeds back into every agent's
//! next choice.
//!
//! ```no_run
//! use corruption_core::{ModelConfig, Simulation};
//!
//! let mut sim = Simulation::new(ModelConfig::default(), 42)?;
//! for report in sim.run(10)? {
//!     println!("{} q={:.4}", report.report_id, report.aggregates.corruption_index);
//! }
//! # Ok::<(), corruption_core::SimError>(())
//! ```

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;

pub mod components;
pub mod config;
pub mod error;
pub mod output;
pub mod setup;
pub mod simulation;
pub mod systems;

pub use components::*;
pub use config::{Config, ModelConfig, RunConfig};
pub use error::{ConfigError, SimError};
pub use simulation::Simulation;

pub use corruption_events::{AgentSnapshot, AggregateSnapshot, GenerationReport};

/// Seeded random number generator resource
#[derive(Resource)]
pub struct SimRng(pub SmallRng);
