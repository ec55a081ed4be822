//! Model Resources
//!
//! Model-wide state shared by every agent: the fixed parameters, the feedback
//! record recomputed each generation, identifier allocation, and stage status.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::agent::AgentId;
use crate::config::ModelConfig;
use crate::error::SimError;

/// Fixed model parameters, validated at construction
#[derive(Resource, Debug, Clone)]
pub struct ModelParams(pub ModelConfig);

/// Lowest and highest income observed in the last "corrupt" stage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IncomeBounds {
    pub min: f64,
    pub max: f64,
}

impl IncomeBounds {
    /// Where `income` sits between the bounds, 0 at `min` and 1 at `max`.
    pub fn relative_position(&self, income: f64) -> Result<f64, SimError> {
        let span = self.max - self.min;
        if span == 0.0 || !span.is_finite() {
            return Err(SimError::DegenerateIncomeBounds {
                min: self.min,
                max: self.max,
            });
        }
        Ok((income - self.min) / span)
    }
}

/// Feedback channel from the population back into agent decisions
///
/// Agents read this record; only the simulation driver writes it, and only
/// between stages.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    /// Social corruption index (q)
    pub q: f64,
    /// Social capital (S)
    pub social_capital: f64,
    /// `None` until the first "corrupt" stage has completed
    pub income_bounds: Option<IncomeBounds>,
    pub total_capital: f64,
}

impl Feedback {
    pub fn initial(config: &ModelConfig) -> Self {
        Self {
            q: config.q_start,
            social_capital: config.initial_social_capital(),
            income_bounds: None,
            total_capital: 0.0,
        }
    }

    /// Store a fresh total capital and the social capital derived from it.
    pub fn set_total_capital(&mut self, total_capital: f64, alpha: f64) {
        self.total_capital = total_capital;
        self.social_capital = alpha * total_capital;
    }
}

/// Hands out agent identifiers in creation order
#[derive(Resource, Debug, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> AgentId {
        let id = AgentId(self.next);
        self.next += 1;
        id
    }

    /// Number of identifiers issued so far
    pub fn issued(&self) -> u64 {
        self.next
    }
}

/// Failure reported by a stage system
///
/// Systems cannot return errors, so they park the first one here for the
/// driver to pick up once the stage has run.
#[derive(Resource, Debug, Default)]
pub struct StageOutcome {
    failure: Option<SimError>,
}

impl StageOutcome {
    pub fn fail(&mut self, err: SimError) {
        if self.failure.is_none() {
            self.failure = Some(err);
        }
    }

    pub fn take(&mut self) -> Option<SimError> {
        self.failure.take()
    }
}
