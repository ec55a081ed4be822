//! Agent Components
//!
//! Components for individual agents: identity, lineage, endowment, conduct.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker component identifying an entity as an agent
#[derive(Component, Debug, Clone, Default)]
pub struct Agent;

/// Unique identifier for an agent
///
/// Issued in creation order, so sorting by id recovers the population order.
#[derive(
    Component, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct AgentId(pub u64);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent_{:06}", self.0)
    }
}

/// Who spawned this agent. Lookup only: the parent may already have exited.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lineage {
    pub parent: Option<AgentId>,
}

impl Lineage {
    pub fn founder() -> Self {
        Self { parent: None }
    }

    pub fn child_of(parent: AgentId) -> Self {
        Self {
            parent: Some(parent),
        }
    }
}

/// Risk aversion (b) and capital (k), fixed at creation
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Endowment {
    risk_aversion: f64,
    capital: f64,
}

impl Endowment {
    pub fn new(risk_aversion: f64, capital: f64) -> Self {
        Self {
            risk_aversion,
            capital,
        }
    }

    pub fn risk_aversion(&self) -> f64 {
        self.risk_aversion
    }

    pub fn capital(&self) -> f64 {
        self.capital
    }
}

/// Choices made in the most recent "corrupt" stage
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Conduct {
    /// Unclamped dishonesty (p)
    pub dishonesty: Option<f64>,
    /// Income (y) drawn after choosing dishonesty
    pub income: Option<f64>,
}

impl Conduct {
    pub fn has_acted(&self) -> bool {
        self.dishonesty.is_some()
    }
}

/// Number of "corrupt" stages this agent has gone through
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationsSurvived(pub u32);

impl GenerationsSurvived {
    /// Whether the agent leaves the population once it has reproduced.
    ///
    /// Founders stay through their first procreate stage and leave after the
    /// second; agents born during the run leave after their first.
    pub fn retires_after_reproducing(&self, lineage: &Lineage) -> bool {
        match lineage.parent {
            None => self.0 >= 2,
            Some(_) => self.0 >= 1,
        }
    }
}

/// Everything a freshly created agent carries
#[derive(Bundle)]
pub struct AgentBundle {
    pub agent: Agent,
    pub id: AgentId,
    pub lineage: Lineage,
    pub endowment: Endowment,
    pub conduct: Conduct,
    pub survived: GenerationsSurvived,
}

impl AgentBundle {
    pub fn new(id: AgentId, lineage: Lineage, endowment: Endowment) -> Self {
        Self {
            agent: Agent,
            id,
            lineage,
            endowment,
            conduct: Conduct::default(),
            survived: GenerationsSurvived::default(),
        }
    }
}
