//! Aggregate Statistics
//!
//! Population-level quantities that feed back into agent decisions. All of
//! them are recomputed from an enumeration of the live population in
//! creation order; nothing is cached across population changes.

use corruption_events::AgentSnapshot;

use crate::components::model::IncomeBounds;
use crate::error::SimError;

/// Σ k
pub fn total_capital(agents: &[AgentSnapshot]) -> f64 {
    agents.iter().map(|a| a.capital).sum()
}

/// Capital-weighted mean dishonesty: Σ(k p) / Σ k
pub fn corruption_index(agents: &[AgentSnapshot]) -> Result<f64, SimError> {
    let total = total_capital(agents);
    if total == 0.0 {
        return Err(SimError::ZeroTotalCapital {
            total_capital: total,
        });
    }

    let mut weighted = 0.0;
    for agent in agents {
        let dishonesty = agent.dishonesty.ok_or(SimError::NoDecision {
            agent_id: agent.agent_id,
        })?;
        weighted += agent.capital * dishonesty;
    }
    Ok(weighted / total)
}

/// Lowest and highest income in the population
pub fn income_bounds(agents: &[AgentSnapshot]) -> Result<IncomeBounds, SimError> {
    let mut bounds: Option<IncomeBounds> = None;
    for agent in agents {
        let income = agent.income.ok_or(SimError::NoDecision {
            agent_id: agent.agent_id,
        })?;
        bounds = Some(match bounds {
            None => IncomeBounds {
                min: income,
                max: income,
            },
            Some(b) => IncomeBounds {
                min: b.min.min(income),
                max: b.max.max(income),
            },
        });
    }
    bounds.ok_or(SimError::EmptyPopulation)
}

/// S = alpha · total capital
pub fn social_capital(alpha: f64, total_capital: f64) -> f64 {
    alpha * total_capital
}

/// Σ y
pub fn national_income(agents: &[AgentSnapshot]) -> Result<f64, SimError> {
    agents
        .iter()
        .map(|a| {
            a.income.ok_or(SimError::NoDecision {
                agent_id: a.agent_id,
            })
        })
        .sum()
}
