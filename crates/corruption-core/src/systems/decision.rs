//! Agent Decision Model
//!
//! Closed-form rules for an agent's endowment, dishonesty choice and income.
//! Every function reads model state by reference and takes the random source
//! explicitly; none of them touch the ECS world.

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::components::agent::{AgentId, Endowment};
use crate::components::model::Feedback;
use crate::config::ModelConfig;
use crate::error::SimError;

/// Outcome of one "corrupt" stage for one agent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub dishonesty: f64,
    pub income: f64,
}

/// Risk aversion drawn from U(b_bar - b_range/2, b_bar + b_range/2)
pub fn draw_risk_aversion<R: Rng + ?Sized>(config: &ModelConfig, rng: &mut R) -> f64 {
    rng.gen_range(config.b_min()..=config.b_max())
}

/// First-generation capital drawn from U(k_min, k_max)
pub fn draw_initial_capital<R: Rng + ?Sized>(config: &ModelConfig, rng: &mut R) -> f64 {
    rng.gen_range(config.k_min()..=config.k_max())
}

/// Capital of an offspring.
///
/// Convex combination with weight `theta` of the parent's income rank mapped
/// onto [k_min, k_max] and a fresh uniform draw over the same interval. The
/// inherited part needs the income bounds of the last "corrupt" stage; the
/// random part is only drawn when it carries weight.
pub fn inherited_capital<R: Rng + ?Sized>(
    parent: AgentId,
    parent_income: f64,
    config: &ModelConfig,
    feedback: &Feedback,
    rng: &mut R,
) -> Result<f64, SimError> {
    let (k_min, k_max) = (config.k_min(), config.k_max());
    let theta = config.theta;

    let inherited = if theta < 1.0 {
        let bounds = feedback
            .income_bounds
            .ok_or(SimError::MissingIncomeBounds { parent_id: parent.0 })?;
        k_min + bounds.relative_position(parent_income)? * (k_max - k_min)
    } else {
        0.0
    };
    let random = if theta > 0.0 {
        rng.gen_range(k_min..=k_max)
    } else {
        0.0
    };

    Ok((1.0 - theta) * inherited + theta * random)
}

/// Dishonesty maximising expected utility: 1 / (2 b gamma^2 (1 - q) S).
///
/// The value is not clamped to [0, 1].
pub fn choose_dishonesty(
    agent: AgentId,
    risk_aversion: f64,
    gamma: f64,
    feedback: &Feedback,
) -> Result<f64, SimError> {
    let denominator =
        2.0 * risk_aversion * gamma.powi(2) * (1.0 - feedback.q) * feedback.social_capital;
    let dishonesty = 1.0 / denominator;

    if denominator == 0.0 || !dishonesty.is_finite() {
        return Err(SimError::SingularDishonesty {
            agent_id: agent.0,
            risk_aversion,
            gamma,
            q: feedback.q,
            social_capital: feedback.social_capital,
            denominator,
        });
    }
    Ok(dishonesty)
}

/// Income for the stage: legitimate share plus a noisy corrupt yield.
///
/// y = (1 - p)(1 - q) S k + p N(S k, (1 - q) gamma S k)
pub fn earn_income<R: Rng + ?Sized>(
    agent: AgentId,
    dishonesty: f64,
    capital: f64,
    gamma: f64,
    feedback: &Feedback,
    rng: &mut R,
) -> Result<f64, SimError> {
    let q = feedback.q;
    let yield_mean = feedback.social_capital * capital;
    let std_dev = (1.0 - q) * gamma * yield_mean;

    if !std_dev.is_finite() || std_dev < 0.0 {
        return Err(SimError::InvalidIncomeSpread {
            agent_id: agent.0,
            std_dev,
        });
    }
    let corrupt_yield = Normal::new(yield_mean, std_dev)
        .map_err(|_| SimError::InvalidIncomeSpread {
            agent_id: agent.0,
            std_dev,
        })?
        .sample(rng);

    Ok((1.0 - dishonesty) * (1.0 - q) * yield_mean + dishonesty * corrupt_yield)
}

/// Body of the "corrupt" stage for one agent: choose, then earn.
pub fn advance_generation<R: Rng + ?Sized>(
    agent: AgentId,
    endowment: &Endowment,
    config: &ModelConfig,
    feedback: &Feedback,
    rng: &mut R,
) -> Result<Decision, SimError> {
    let dishonesty = choose_dishonesty(agent, endowment.risk_aversion(), config.gamma, feedback)?;
    let income = earn_income(
        agent,
        dishonesty,
        endowment.capital(),
        config.gamma,
        feedback,
        rng,
    )?;
    Ok(Decision { dishonesty, income })
}
