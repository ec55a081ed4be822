//! Error types for the corruption engine.
//!
//! Every failure is deterministic given the inputs, so nothing here is
//! retried or defaulted: a failing generation aborts the run.

use thiserror::Error;

/// Errors raised while loading or validating a model configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid parameter `{field}`: {reason}")]
    InvalidParameter { field: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors raised while stepping the simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(
        "dishonesty undefined for agent {agent_id}: 2 * b * gamma^2 * (1 - q) * S = \
         2 * {risk_aversion} * {gamma}^2 * (1 - {q}) * {social_capital} = {denominator}"
    )]
    SingularDishonesty {
        agent_id: u64,
        risk_aversion: f64,
        gamma: f64,
        q: f64,
        social_capital: f64,
        denominator: f64,
    },

    #[error("corrupt income for agent {agent_id} has invalid spread {std_dev}")]
    InvalidIncomeSpread { agent_id: u64, std_dev: f64 },

    #[error("corruption index undefined: total capital is {total_capital}")]
    ZeroTotalCapital { total_capital: f64 },

    #[error("inherited capital undefined: income bounds are degenerate ({min}, {max})")]
    DegenerateIncomeBounds { min: f64, max: f64 },

    #[error("offspring of agent {parent_id} spawned before any income bounds were observed")]
    MissingIncomeBounds { parent_id: u64 },

    #[error("agent {agent_id} has not chosen a dishonesty level yet")]
    NoDecision { agent_id: u64 },

    #[error("population is empty")]
    EmptyPopulation,

    #[error("simulation halted after a failed generation {generation}")]
    Halted { generation: u64 },
}

impl From<ConfigError> for SimError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_message() {
        let err = ConfigError::invalid("k_range", "must be non-negative, got -1");
        assert_eq!(
            err.to_string(),
            "invalid parameter `k_range`: must be non-negative, got -1"
        );
    }

    #[test]
    fn test_config_error_converts() {
        let err: SimError = ConfigError::invalid("population", "must be positive").into();
        assert!(matches!(err, SimError::Config(msg) if msg.contains("population")));
    }
}
