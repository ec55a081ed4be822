//! Configuration System
//!
//! Loads model parameters from a TOML file so runs can be adjusted without
//! recompiling. Missing keys fall back to the reference parameterisation.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

/// Default config file path
pub const DEFAULT_CONFIG_PATH: &str = "corruption.toml";

/// Top-level configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub run: RunConfig,
}

/// Parameters of the corruption model, fixed for the whole run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Mean risk aversion (b)
    pub b_bar: f64,
    /// Width of the uniform risk aversion draw
    pub b_range: f64,
    /// Fraction of total capital that becomes social capital (S)
    pub alpha: f64,
    /// Proportion of income spent on vigilance
    pub gamma: f64,
    /// Weight of the random draw in inherited capital (0 = meritocratic)
    pub theta: f64,
    /// Social corruption index before the first generation
    pub q_start: f64,
    pub population: usize,
    /// Mean capital endowment of the first generation
    pub k_bar: f64,
    /// Width of the uniform capital endowment draw
    pub k_range: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            b_bar: 3.0,
            b_range: 1.0,
            alpha: 0.5,
            gamma: 0.5,
            theta: 0.1,
            q_start: 0.1,
            population: 1000,
            k_bar: 0.5,
            k_range: 1.0,
        }
    }
}

impl ModelConfig {
    /// Check parameter plausibility before any agent is created.
    ///
    /// Zero `alpha`, `gamma` or `b` are accepted here; they surface as a
    /// singular dishonesty choice in the generation where they bite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let reals = [
            ("b_bar", self.b_bar),
            ("b_range", self.b_range),
            ("alpha", self.alpha),
            ("gamma", self.gamma),
            ("theta", self.theta),
            ("q_start", self.q_start),
            ("k_bar", self.k_bar),
            ("k_range", self.k_range),
        ];
        for (field, value) in reals {
            if !value.is_finite() {
                return Err(ConfigError::invalid(field, format!("must be finite, got {value}")));
            }
        }

        if self.b_range < 0.0 {
            return Err(ConfigError::invalid(
                "b_range",
                format!("must be non-negative, got {}", self.b_range),
            ));
        }
        if self.k_range < 0.0 {
            return Err(ConfigError::invalid(
                "k_range",
                format!("must be non-negative, got {}", self.k_range),
            ));
        }
        if self.k_min() < 0.0 {
            return Err(ConfigError::invalid(
                "k_bar",
                format!(
                    "k_bar - k_range / 2 must be non-negative, got {}",
                    self.k_min()
                ),
            ));
        }
        if !(0.0..=1.0).contains(&self.theta) {
            return Err(ConfigError::invalid(
                "theta",
                format!("must lie in [0, 1], got {}", self.theta),
            ));
        }
        if self.population == 0 {
            return Err(ConfigError::invalid("population", "must be positive"));
        }

        Ok(())
    }

    pub fn b_min(&self) -> f64 {
        self.b_bar - 0.5 * self.b_range
    }

    pub fn b_max(&self) -> f64 {
        self.b_bar + 0.5 * self.b_range
    }

    pub fn k_min(&self) -> f64 {
        self.k_bar - 0.5 * self.k_range
    }

    pub fn k_max(&self) -> f64 {
        self.k_bar + 0.5 * self.k_range
    }

    /// S before any capital has been observed: alpha times the expected total capital.
    pub fn initial_social_capital(&self) -> f64 {
        self.alpha * self.k_bar * self.population as f64
    }
}

/// Driver settings for the command line binary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub seed: u64,
    pub generations: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            generations: 100,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.model.validate()?;
        Ok(config)
    }

    /// Load configuration from default path, or use defaults if not found
    pub fn load_or_default() -> Self {
        if !Path::new(DEFAULT_CONFIG_PATH).exists() {
            return Self::default();
        }
        Self::load(DEFAULT_CONFIG_PATH).unwrap_or_else(|e| {
            tracing::warn!("Could not load {}: {}. Using defaults.", DEFAULT_CONFIG_PATH, e);
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.model.population, 1000);
        assert_eq!(config.model.b_bar, 3.0);
        assert_eq!(config.run.seed, 42);
        assert!(config.model.validate().is_ok());
    }

    #[test]
    fn test_derived_bounds() {
        let model = ModelConfig::default();
        assert_eq!(model.k_min(), 0.0);
        assert_eq!(model.k_max(), 1.0);
        assert_eq!(model.b_min(), 2.5);
        assert_eq!(model.b_max(), 3.5);
        assert_eq!(model.initial_social_capital(), 250.0);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = Config::from_toml_str(
            r#"
            [model]
            population = 10
            theta = 0.0

            [run]
            generations = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.model.population, 10);
        assert_eq!(config.model.theta, 0.0);
        assert_eq!(config.model.gamma, 0.5);
        assert_eq!(config.run.generations, 5);
        assert_eq!(config.run.seed, 42);
    }

    #[test]
    fn test_rejects_negative_range() {
        let model = ModelConfig {
            k_range: -0.5,
            ..ModelConfig::default()
        };
        assert!(matches!(
            model.validate(),
            Err(ConfigError::InvalidParameter { field: "k_range", .. })
        ));

        let model = ModelConfig {
            b_range: -1.0,
            ..ModelConfig::default()
        };
        assert!(matches!(
            model.validate(),
            Err(ConfigError::InvalidParameter { field: "b_range", .. })
        ));
    }

    #[test]
    fn test_rejects_negative_capital_bound() {
        let model = ModelConfig {
            k_bar: 0.1,
            k_range: 1.0,
            ..ModelConfig::default()
        };
        assert!(model.k_min() < 0.0);
        assert!(matches!(
            model.validate(),
            Err(ConfigError::InvalidParameter { field: "k_bar", .. })
        ));

        // a lower bound of exactly zero is allowed
        let model = ModelConfig {
            k_bar: 0.5,
            k_range: 1.0,
            ..ModelConfig::default()
        };
        assert!(model.validate().is_ok());
    }

    #[test]
    fn test_toml_with_negative_capital_bound_is_rejected() {
        let err = Config::from_toml_str("[model]\nk_bar = 0.2\nk_range = 2.0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidParameter { field: "k_bar", .. }
        ));
    }

    #[test]
    fn test_rejects_zero_population() {
        let model = ModelConfig {
            population: 0,
            ..ModelConfig::default()
        };
        assert!(matches!(
            model.validate(),
            Err(ConfigError::InvalidParameter { field: "population", .. })
        ));
    }

    #[test]
    fn test_rejects_theta_outside_unit_interval() {
        let model = ModelConfig {
            theta: 1.5,
            ..ModelConfig::default()
        };
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_rejects_non_finite() {
        let model = ModelConfig {
            gamma: f64::NAN,
            ..ModelConfig::default()
        };
        assert!(matches!(
            model.validate(),
            Err(ConfigError::InvalidParameter { field: "gamma", .. })
        ));
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = Config::from_toml_str("[model]\npopulation = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[model]\nk_bar = 2.0\nk_range = 1.0").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.model.k_min(), 1.5);
        assert_eq!(config.model.k_max(), 2.5);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = Config::load("does/not/exist.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
