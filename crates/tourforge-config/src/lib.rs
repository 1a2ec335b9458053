//! Configuration system for TourForge.
//!
//! Load solver configuration from TOML or YAML files to control the safety
//! bounds of the cutting-plane loop, the numeric tolerance, and the arc
//! tie-break policy without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use tourforge_config::{SolverConfig, TieBreak};
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     tie_break = "strict"
//!
//!     [termination]
//!     iteration_limit = 250
//!     seconds_spent_limit = 30
//! "#).unwrap();
//!
//! assert_eq!(config.iteration_limit(), 250);
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! assert_eq!(config.tie_break, TieBreak::Strict);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use tourforge_config::SolverConfig;
//!
//! let config = SolverConfig::load("solver.toml").unwrap_or_default();
//! assert_eq!(config.iteration_limit(), tourforge_config::DEFAULT_ITERATION_LIMIT);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tourforge_core::{TourForgeError, INTEGRALITY_TOLERANCE};

/// Iteration bound applied when the configuration names none.
pub const DEFAULT_ITERATION_LIMIT: u64 = 1000;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for TourForgeError {
    fn from(err: ConfigError) -> Self {
        TourForgeError::Config(err.to_string())
    }
}

/// Main solver configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Environment mode affecting runtime assertions.
    #[serde(default)]
    pub environment_mode: EnvironmentMode,

    /// Integrality tolerance shared by result interpretation and arc selection.
    #[serde(default)]
    pub tolerance: Option<f64>,

    /// Rule for nodes with more than one selected outgoing arc.
    #[serde(default)]
    pub tie_break: TieBreak,

    /// Termination configuration.
    #[serde(default)]
    pub termination: Option<TerminationConfig>,
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or holds
    /// out-of-range values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(tol) = self.tolerance {
            if !(tol > 0.0 && tol < 0.5) {
                return Err(ConfigError::Invalid(format!(
                    "tolerance must lie in (0, 0.5), got {}",
                    tol
                )));
            }
        }
        if let Some(0) = self.termination.as_ref().and_then(|t| t.iteration_limit) {
            return Err(ConfigError::Invalid(
                "iteration_limit must be at least 1".to_string(),
            ));
        }
        if let Some(t) = &self.termination {
            if t.total_seconds().is_none() {
                return Err(ConfigError::Invalid(
                    "time limit in seconds overflows u64".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Sets the iteration bound.
    pub fn with_iteration_limit(mut self, limit: u64) -> Self {
        self.termination = Some(TerminationConfig {
            iteration_limit: Some(limit),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the termination time limit.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination = Some(TerminationConfig {
            seconds_spent_limit: Some(seconds),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the integrality tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    /// Sets the tie-break policy.
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Sets the environment mode.
    pub fn with_environment_mode(mut self, mode: EnvironmentMode) -> Self {
        self.environment_mode = mode;
        self
    }

    /// Returns the effective integrality tolerance.
    pub fn tolerance(&self) -> f64 {
        self.tolerance.unwrap_or(INTEGRALITY_TOLERANCE)
    }

    /// Returns the effective iteration bound.
    pub fn iteration_limit(&self) -> u64 {
        self.termination
            .as_ref()
            .and_then(|t| t.iteration_limit)
            .unwrap_or(DEFAULT_ITERATION_LIMIT)
    }

    /// Returns the termination time limit, if configured.
    ///
    /// Convenience method that delegates to `termination.time_limit()`.
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.as_ref().and_then(|t| t.time_limit())
    }
}

/// Environment mode affecting solver behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentMode {
    /// No runtime assertions beyond cycle detection.
    #[default]
    NonIntrusive,

    /// Check every oracle solution for integral arc values and against every
    /// constraint in the model, cuts included.
    FullAssert,
}

impl EnvironmentMode {
    pub fn is_asserted(&self) -> bool {
        matches!(self, EnvironmentMode::FullAssert)
    }
}

/// Rule applied when a node has more than one outgoing arc at or above the
/// selection threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Follow the arc with the lowest destination index.
    #[default]
    LowestIndex,

    /// Reject the solution as a detection anomaly.
    Strict,
}

/// Termination configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum number of cutting rounds.
    pub iteration_limit: Option<u64>,

    /// Maximum seconds to spend solving.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum minutes to spend solving.
    pub minutes_spent_limit: Option<u64>,
}

impl TerminationConfig {
    /// Combined seconds and minutes limit, or `None` when it overflows.
    pub fn total_seconds(&self) -> Option<u64> {
        self.minutes_spent_limit
            .unwrap_or(0)
            .checked_mul(60)?
            .checked_add(self.seconds_spent_limit.unwrap_or(0))
    }

    /// Returns the time limit as a Duration, if any.
    ///
    /// A total that overflows saturates to `u64::MAX` seconds.
    pub fn time_limit(&self) -> Option<Duration> {
        let seconds = self.total_seconds().unwrap_or(u64::MAX);
        if seconds > 0 {
            Some(Duration::from_secs(seconds))
        } else {
            None
        }
    }
}
