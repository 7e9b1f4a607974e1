use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::corridor::ids::StateIndex;

const DEFAULT_CORRIDOR_CONFIG_YAML: &str = include_str!("../../config/corridor.default.yaml");

/// Parameters of one corridor MDP and of the solver run over it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorridorConfig {
    /// Number of cells; states are `0..num_states`.
    pub num_states: usize,
    /// Index of the absorbing goal cell.
    pub terminal_state: usize,
    /// Discount factor in `(0, 1]`.
    pub gamma: f64,
    /// Probability that a non-blocked move succeeds.
    pub p_move: f64,
    /// Reward added to every transition out of a non-terminal cell.
    pub step_cost: f64,
    /// Bonus for arriving at the goal; also the pinned value of the goal cell.
    pub goal_reward: f64,
    /// Convergence threshold on the max per-sweep value change.
    pub theta: f64,
    /// Sweep cap before giving up with a non-convergence error.
    pub max_iterations: usize,
}

impl Default for CorridorConfig {
    fn default() -> Self {
        CorridorConfig {
            num_states: 4,
            terminal_state: 3,
            gamma: 0.9,
            p_move: 0.8,
            step_cost: -1.0,
            goal_reward: 10.0,
            theta: 1e-6,
            max_iterations: 1000,
        }
    }
}

impl CorridorConfig {
    /// Parse and validate a corridor config from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config = Self::parse_yaml_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a corridor config from a YAML file path.
    pub fn from_yaml_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::parse_yaml_path(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse YAML text without validating it.
    ///
    /// Callers that patch fields afterwards must call [`Self::validate`] themselves.
    pub fn parse_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read and parse a YAML file without validating it.
    pub fn parse_yaml_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let yaml = fs::read_to_string(path)?;
        Self::parse_yaml_str(&yaml)
    }

    /// Return the default YAML config included with this crate.
    pub fn default_yaml() -> &'static str {
        DEFAULT_CORRIDOR_CONFIG_YAML
    }

    /// Parse the default YAML config included with this crate.
    pub fn from_default_yaml() -> Result<Self, ConfigError> {
        Self::from_yaml_str(Self::default_yaml())
    }

    /// Return the goal cell.
    pub fn terminal(&self) -> StateIndex {
        StateIndex::from(self.terminal_state)
    }

    /// Check whether a cell is the goal.
    pub fn is_terminal(&self, state: StateIndex) -> bool {
        state.index() == self.terminal_state
    }

    /// Iterate over every cell in corridor order.
    pub fn states(&self) -> impl Iterator<Item = StateIndex> + use<> {
        (0..self.num_states).map(StateIndex::from)
    }

    /// Iterate over every cell except the goal.
    pub fn non_terminal_states(&self) -> impl Iterator<Item = StateIndex> + use<> {
        let terminal = self.terminal_state;
        (0..self.num_states)
            .filter(move |s| *s != terminal)
            .map(StateIndex::from)
    }

    /// Reject parameters the solver cannot work with.
    pub fn validate(&self) -> Result<(), InvalidConfiguration> {
        if self.num_states <= 1 {
            return Err(InvalidConfiguration::new(
                "num_states",
                format!("must be greater than 1, got {}", self.num_states),
            ));
        }
        if self.terminal_state >= self.num_states {
            return Err(InvalidConfiguration::new(
                "terminal_state",
                format!(
                    "must be below num_states ({}), got {}",
                    self.num_states, self.terminal_state
                ),
            ));
        }
        if !self.gamma.is_finite() || self.gamma <= 0.0 || self.gamma > 1.0 {
            return Err(InvalidConfiguration::new(
                "gamma",
                format!("must be in (0, 1], got {}", self.gamma),
            ));
        }
        if !(0.0..=1.0).contains(&self.p_move) {
            return Err(InvalidConfiguration::new(
                "p_move",
                format!("must be in [0, 1], got {}", self.p_move),
            ));
        }
        if !self.step_cost.is_finite() {
            return Err(InvalidConfiguration::new(
                "step_cost",
                format!("must be finite, got {}", self.step_cost),
            ));
        }
        if !self.goal_reward.is_finite() {
            return Err(InvalidConfiguration::new(
                "goal_reward",
                format!("must be finite, got {}", self.goal_reward),
            ));
        }
        if !self.theta.is_finite() || self.theta <= 0.0 {
            return Err(InvalidConfiguration::new(
                "theta",
                format!("must be finite and > 0, got {}", self.theta),
            ));
        }
        if self.max_iterations == 0 {
            return Err(InvalidConfiguration::new(
                "max_iterations",
                "must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// A parameter that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid corridor config: {field} {reason}")]
pub struct InvalidConfiguration {
    pub field: &'static str,
    pub reason: String,
}

impl InvalidConfiguration {
    pub(crate) fn new(field: &'static str, reason: String) -> Self {
        InvalidConfiguration { field, reason }
    }
}

/// Error type for loading and validating `CorridorConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Invalid(#[from] InvalidConfiguration),
}
