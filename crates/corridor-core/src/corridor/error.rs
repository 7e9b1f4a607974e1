use thiserror::Error;

use crate::corridor::{
    config::InvalidConfiguration,
    ids::{Action, StateIndex},
    value_iteration::ValueFunction,
};

/// Error type for solving a corridor MDP and checking its models.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    /// Parameters rejected before any sweep ran.
    #[error(transparent)]
    InvalidConfiguration(#[from] InvalidConfiguration),

    /// The sweep cap was hit before the max value change dropped below `theta`.
    /// Carries the last value function so callers can still use it.
    #[error("value iteration did not converge after {iterations} sweeps (last delta {delta})")]
    NonConvergence {
        values: ValueFunction,
        delta: f64,
        iterations: usize,
    },

    /// A transition distribution does not sum to 1 or holds an out-of-range mass.
    #[error(
        "transition distribution for state {state}, action {action} is inconsistent: sum {sum} (tolerance {tolerance})"
    )]
    ModelInconsistency {
        state: StateIndex,
        action: Action,
        sum: f64,
        tolerance: f64,
    },
}
