use tracing::warn;

use crate::corridor::{
    config::CorridorConfig,
    error::SolveError,
    ids::{Decision, StateIndex},
    model::CorridorModel,
    policy::{Policy, extract_policy},
    value_iteration::{ValueFunction, solve_values},
};

/// Everything a caller needs after solving a corridor: values, policy and run stats.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub config: CorridorConfig,
    pub values: ValueFunction,
    pub policy: Policy,
    pub iterations: usize,
    pub final_delta: f64,
    pub converged: bool,
}

impl Solution {
    /// Recommended decision for a cell, `None` if out of range.
    pub fn decision(&self, state: StateIndex) -> Option<Decision> {
        self.policy.decision(state)
    }

    /// Optimal value of a cell, `None` if out of range.
    pub fn value(&self, state: StateIndex) -> Option<f64> {
        self.values.get(state)
    }

    /// The model the solution was computed against.
    pub fn model(&self) -> CorridorModel {
        CorridorModel::new(&self.config)
    }
}

/// Solve the corridor described by `config` and extract its optimal policy.
///
/// Hitting the sweep cap is an error here; see [`solve_best_effort`] to keep
/// the approximate result instead.
pub fn solve(config: &CorridorConfig) -> Result<Solution, SolveError> {
    let model = CorridorModel::new(config);
    let solved = solve_values(config, &model, &model)?;
    let policy = extract_policy(config, &solved.values, &model, &model)?;

    Ok(Solution {
        config: config.clone(),
        values: solved.values,
        policy,
        iterations: solved.iterations,
        final_delta: solved.final_delta,
        converged: true,
    })
}

/// Like [`solve`], but a run that hits the sweep cap still yields a policy
/// extracted from the last values, flagged with `converged == false`.
pub fn solve_best_effort(config: &CorridorConfig) -> Result<Solution, SolveError> {
    match solve(config) {
        Err(SolveError::NonConvergence {
            values,
            delta,
            iterations,
        }) => {
            warn!(iterations, delta, "using unconverged value function");
            let model = CorridorModel::new(config);
            let policy = extract_policy(config, &values, &model, &model)?;
            Ok(Solution {
                config: config.clone(),
                values,
                policy,
                iterations,
                final_delta: delta,
                converged: false,
            })
        }
        other => other,
    }
}
