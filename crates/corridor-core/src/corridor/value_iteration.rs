use std::{mem, ops::Index};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::corridor::{
    bellman::q_value,
    config::CorridorConfig,
    error::SolveError,
    ids::{Action, StateIndex},
    model::{RewardModel, TransitionModel},
};

/// State-value estimate, one entry per corridor cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueFunction(Vec<f64>);

impl ValueFunction {
    /// Starting estimate: zero everywhere, goal pinned to `goal_reward`.
    pub fn initial(config: &CorridorConfig) -> Self {
        let mut values = vec![0.0; config.num_states];
        if let Some(goal) = values.get_mut(config.terminal_state) {
            *goal = config.goal_reward;
        }
        ValueFunction(values)
    }

    /// Value of one cell, `None` if out of range.
    pub fn get(&self, state: StateIndex) -> Option<f64> {
        self.0.get(state.index()).copied()
    }

    /// Borrow the raw values in cell order.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Number of cells covered.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(cell, value)` pairs in cell order.
    pub fn iter(&self) -> impl Iterator<Item = (StateIndex, f64)> + '_ {
        self.0
            .iter()
            .enumerate()
            .map(|(idx, value)| (StateIndex::from(idx), *value))
    }
}

impl From<Vec<f64>> for ValueFunction {
    fn from(values: Vec<f64>) -> Self {
        ValueFunction(values)
    }
}

impl Index<StateIndex> for ValueFunction {
    type Output = f64;

    fn index(&self, state: StateIndex) -> &f64 {
        &self.0[state.index()]
    }
}

/// Metrics emitted after each completed sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepMetrics {
    /// 1-based sweep number.
    pub iteration: usize,
    /// Max absolute value change over non-terminal cells in this sweep.
    pub delta: f64,
}

/// Converged output of value iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueSolution {
    pub values: ValueFunction,
    pub iterations: usize,
    pub final_delta: f64,
}

/// Run value iteration until the max per-sweep change drops below `theta`.
pub fn solve_values<T, R>(
    config: &CorridorConfig,
    transitions: &T,
    rewards: &R,
) -> Result<ValueSolution, SolveError>
where
    T: TransitionModel + ?Sized,
    R: RewardModel + ?Sized,
{
    solve_values_with_hook(config, transitions, rewards, |_| {})
}

/// Run value iteration and invoke a callback after each completed sweep.
///
/// Sweeps are synchronous: every backup reads the previous sweep's values and
/// writes into a second buffer, and the buffers swap once the sweep is done.
pub fn solve_values_with_hook<T, R, FHook>(
    config: &CorridorConfig,
    transitions: &T,
    rewards: &R,
    mut on_sweep: FHook,
) -> Result<ValueSolution, SolveError>
where
    T: TransitionModel + ?Sized,
    R: RewardModel + ?Sized,
    FHook: FnMut(&SweepMetrics),
{
    config.validate()?;

    let mut current = ValueFunction::initial(config).0;
    let mut next = current.clone();
    let mut delta = f64::INFINITY;

    for iteration in 1..=config.max_iterations {
        delta = 0.0;

        for state in config.non_terminal_states() {
            let best = Action::ALL
                .iter()
                .map(|action| q_value(config, &current, state, *action, transitions, rewards))
                .fold(f64::NEG_INFINITY, f64::max);

            let idx = state.index();
            next[idx] = best;
            delta = delta.max((best - current[idx]).abs());
        }

        mem::swap(&mut current, &mut next);

        let metrics = SweepMetrics { iteration, delta };
        debug!(iteration, delta, "value iteration sweep");
        on_sweep(&metrics);

        if delta < config.theta {
            info!(iterations = iteration, delta, "value iteration converged");
            return Ok(ValueSolution {
                values: ValueFunction(current),
                iterations: iteration,
                final_delta: delta,
            });
        }
    }

    warn!(
        iterations = config.max_iterations,
        delta, "value iteration hit the sweep cap"
    );
    Err(SolveError::NonConvergence {
        values: ValueFunction(current),
        delta,
        iterations: config.max_iterations,
    })
}
