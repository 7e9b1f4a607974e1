use serde::{Deserialize, Serialize};

use crate::corridor::{
    bellman::q_value,
    config::{CorridorConfig, InvalidConfiguration},
    error::SolveError,
    ids::{Action, Decision, StateIndex},
    model::{RewardModel, TransitionModel},
    value_iteration::ValueFunction,
};

/// Q-values closer than this are treated as a tie.
pub const TIE_EPSILON: f64 = 1e-9;

/// Greedy policy: one decision per corridor cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Policy(Vec<Decision>);

impl Policy {
    /// Recommended decision for a cell, `None` if out of range.
    pub fn decision(&self, state: StateIndex) -> Option<Decision> {
        self.0.get(state.index()).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StateIndex, Decision)> + '_ {
        self.0
            .iter()
            .enumerate()
            .map(|(idx, decision)| (StateIndex::from(idx), *decision))
    }
}

/// Derive the greedy policy from a converged value function.
///
/// Ties go to the action that comes first in [`Action::ALL`]: a later action
/// only wins if its Q-value beats the current best by more than [`TIE_EPSILON`].
/// The goal cell maps to [`Decision::Stay`].
pub fn extract_policy<T, R>(
    config: &CorridorConfig,
    values: &ValueFunction,
    transitions: &T,
    rewards: &R,
) -> Result<Policy, SolveError>
where
    T: TransitionModel + ?Sized,
    R: RewardModel + ?Sized,
{
    config.validate()?;
    if values.len() != config.num_states {
        return Err(InvalidConfiguration::new(
            "num_states",
            format!(
                "value function has {} entries, expected {}",
                values.len(),
                config.num_states
            ),
        )
        .into());
    }

    let decisions = config
        .states()
        .map(|state| {
            if config.is_terminal(state) {
                return Decision::Stay;
            }

            let mut best: Option<(Action, f64)> = None;
            for action in Action::ALL {
                let q = q_value(
                    config,
                    values.as_slice(),
                    state,
                    action,
                    transitions,
                    rewards,
                );
                best = match best {
                    Some((_, best_q)) if q <= best_q + TIE_EPSILON => best,
                    _ => Some((action, q)),
                };
            }

            best.map_or(Decision::Stay, |(action, _)| Decision::Move(action))
        })
        .collect();

    Ok(Policy(decisions))
}
