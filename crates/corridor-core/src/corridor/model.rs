use crate::corridor::{
    config::CorridorConfig,
    error::SolveError,
    ids::{Action, StateIndex},
};

/// Floating point tolerance used when validating probability sums.
pub const PROB_TOLERANCE: f64 = 1e-9;

/// `T(next | state, action)`: stochastic effect of an action.
pub trait TransitionModel {
    /// Probability of landing in `next` after taking `action` in `state`.
    fn probability(&self, next: StateIndex, state: StateIndex, action: Action) -> f64;
}

/// `R(state, action, next)`: immediate reward of one transition.
pub trait RewardModel {
    /// Reward for moving from `state` to `next` under `action`.
    fn reward(&self, state: StateIndex, action: Action, next: StateIndex) -> f64;
}

/// Transition and reward models of the one-dimensional corridor.
///
/// Holds a copy of the config so the model can outlive the solve and be
/// queried again by a simulator.
#[derive(Debug, Clone, PartialEq)]
pub struct CorridorModel {
    config: CorridorConfig,
}

impl CorridorModel {
    /// Build the corridor models for `config`.
    pub fn new(config: &CorridorConfig) -> Self {
        CorridorModel {
            config: config.clone(),
        }
    }

    /// Borrow the config this model was built from.
    pub fn config(&self) -> &CorridorConfig {
        &self.config
    }

    /// Cell the robot tries to reach. Blocked moves and the goal resolve to `state`.
    pub fn intended_next_state(&self, state: StateIndex, action: Action) -> StateIndex {
        if self.config.is_terminal(state) {
            return state;
        }
        action
            .intended(state, self.config.num_states)
            .unwrap_or(state)
    }
}

impl TransitionModel for CorridorModel {
    fn probability(&self, next: StateIndex, state: StateIndex, action: Action) -> f64 {
        // Goal is absorbing.
        if self.config.is_terminal(state) {
            return if next == state { 1.0 } else { 0.0 };
        }

        let intended = self.intended_next_state(state, action);
        if intended == state {
            // Blocked at a wall: both masses land on `state`.
            return if next == state { 1.0 } else { 0.0 };
        }

        if next == intended {
            self.config.p_move
        } else if next == state {
            1.0 - self.config.p_move
        } else {
            0.0
        }
    }
}

impl RewardModel for CorridorModel {
    fn reward(&self, state: StateIndex, _action: Action, next: StateIndex) -> f64 {
        if self.config.is_terminal(state) {
            return 0.0;
        }
        if self.config.is_terminal(next) {
            self.config.goal_reward + self.config.step_cost
        } else {
            self.config.step_cost
        }
    }
}

/// Verify that every `(state, action)` distribution is a proper distribution.
///
/// This walks the full `states x actions x states` table, so it is kept out of
/// the solve path and run on demand.
pub fn check_model<T>(config: &CorridorConfig, transitions: &T) -> Result<(), SolveError>
where
    T: TransitionModel + ?Sized,
{
    config.validate()?;

    for state in config.states() {
        for action in Action::ALL {
            let mut sum = 0.0_f64;
            let mut out_of_range = false;
            for next in config.states() {
                let p = transitions.probability(next, state, action);
                if !(0.0..=1.0).contains(&p) {
                    out_of_range = true;
                }
                sum += p;
            }

            if out_of_range || (sum - 1.0).abs() > PROB_TOLERANCE {
                return Err(SolveError::ModelInconsistency {
                    state,
                    action,
                    sum,
                    tolerance: PROB_TOLERANCE,
                });
            }
        }
    }

    Ok(())
}
