use crate::corridor::{
    config::CorridorConfig,
    ids::{Action, StateIndex},
    model::{RewardModel, TransitionModel},
};

/// One-step Bellman backup for `(state, action)` against `values`.
///
/// `Q(s,a) = sum over s' of T(s'|s,a) * (R(s,a,s') + gamma * V(s'))`
///
/// # Panics
///
/// Panics if `values` does not hold exactly one entry per state of `config`.
pub fn q_value<T, R>(
    config: &CorridorConfig,
    values: &[f64],
    state: StateIndex,
    action: Action,
    transitions: &T,
    rewards: &R,
) -> f64
where
    T: TransitionModel + ?Sized,
    R: RewardModel + ?Sized,
{
    assert_eq!(
        values.len(),
        config.num_states,
        "value slice does not match the corridor length"
    );

    let mut expected = 0.0;
    for (next, next_value) in config.states().zip(values) {
        let prob = transitions.probability(next, state, action);
        if prob == 0.0 {
            continue;
        }
        let reward = rewards.reward(state, action, next);
        expected += prob * (reward + config.gamma * next_value);
    }
    expected
}
