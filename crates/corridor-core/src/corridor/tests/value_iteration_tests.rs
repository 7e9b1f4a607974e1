use crate::corridor::{
    config::CorridorConfig,
    error::SolveError,
    ids::{Action, StateIndex},
    model::{CorridorModel, RewardModel, TransitionModel},
    value_iteration::{SweepMetrics, ValueFunction, solve_values, solve_values_with_hook},
};

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() < tolerance,
        "expected {expected} +/- {tolerance}, got {actual}"
    );
}

#[test]
fn default_corridor_reaches_known_fixed_point() {
    let config = CorridorConfig::default();
    let model = CorridorModel::new(&config);

    let solved = solve_values(&config, &model, &model).expect("default corridor converges");
    let values = solved.values.as_slice();

    assert_close(values[0], 11.06, 0.01);
    assert_close(values[1], 13.99, 0.01);
    assert_close(values[2], 17.32, 0.01);
    assert_eq!(values[3], 10.0);
    assert!(solved.final_delta < config.theta);
}

#[test]
fn fixed_point_satisfies_bellman_equation() {
    let config = CorridorConfig::default();
    let model = CorridorModel::new(&config);
    let solved = solve_values(&config, &model, &model).expect("converges");

    // V(2) = 0.8 * (9 + 0.9 * 10) + 0.2 * (-1 + 0.9 * V(2))  =>  V(2) = 14.2 / 0.82
    assert_close(solved.values[StateIndex::from(2)], 14.2 / 0.82, 1e-4);
}

#[test]
fn delta_shrinks_towards_zero() {
    let config = CorridorConfig::default();
    let model = CorridorModel::new(&config);
    let mut sweeps: Vec<SweepMetrics> = Vec::new();

    let solved = solve_values_with_hook(&config, &model, &model, |metrics| sweeps.push(*metrics))
        .expect("converges");

    assert_eq!(sweeps.len(), solved.iterations);
    assert_eq!(sweeps.first().map(|m| m.iteration), Some(1));

    let first = sweeps.first().expect("at least one sweep").delta;
    let last = sweeps.last().expect("at least one sweep").delta;
    assert!(last < config.theta);
    assert!(last < first);

    // Contraction with gamma = 0.9: the tail of the run keeps shrinking.
    let tail = &sweeps[sweeps.len() / 2..];
    for pair in tail.windows(2) {
        assert!(pair[1].delta <= pair[0].delta + 1e-12);
    }
}

#[test]
fn repeated_solves_are_identical() {
    let config = CorridorConfig::default();
    let model = CorridorModel::new(&config);

    let a = solve_values(&config, &model, &model).expect("converges");
    let b = solve_values(&config, &model, &model).expect("converges");

    assert_eq!(a, b);
}

#[test]
fn invalid_config_is_rejected_before_any_sweep() {
    let bad = [
        CorridorConfig { gamma: 1.5, ..Default::default() },
        CorridorConfig { p_move: 1.2, ..Default::default() },
        CorridorConfig { terminal_state: 4, ..Default::default() },
    ];

    for config in bad {
        let model = CorridorModel::new(&config);
        let mut sweeps = 0;
        let err = solve_values_with_hook(&config, &model, &model, |_| sweeps += 1)
            .expect_err("config should be rejected");

        assert!(matches!(err, SolveError::InvalidConfiguration(_)));
        assert_eq!(sweeps, 0);
    }
}

#[test]
fn sweep_cap_reports_non_convergence_with_last_values() {
    let config = CorridorConfig {
        max_iterations: 3,
        ..Default::default()
    };
    let model = CorridorModel::new(&config);

    let err = solve_values(&config, &model, &model).expect_err("three sweeps are not enough");

    match err {
        SolveError::NonConvergence {
            values,
            delta,
            iterations,
        } => {
            assert_eq!(iterations, 3);
            assert_eq!(values.len(), 4);
            assert_eq!(values[StateIndex::from(3)], 10.0);
            assert!(delta >= config.theta);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn undiscounted_corridor_without_progress_never_converges() {
    // Every move fails and nothing is discounted, so values drop by one per sweep forever.
    let config = CorridorConfig {
        gamma: 1.0,
        p_move: 0.0,
        max_iterations: 50,
        ..Default::default()
    };
    let model = CorridorModel::new(&config);

    let err = solve_values(&config, &model, &model).expect_err("must hit the cap");
    assert!(matches!(
        err,
        SolveError::NonConvergence { delta, iterations: 50, .. } if (delta - 1.0).abs() < 1e-12
    ));
}

#[test]
fn undiscounted_corridor_with_absorbing_goal_converges() {
    let config = CorridorConfig {
        gamma: 1.0,
        ..Default::default()
    };
    let model = CorridorModel::new(&config);

    let solved = solve_values(&config, &model, &model).expect("absorbing goal bounds the return");
    // Expected steps from cell 2 under RIGHT is 1 / 0.8; each costs 1 and arrival pays 10 + 10.
    assert_close(solved.values[StateIndex::from(2)], 20.0 - 1.0 / 0.8, 1e-4);
}

#[test]
fn goal_in_the_middle_pulls_both_sides() {
    let config = CorridorConfig {
        num_states: 5,
        terminal_state: 2,
        ..Default::default()
    };
    let model = CorridorModel::new(&config);
    let solved = solve_values(&config, &model, &model).expect("converges");
    let values = solved.values.as_slice();

    assert_close(values[1], values[3], 1e-9);
    assert_close(values[0], values[4], 1e-9);
    assert!(values[1] > values[0]);
}

/// Rewards that depend on the action, to check the solver takes the max.
struct Toll;

impl TransitionModel for Toll {
    fn probability(&self, next: StateIndex, state: StateIndex, _action: Action) -> f64 {
        if next == state { 1.0 } else { 0.0 }
    }
}

impl RewardModel for Toll {
    fn reward(&self, _state: StateIndex, action: Action, _next: StateIndex) -> f64 {
        match action {
            Action::MoveLeft => -3.0,
            Action::MoveRight => -1.0,
        }
    }
}

#[test]
fn solver_takes_the_best_action_per_state() {
    let config = CorridorConfig {
        num_states: 2,
        terminal_state: 1,
        gamma: 0.5,
        theta: 1e-10,
        ..Default::default()
    };

    let solved = solve_values(&config, &Toll, &Toll).expect("converges");
    // V = -1 + 0.5 V  =>  V = -2
    assert_close(solved.values[StateIndex::from(0)], -2.0, 1e-8);
}

#[test]
fn initial_values_pin_the_goal() {
    let config = CorridorConfig {
        num_states: 3,
        terminal_state: 1,
        goal_reward: 4.5,
        ..Default::default()
    };
    assert_eq!(ValueFunction::initial(&config).as_slice(), &[0.0, 4.5, 0.0]);
}
