use corridor_core::{
    Action, CorridorConfig, CorridorModel, Decision, SolveError, StateIndex, TransitionModel,
    check_model, solve, solve_best_effort,
};

#[test]
fn public_solve_matches_reference_corridor() {
    let solution = solve(&CorridorConfig::default()).expect("default corridor converges");

    assert!(solution.converged);
    for state in 0..3 {
        assert_eq!(
            solution.decision(StateIndex::from(state)),
            Some(Decision::Move(Action::MoveRight))
        );
    }
    assert_eq!(solution.decision(StateIndex::from(3)), Some(Decision::Stay));

    let expected = [11.06, 13.99, 17.32, 10.0];
    for (state, value) in expected.iter().enumerate() {
        let actual = solution.value(StateIndex::from(state)).expect("state exists");
        assert!((actual - value).abs() < 0.01, "state {state}: {actual}");
    }
}

#[test]
fn public_solve_is_deterministic() {
    let config = CorridorConfig {
        num_states: 8,
        terminal_state: 5,
        p_move: 0.6,
        ..Default::default()
    };

    let a = solve(&config).expect("converges");
    let b = solve(&config).expect("converges");

    assert_eq!(a.values, b.values);
    assert_eq!(a.policy, b.policy);
    assert_eq!(a.iterations, b.iterations);
}

#[test]
fn public_invalid_configs_are_rejected() {
    let configs = [
        CorridorConfig { gamma: 1.5, ..Default::default() },
        CorridorConfig { p_move: 1.2, ..Default::default() },
        CorridorConfig { terminal_state: 4, ..Default::default() },
    ];

    for config in configs {
        assert!(matches!(solve(&config), Err(SolveError::InvalidConfiguration(_))));
        assert!(matches!(
            solve_best_effort(&config),
            Err(SolveError::InvalidConfiguration(_))
        ));
    }
}

#[test]
fn public_best_effort_keeps_unconverged_values() {
    let config = CorridorConfig {
        max_iterations: 4,
        ..Default::default()
    };

    let values = match solve(&config) {
        Err(SolveError::NonConvergence { values, .. }) => values,
        other => panic!("expected non-convergence, got {other:?}"),
    };

    let relaxed = solve_best_effort(&config).expect("best effort succeeds");
    assert!(!relaxed.converged);
    assert_eq!(relaxed.iterations, 4);
    assert_eq!(relaxed.values, values);
    assert_eq!(relaxed.decision(StateIndex::from(3)), Some(Decision::Stay));
}

#[test]
fn public_model_is_reusable_after_solving() {
    let solution = solve(&CorridorConfig::default()).expect("converges");
    let model = solution.model();

    check_model(&solution.config, &model).expect("corridor model is consistent");
    assert_eq!(
        model.probability(StateIndex::from(0), StateIndex::from(0), Action::MoveLeft),
        1.0
    );
    assert_eq!(model, CorridorModel::new(&solution.config));
}
