use crate::corridor::{
    bellman::q_value,
    config::CorridorConfig,
    ids::{Action, StateIndex},
    model::CorridorModel,
};

#[test]
fn backup_matches_hand_computed_value() {
    let config = CorridorConfig::default();
    let model = CorridorModel::new(&config);
    let values = [0.0, 0.0, 0.0, 10.0];

    // 0.8 * (10 - 1 + 0.9 * 10) + 0.2 * (-1 + 0.9 * 0)
    let q = q_value(
        &config,
        &values,
        StateIndex::from(2),
        Action::MoveRight,
        &model,
        &model,
    );
    assert!((q - 14.2).abs() < 1e-12, "got {q}");
}

#[test]
#[should_panic(expected = "value slice does not match the corridor length")]
fn short_value_slice_is_rejected() {
    let config = CorridorConfig::default();
    let model = CorridorModel::new(&config);
    let values = [0.0, 0.0, 0.0];

    q_value(
        &config,
        &values,
        StateIndex::from(2),
        Action::MoveRight,
        &model,
        &model,
    );
}
