use corridor_core::{ConfigError, StateIndex};
use thiserror::Error;

#[derive(Debug, Error)]
/// Error type for simulating episodes and writing reports.
pub enum SimError {
    #[error("state {state} is outside a corridor of {num_states} cells")]
    StateOutOfRange { state: StateIndex, num_states: usize },

    #[error("episode already finished at goal state {state}")]
    EpisodeFinished { state: StateIndex },

    #[error("policy has no move for non-terminal state {state}")]
    MissingDecision { state: StateIndex },

    #[error("corridor has no non-terminal state to start from")]
    NoStartState,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize report as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to serialize report as JSON: {0}")]
    Json(#[from] serde_json::Error),
}
