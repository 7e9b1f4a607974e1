use std::fmt;

use serde::{Deserialize, Serialize};

/// A wrapper for a cell index along the corridor.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateIndex(usize);

impl StateIndex {
    /// Get the underlying cell index.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for StateIndex {
    fn from(value: usize) -> Self {
        StateIndex(value)
    }
}

impl fmt::Display for StateIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Movement intents available in every non-terminal cell.
///
/// The declaration order is the tie-break order used by policy extraction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    MoveLeft,
    MoveRight,
}

impl Action {
    /// All actions in their fixed order.
    pub const ALL: [Action; 2] = [Action::MoveLeft, Action::MoveRight];

    /// Position of this action in [`Action::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Action::MoveLeft => 0,
            Action::MoveRight => 1,
        }
    }

    /// Cell the robot tries to reach, or `None` if the move would leave `[0, num_states)`.
    pub fn intended(&self, state: StateIndex, num_states: usize) -> Option<StateIndex> {
        let next = match self {
            Action::MoveLeft => state.index().checked_sub(1)?,
            Action::MoveRight => state.index().checked_add(1)?,
        };
        (next < num_states).then_some(StateIndex(next))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::MoveLeft => write!(f, "LEFT"),
            Action::MoveRight => write!(f, "RIGHT"),
        }
    }
}

/// One policy entry: move in a direction, or stay put on the goal.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Move(Action),
    Stay,
}

impl Decision {
    /// The movement action, if any.
    pub fn action(&self) -> Option<Action> {
        match self {
            Decision::Move(action) => Some(*action),
            Decision::Stay => None,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Move(action) => fmt::Display::fmt(action, f),
            Decision::Stay => write!(f, "STAY"),
        }
    }
}
