use corridor_core::{Action, Decision, Policy, RewardModel, StateIndex};
use rand::RngCore;
use serde::Serialize;
use tracing::{debug, info};

use crate::{CorridorSimulator, SimError};

/// One simulated move.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StepRecord {
    pub from: StateIndex,
    pub action: Action,
    pub to: StateIndex,
    pub reward: f64,
    pub reached_goal: bool,
}

/// Outcome of a full episode run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpisodeSummary {
    pub start: StateIndex,
    pub steps: usize,
    pub total_reward: f64,
    pub reached_goal: bool,
    pub trace: Vec<StepRecord>,
}

/// Robot position plus running step and reward counters for one episode.
#[derive(Debug, Clone, PartialEq)]
pub struct Episode {
    start: StateIndex,
    position: StateIndex,
    steps: usize,
    total_reward: f64,
}

impl Episode {
    /// Start an episode at `start`.
    pub fn new<R: RngCore>(
        simulator: &CorridorSimulator<R>,
        start: StateIndex,
    ) -> Result<Self, SimError> {
        let num_states = simulator.config().num_states;
        if start.index() >= num_states {
            return Err(SimError::StateOutOfRange {
                state: start,
                num_states,
            });
        }
        Ok(Episode {
            start,
            position: start,
            steps: 0,
            total_reward: 0.0,
        })
    }

    /// Start an episode at a random non-terminal cell.
    pub fn random<R: RngCore>(simulator: &mut CorridorSimulator<R>) -> Result<Self, SimError> {
        let start = simulator.random_start()?;
        Self::new(simulator, start)
    }

    /// Move the robot back to `start` and clear the counters.
    pub fn reset<R: RngCore>(
        &mut self,
        simulator: &CorridorSimulator<R>,
        start: StateIndex,
    ) -> Result<(), SimError> {
        *self = Self::new(simulator, start)?;
        Ok(())
    }

    pub fn start(&self) -> StateIndex {
        self.start
    }

    pub fn position(&self) -> StateIndex {
        self.position
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn total_reward(&self) -> f64 {
        self.total_reward
    }

    /// Whether the robot sits on the goal.
    pub fn is_finished<R: RngCore>(&self, simulator: &CorridorSimulator<R>) -> bool {
        simulator.config().is_terminal(self.position)
    }

    /// Follow the policy for one move, sampling its stochastic outcome.
    pub fn step<R: RngCore>(
        &mut self,
        policy: &Policy,
        simulator: &mut CorridorSimulator<R>,
    ) -> Result<StepRecord, SimError> {
        let from = self.position;
        if self.is_finished(simulator) {
            return Err(SimError::EpisodeFinished { state: from });
        }

        let action = match policy.decision(from) {
            Some(Decision::Move(action)) => action,
            Some(Decision::Stay) | None => {
                return Err(SimError::MissingDecision { state: from });
            }
        };

        let to = simulator.sample_next_state(from, action)?;
        let reward = simulator.model().reward(from, action, to);
        let reached_goal = simulator.config().is_terminal(to);

        self.position = to;
        self.steps += 1;
        self.total_reward += reward;

        debug!(
            %from,
            %action,
            %to,
            reward,
            steps = self.steps,
            total_reward = self.total_reward,
            "episode step"
        );

        Ok(StepRecord {
            from,
            action,
            to,
            reward,
            reached_goal,
        })
    }

    /// Step until the goal is reached or `max_steps` moves have been made.
    pub fn run<R: RngCore>(
        &mut self,
        policy: &Policy,
        simulator: &mut CorridorSimulator<R>,
        max_steps: usize,
    ) -> Result<EpisodeSummary, SimError> {
        let mut trace = Vec::new();

        while !self.is_finished(simulator) && trace.len() < max_steps {
            trace.push(self.step(policy, simulator)?);
        }

        let reached_goal = self.is_finished(simulator);
        info!(
            start = %self.start,
            steps = self.steps,
            total_reward = self.total_reward,
            reached_goal,
            "episode finished"
        );

        Ok(EpisodeSummary {
            start: self.start,
            steps: self.steps,
            total_reward: self.total_reward,
            reached_goal,
            trace,
        })
    }
}
