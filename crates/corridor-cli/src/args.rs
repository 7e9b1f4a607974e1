use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use corridor_core::CorridorConfig;

/// Solve a one-dimensional corridor MDP with value iteration and walk the robot
/// along the optimal policy.
#[derive(Parser, Debug)]
#[command(name = "corridor", version, about, long_about = None)]
pub struct Args {
    /// YAML config file. Fields it omits keep their defaults.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of cells in the corridor.
    #[arg(long)]
    pub num_states: Option<usize>,

    /// Index of the goal cell.
    #[arg(long)]
    pub terminal_state: Option<usize>,

    /// Discount factor in (0, 1].
    #[arg(long)]
    pub gamma: Option<f64>,

    /// Probability that a move succeeds.
    #[arg(long)]
    pub p_move: Option<f64>,

    /// Reward charged on every move.
    #[arg(long, allow_hyphen_values = true)]
    pub step_cost: Option<f64>,

    /// Bonus for reaching the goal.
    #[arg(long, allow_hyphen_values = true)]
    pub goal_reward: Option<f64>,

    /// Convergence threshold on the per-sweep value change.
    #[arg(long)]
    pub theta: Option<f64>,

    /// Sweep cap.
    #[arg(long)]
    pub max_iterations: Option<usize>,

    /// Keep an unconverged result instead of failing.
    #[arg(long)]
    pub best_effort: bool,

    /// How to print the solution.
    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    pub format: Format,

    /// Also write the solution report to this file (YAML, or JSON for a `.json` path).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of episodes to simulate after solving.
    #[arg(short, long, default_value_t = 0)]
    pub episodes: usize,

    /// Seed for the simulation RNG.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Start cell for every episode. Random non-terminal cell if unset.
    #[arg(long)]
    pub start: Option<usize>,

    /// Step cap per episode.
    #[arg(long, default_value_t = 1_000)]
    pub max_steps: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Table,
    Json,
    Yaml,
}

impl Args {
    /// Apply command-line overrides on top of a base config.
    pub fn apply_overrides(&self, mut config: CorridorConfig) -> CorridorConfig {
        if let Some(v) = self.num_states {
            config.num_states = v;
        }
        if let Some(v) = self.terminal_state {
            config.terminal_state = v;
        }
        if let Some(v) = self.gamma {
            config.gamma = v;
        }
        if let Some(v) = self.p_move {
            config.p_move = v;
        }
        if let Some(v) = self.step_cost {
            config.step_cost = v;
        }
        if let Some(v) = self.goal_reward {
            config.goal_reward = v;
        }
        if let Some(v) = self.theta {
            config.theta = v;
        }
        if let Some(v) = self.max_iterations {
            config.max_iterations = v;
        }
        config
    }
}
