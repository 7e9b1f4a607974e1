mod corridor;

pub use corridor::bellman::q_value;
pub use corridor::config::{ConfigError, CorridorConfig, InvalidConfiguration};
pub use corridor::error::SolveError;
pub use corridor::ids::{Action, Decision, StateIndex};
pub use corridor::model::{
    CorridorModel, PROB_TOLERANCE, RewardModel, TransitionModel, check_model,
};
pub use corridor::policy::{Policy, TIE_EPSILON, extract_policy};
pub use corridor::report::{SolutionReport, StateRow};
pub use corridor::solve::{Solution, solve, solve_best_effort};
pub use corridor::value_iteration::{
    SweepMetrics, ValueFunction, ValueSolution, solve_values, solve_values_with_hook,
};
