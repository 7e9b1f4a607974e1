use std::fmt::{self, Write as _};

use serde::{Deserialize, Serialize};

use crate::corridor::{
    config::CorridorConfig,
    ids::{Decision, StateIndex},
    solve::Solution,
};

const REPORT_SCHEMA_VERSION: u32 = 1;

/// Serializable summary of a solve, one row per cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionReport {
    pub schema_version: u32,
    pub config: CorridorConfig,
    pub converged: bool,
    pub iterations: usize,
    pub final_delta: f64,
    pub states: Vec<StateRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateRow {
    pub state: StateIndex,
    pub terminal: bool,
    pub decision: Decision,
    pub value: f64,
}

impl SolutionReport {
    /// Build a report with one row per cell of the solved corridor.
    pub fn from_solution(solution: &Solution) -> Self {
        let states = solution
            .values
            .iter()
            .map(|(state, value)| StateRow {
                state,
                terminal: solution.config.is_terminal(state),
                decision: solution.decision(state).unwrap_or(Decision::Stay),
                value,
            })
            .collect();

        SolutionReport {
            schema_version: REPORT_SCHEMA_VERSION,
            config: solution.config.clone(),
            converged: solution.converged,
            iterations: solution.iterations,
            final_delta: solution.final_delta,
            states,
        }
    }

    /// Serialize the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Serialize the report as YAML.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Render the value/policy table as plain text.
    pub fn to_table(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_table(&mut out);
        out
    }

    fn write_table(&self, out: &mut String) -> fmt::Result {
        writeln!(
            out,
            "gamma={} p_move={} step_cost={} goal_reward={}",
            self.config.gamma, self.config.p_move, self.config.step_cost, self.config.goal_reward
        )?;
        let status = if self.converged {
            "converged"
        } else {
            "NOT converged"
        };
        writeln!(
            out,
            "{status} after {} sweeps (delta {:.3e})",
            self.iterations, self.final_delta
        )?;
        writeln!(out, "| state | action | value    |")?;
        writeln!(out, "|-------|--------|----------|")?;
        for row in &self.states {
            let marker = if row.terminal { " (goal)" } else { "" };
            writeln!(
                out,
                "| {:<5} | {:<6} | {:>8.4} |{marker}",
                row.state.index(),
                row.decision.to_string(),
                row.value
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for SolutionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_table())
    }
}
