// Thin front end over the corridor solver and simulator.
// Solves once, prints the value/policy table, then optionally walks episodes.

mod args;

use std::{path::Path, process::ExitCode};

use clap::Parser;
use corridor_core::{
    ConfigError, CorridorConfig, SolutionReport, SolveError, StateIndex, solve, solve_best_effort,
};
use corridor_sim::{CorridorSimulator, Episode, SimError, save_report_json, save_report_yaml};
use thiserror::Error;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use crate::args::{Args, Format};

const DEFAULT_LOG_DIRECTIVES: &str = "corridor_core=warn,corridor_sim=warn,corridor=info";

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Solve(#[from] SolveError),

    #[error(transparent)]
    Sim(#[from] SimError),

    #[error("failed to render report as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to render report as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    fn exit_status(&self) -> u8 {
        match self {
            CliError::Solve(SolveError::NonConvergence { .. }) => 1,
            CliError::Config(_) | CliError::Solve(_) | CliError::Sim(SimError::Config(_)) => 2,
            CliError::Sim(_) | CliError::Json(_) | CliError::Yaml(_) => 3,
        }
    }
}

/// Process status for a finished run. An unconverged best-effort run still exits 1.
fn exit_status(result: &Result<bool, CliError>) -> u8 {
    match result {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(err) => err.exit_status(),
    }
}

/// `RUST_LOG` wins when it is set and parses; otherwise fall back to quiet library logs.
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_DIRECTIVES))
}

fn init_logging() {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    fmt()
        .with_env_filter(log_filter(rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .init();
}

// File values are only checked after the command-line overrides land, so a flag
// can repair a bad field in the file.
fn build_config(args: &Args) -> Result<CorridorConfig, CliError> {
    let base = match &args.config {
        Some(path) => CorridorConfig::parse_yaml_path(path)?,
        None => CorridorConfig::default(),
    };
    let config = args.apply_overrides(base);
    config.validate().map_err(ConfigError::from)?;
    Ok(config)
}

fn render(report: &SolutionReport, format: Format) -> Result<String, CliError> {
    match format {
        Format::Table => Ok(report.to_table()),
        Format::Json => Ok(report.to_json()?),
        Format::Yaml => Ok(report.to_yaml()?),
    }
}

fn write_report(path: &Path, report: &SolutionReport) -> Result<(), CliError> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        save_report_json(path, report)?;
    } else {
        save_report_yaml(path, report)?;
    }
    info!(path = %path.display(), "wrote solution report");
    Ok(())
}

fn run(args: &Args) -> Result<bool, CliError> {
    let config = build_config(args)?;
    info!(?config, "solving corridor");

    let solution = if args.best_effort {
        solve_best_effort(&config)?
    } else {
        solve(&config)?
    };
    if !solution.converged {
        warn!(
            iterations = solution.iterations,
            delta = solution.final_delta,
            "continuing with an unconverged solution"
        );
    }

    let report = SolutionReport::from_solution(&solution);
    println!("{}", render(&report, args.format)?);
    if let Some(path) = &args.output {
        write_report(path, &report)?;
    }

    if args.episodes > 0 {
        let mut simulator = CorridorSimulator::new(&config, args.seed);
        for episode_index in 0..args.episodes {
            let mut episode = match args.start {
                Some(start) => Episode::new(&simulator, StateIndex::from(start))?,
                None => Episode::random(&mut simulator)?,
            };
            let summary = episode.run(&solution.policy, &mut simulator, args.max_steps)?;

            println!("episode {episode_index}: start at {}", summary.start);
            for step in &summary.trace {
                println!(
                    "  {} --{}--> {}  reward {:+.2}",
                    step.from, step.action, step.to, step.reward
                );
            }
            let outcome = if summary.reached_goal {
                "goal reached"
            } else {
                "step cap hit"
            };
            println!(
                "  {outcome}: steps {} total reward {:.2}",
                summary.steps, summary.total_reward
            );
        }
    }

    Ok(solution.converged)
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    let result = run(&args);
    if let Err(err) = &result {
        error!("{err}");
    }
    ExitCode::from(exit_status(&result))
}
