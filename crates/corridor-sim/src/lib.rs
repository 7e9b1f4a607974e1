mod episode;
mod error;
mod io;
mod simulator;


pub use episode::{Episode, EpisodeSummary, StepRecord};
pub use error::SimError;
pub use io::{load_config, save_report_json, save_report_yaml};
pub use simulator::CorridorSimulator;
