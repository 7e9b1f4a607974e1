use std::{fs, path::Path};

use corridor_core::{CorridorConfig, SolutionReport};

use crate::SimError;

/// Load and validate a corridor config from a YAML file.
pub fn load_config(path: impl AsRef<Path>) -> Result<CorridorConfig, SimError> {
    Ok(CorridorConfig::from_yaml_path(path)?)
}

/// Serialize and write a solution report to YAML.
pub fn save_report_yaml(path: impl AsRef<Path>, report: &SolutionReport) -> Result<(), SimError> {
    let yaml = report.to_yaml()?;
    fs::write(path, yaml)?;
    Ok(())
}

/// Serialize and write a solution report to pretty JSON.
pub fn save_report_json(path: impl AsRef<Path>, report: &SolutionReport) -> Result<(), SimError> {
    let json = report.to_json()?;
    fs::write(path, json)?;
    Ok(())
}
