//! Scenario loading, saving and validation.

use pl_project::ProjectError;
use pl_project::schema::Scenario;
use std::path::Path;

use crate::error::{AppError, AppResult};

/// Load, migrate and validate a scenario from a YAML file.
pub fn load_scenario(path: &Path) -> AppResult<Scenario> {
    pl_project::load_yaml(path).map_err(|e| match e {
        ProjectError::Io(source) => AppError::ScenarioFileRead {
            path: path.to_path_buf(),
            source,
        },
        ProjectError::Validation(v) => v.into(),
        other => other.into(),
    })
}

/// Validate a scenario and save it as YAML.
pub fn save_scenario(path: &Path, scenario: &Scenario) -> AppResult<()> {
    pl_project::save_yaml(path, scenario).map_err(|e| match e {
        ProjectError::Io(source) => AppError::ScenarioFileWrite {
            path: path.to_path_buf(),
            source,
        },
        ProjectError::Validation(v) => v.into(),
        other => other.into(),
    })
}

/// Validate scenario values.
pub fn validate_scenario(scenario: &Scenario) -> AppResult<()> {
    pl_project::validate_scenario(scenario)?;
    Ok(())
}
