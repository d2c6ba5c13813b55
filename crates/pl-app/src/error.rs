//! Error types for the pl-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Scenario error: {0}")]
    Scenario(String),

    #[error("Failed to read scenario file: {path}")]
    ScenarioFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write scenario file: {path}")]
    ScenarioFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Scenario validation failed: {0}")]
    Validation(String),

    #[error("Plant model error: {0}")]
    Plant(String),

    #[error("Controller error: {0}")]
    Control(String),

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Run not found: {0}")]
    RunNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for pl-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<pl_project::ProjectError> for AppError {
    fn from(err: pl_project::ProjectError) -> Self {
        AppError::Scenario(err.to_string())
    }
}

impl From<pl_project::ValidationError> for AppError {
    fn from(err: pl_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<pl_plant::PlantError> for AppError {
    fn from(err: pl_plant::PlantError) -> Self {
        AppError::Plant(err.to_string())
    }
}

impl From<pl_controls::ControlError> for AppError {
    fn from(err: pl_controls::ControlError) -> Self {
        AppError::Control(err.to_string())
    }
}

impl From<pl_sim::SimError> for AppError {
    fn from(err: pl_sim::SimError) -> Self {
        AppError::Simulation(err.to_string())
    }
}

impl From<pl_results::ResultsError> for AppError {
    fn from(err: pl_results::ResultsError) -> Self {
        match err {
            pl_results::ResultsError::RunNotFound { run_id } => AppError::RunNotFound(run_id),
            invalid @ pl_results::ResultsError::InvalidRunId { .. } => {
                AppError::InvalidInput(invalid.to_string())
            }
            other => AppError::Results(other.to_string()),
        }
    }
}
