//! Error types for simulation operations.

use thiserror::Error;

/// Errors encountered while setting up a closed-loop run.
///
/// All variants are precondition violations detected before the first step.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid model: {what}")]
    InvalidModel { what: String },

    #[error("Invalid sample period: {value} (must be finite and positive)")]
    InvalidSamplePeriod { value: f64 },

    #[error("Invalid controller tuning: {what}")]
    InvalidTuning { what: String },

    #[error("Length mismatch: reference has {got} samples, time grid has {expected}")]
    LengthMismatch { expected: usize, got: usize },
}

pub type SimResult<T> = Result<T, SimError>;

impl From<pl_plant::PlantError> for SimError {
    fn from(e: pl_plant::PlantError) -> Self {
        match e {
            pl_plant::PlantError::InvalidModel { what } => SimError::InvalidModel { what },
            pl_plant::PlantError::InvalidSamplePeriod { value } => {
                SimError::InvalidSamplePeriod { value }
            }
        }
    }
}

impl From<pl_controls::ControlError> for SimError {
    fn from(e: pl_controls::ControlError) -> Self {
        match e {
            pl_controls::ControlError::InvalidSamplePeriod { value } => {
                SimError::InvalidSamplePeriod { value }
            }
            other => SimError::InvalidTuning {
                what: other.to_string(),
            },
        }
    }
}
