//! Error types for control system operations.

use thiserror::Error;

/// Result type for control system operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors that can occur in control system operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// Invalid argument provided to a control function.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Sample period is not a finite positive number.
    #[error("Invalid sample period: {value} (must be finite and positive)")]
    InvalidSamplePeriod { value: f64 },

    /// Reference trajectory is malformed.
    #[error("Invalid reference: {what}")]
    InvalidReference { what: String },

    #[error("Time grid needs {requested} samples, limit is {max}")]
    TooManySamples { requested: f64, max: usize },
}

impl From<pl_core::CoreError> for ControlError {
    fn from(e: pl_core::CoreError) -> Self {
        match e {
            pl_core::CoreError::NonFinite { what, .. } | pl_core::CoreError::InvalidArg { what } => {
                ControlError::InvalidArg { what }
            }
            pl_core::CoreError::TooManySamples { requested, max } => {
                ControlError::TooManySamples { requested, max }
            }
        }
    }
}
