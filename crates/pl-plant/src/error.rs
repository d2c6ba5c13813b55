//! Error types for plant modeling and discretization.

use thiserror::Error;

/// Result type for plant operations.
pub type PlantResult<T> = Result<T, PlantError>;

/// Errors that can occur while building or discretizing a plant model.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlantError {
    /// The continuous model is not a valid first-order plant.
    #[error("Invalid model: {what}")]
    InvalidModel { what: String },

    /// The sample period is not a finite positive number.
    #[error("Invalid sample period: {value} (must be finite and positive)")]
    InvalidSamplePeriod { value: f64 },
}

impl PlantError {
    pub(crate) fn model(what: impl Into<String>) -> Self {
        PlantError::InvalidModel { what: what.into() }
    }
}

impl From<pl_core::CoreError> for PlantError {
    fn from(e: pl_core::CoreError) -> Self {
        PlantError::InvalidModel {
            what: e.to_string(),
        }
    }
}
