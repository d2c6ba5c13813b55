//! pl-results: run cache and timeseries storage.

pub mod csv;
pub mod hash;
pub mod store;
pub mod types;

pub use csv::{write_csv, write_series_csv};
pub use hash::{compute_run_id, is_valid_run_id};
pub use store::RunStore;
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Run {run_id}: bad time series record on line {line}")]
    BadRecord {
        run_id: String,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid run id: {run_id:?} (expected 64 lowercase hex digits)")]
    InvalidRunId { run_id: String },

    #[error("Run not found: {run_id}")]
    RunNotFound { run_id: String },

    #[error("Invalid path: {message}")]
    InvalidPath { message: String },
}
