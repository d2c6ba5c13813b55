//! Shared application service layer for piloop.
//!
//! Centralizes scenario management, loop compilation, simulation execution,
//! result caching and querying so the CLI stays a thin shell.

pub mod compile;
pub mod error;
pub mod metrics;
pub mod query;
pub mod run_service;
pub mod scenario_service;

// Re-export key types for convenience
pub use compile::{CompiledLoop, compile_scenario};
pub use error::{AppError, AppResult};
pub use metrics::{LoopMetrics, compute_loop_metrics, compute_run_metrics};
pub use query::{RunSummary, Variable, extract_series, get_run_summary};
pub use run_service::{
    ENGINE_VERSION, RunOptions, RunRequest, RunResponse, RunTimingSummary, delete_run, ensure_run,
    list_runs, load_run, run_scenario,
};
pub use scenario_service::{load_scenario, save_scenario, validate_scenario};
