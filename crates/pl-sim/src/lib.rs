//! Fixed-step closed-loop simulation of a discrete first-order plant under
//! PI control with actuator saturation.
//!
//! Provides:
//! - Explicit loop state `(y_prev, integral, u)` and a pure single-step function
//! - `ClosedLoop` runner over a uniform time grid
//! - Traced runs exposing error and integral accumulator per step
//! - `simulate`, the scalar-in / sequences-out entry point

pub mod error;
pub mod sim;
pub mod step;

// Re-exports for public API
pub use error::{SimError, SimResult};
pub use sim::{ClosedLoop, SimOutput, TracedOutput, simulate};
pub use step::{LoopState, StepOutput, step};
