//! Discrete controller primitives for piloop.
//!
//! This crate provides the controller-side building blocks of the closed loop:
//! the PI control law, actuator saturation, the fixed sample grid, and the
//! reference trajectory the loop tracks.
//!
//! # Architecture
//!
//! - Signals are scalar `f64` values
//! - Controllers are pure: state in, state + output out
//! - Actuator limits are applied after the control law, outside the controller
//! - Time advances on a uniform grid `t[k] = k * Ts`
//!
//! # Design Principles
//!
//! - **No anti-windup**: the integral accumulator is never corrected when the
//!   actuator clips the command; windup under saturation is expected behavior
//! - **Explicit state**: controller state is a value passed in and returned
//! - **Validated construction**: tuning and limits are checked once, up front

pub mod actuator;
pub mod controller;
pub mod error;
pub mod reference;
pub mod sampled;

pub use actuator::Saturation;
pub use controller::{PIController, PIControllerState};
pub use error::{ControlError, ControlResult};
pub use reference::{Reference, ReferenceStep};
pub use sampled::{SampleConfig, TimeGrid};
