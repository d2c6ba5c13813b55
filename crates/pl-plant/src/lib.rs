//! Plant models and zero-order-hold discretization for piloop.
//!
//! A continuous first-order plant `K / (tau*s + 1)` is reduced to the exact
//! discrete recurrence
//!
//! ```text
//! y[k] = b1 * u[k-1] - a1 * y[k-1]
//! ```
//!
//! under the assumption that the input is held constant between samples.
//! The recurrence always references `u[k-1]`: the discrete plant carries one
//! sample of computational delay.

pub mod discretize;
pub mod error;
pub mod transfer_function;

pub use discretize::{DiscreteTransferFunction, PlantCoefficients, discretize, zoh};
pub use error::{PlantError, PlantResult};
pub use transfer_function::ContinuousTransferFunction;
