//! PI controller block.
//!
//! Positional PI law in Kp/Ti form with forward-Euler integration:
//!
//! ```text
//! I[k] = I[k-1] + Ts * e[k]
//! u[k] = Kp * e[k] + (Kp / Ti) * I[k]
//! ```
//!
//! The controller produces the *raw* command. Actuator limits are applied by
//! [`crate::Saturation`] afterwards and never feed back into the integral:
//! there is no anti-windup, so the accumulator keeps growing while the
//! actuator is pinned.

use crate::error::ControlResult;
use pl_core::ensure_positive;
use serde::{Deserialize, Serialize};

/// PI controller configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PIController {
    /// Proportional gain.
    pub kp: f64,
    /// Integral time constant (seconds). Larger values reduce integral action.
    pub ti: f64,
}

impl PIController {
    /// Create a new PI controller.
    ///
    /// # Arguments
    ///
    /// * `kp` - Proportional gain (positive)
    /// * `ti` - Integral time constant in seconds (positive)
    pub fn new(kp: f64, ti: f64) -> ControlResult<Self> {
        let kp = ensure_positive(kp, "kp must be finite and positive")?;
        let ti = ensure_positive(ti, "ti must be finite and positive")?;
        Ok(Self { kp, ti })
    }

    /// Integral gain `Kp / Ti`.
    pub fn ki(&self) -> f64 {
        self.kp / self.ti
    }

    /// Compute the raw (unsaturated) controller output for a tracking error.
    ///
    /// # Arguments
    ///
    /// * `state` - Controller state (contains integral)
    /// * `error` - Tracking error `reference - measurement`
    /// * `dt` - Sample period (seconds)
    ///
    /// # Returns
    ///
    /// Updated state and raw output value.
    pub fn update(&self, state: &PIControllerState, error: f64, dt: f64) -> (PIControllerState, f64) {
        // Integrate unconditionally
        let integral = state.integral + dt * error;
        let output = self.kp * error + self.ki() * integral;
        (PIControllerState { integral }, output)
    }
}

/// PI controller state.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PIControllerState {
    /// Integral accumulator.
    pub integral: f64,
}
