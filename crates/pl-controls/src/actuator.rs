//! Actuator saturation.
//!
//! The physically realizable control signal is bounded. The default actuator
//! range is `[0, 100]` (percent of full drive).

use crate::error::{ControlError, ControlResult};
use serde::{Deserialize, Serialize};

/// Hard output limits applied to the raw controller command.
///
/// # Example
///
/// ```
/// use pl_controls::Saturation;
///
/// let sat = Saturation::default();
/// assert_eq!(sat.apply(250.0), 100.0);
/// assert_eq!(sat.apply(-3.0), 0.0);
/// assert_eq!(sat.apply(42.0), 42.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Saturation {
    /// Lower limit
    pub min: f64,
    /// Upper limit
    pub max: f64,
}

impl Default for Saturation {
    fn default() -> Self {
        Self {
            min: Self::DEFAULT_MIN,
            max: Self::DEFAULT_MAX,
        }
    }
}

impl Saturation {
    pub const DEFAULT_MIN: f64 = 0.0;
    pub const DEFAULT_MAX: f64 = 100.0;

    /// Create actuator limits.
    ///
    /// # Errors
    ///
    /// Returns error if either bound is non-finite or `min >= max`.
    pub fn new(min: f64, max: f64) -> ControlResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ControlError::InvalidArg {
                what: "actuator limits must be finite",
            });
        }
        if min >= max {
            return Err(ControlError::InvalidArg {
                what: "actuator min must be less than max",
            });
        }
        Ok(Self { min, max })
    }

    /// Clamp a raw command into `[min, max]`.
    #[inline]
    pub fn apply(&self, command: f64) -> f64 {
        let mut u = command;
        if u > self.max {
            u = self.max;
        }
        if u < self.min {
            u = self.min;
        }
        u
    }

    /// True if the raw command would be clipped.
    pub fn is_saturated(&self, command: f64) -> bool {
        command > self.max || command < self.min
    }
}
