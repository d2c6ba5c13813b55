//! Continuous-time first-order transfer functions.

use pl_core::{Real, ensure_finite};
use serde::{Deserialize, Serialize};

use crate::error::{PlantError, PlantResult};

/// Continuous first-order transfer function `K / (tau*s + 1)`.
///
/// Stored in gain/time-constant form. Construct it either directly with
/// [`ContinuousTransferFunction::first_order`] or from polynomial
/// coefficients (highest power first) with [`ContinuousTransferFunction::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContinuousTransferFunction {
    gain: Real,
    time_constant: Real,
}

impl ContinuousTransferFunction {
    /// Create `gain / (time_constant*s + 1)`.
    ///
    /// # Errors
    ///
    /// Returns [`PlantError::InvalidModel`] if `gain` is non-finite or
    /// `time_constant` is not a finite positive number.
    pub fn first_order(gain: Real, time_constant: Real) -> PlantResult<Self> {
        ensure_finite(gain, "plant gain")?;
        ensure_finite(time_constant, "plant time constant")?;
        if time_constant <= 0.0 {
            return Err(PlantError::model(format!(
                "time constant must be positive, got {time_constant}"
            )));
        }
        Ok(Self {
            gain,
            time_constant,
        })
    }

    /// Create a transfer function from numerator and denominator coefficients.
    ///
    /// The numerator must be a single gain `[n]` and the denominator a
    /// first-order polynomial `[d0, d1]` with `d1 != 0`. The result is
    /// normalized to `(n/d1) / ((d0/d1)*s + 1)`.
    ///
    /// ```
    /// use pl_plant::ContinuousTransferFunction;
    ///
    /// let tf = ContinuousTransferFunction::new(&[20.0], &[50.0, 1.0]).unwrap();
    /// assert_eq!(tf.gain(), 20.0);
    /// assert_eq!(tf.time_constant(), 50.0);
    /// ```
    pub fn new(num: &[Real], den: &[Real]) -> PlantResult<Self> {
        let &[n] = num else {
            return Err(PlantError::model(format!(
                "numerator must be a single gain term, got {} coefficients",
                num.len()
            )));
        };
        let &[d0, d1] = den else {
            return Err(PlantError::model(format!(
                "denominator must be first order, got {} coefficients",
                den.len()
            )));
        };
        ensure_finite(d0, "denominator coefficient")?;
        ensure_finite(d1, "denominator coefficient")?;
        if d1 == 0.0 {
            return Err(PlantError::model(
                "denominator constant term must be non-zero (pure integrator)",
            ));
        }
        Self::first_order(n / d1, d0 / d1)
    }

    /// Static (DC) gain `K`.
    pub fn gain(&self) -> Real {
        self.gain
    }

    /// Time constant `tau` in seconds.
    pub fn time_constant(&self) -> Real {
        self.time_constant
    }

    /// Continuous pole location `-1/tau`.
    pub fn pole(&self) -> Real {
        -1.0 / self.time_constant
    }

    /// Numerator coefficients, highest power first.
    pub fn numerator(&self) -> [Real; 1] {
        [self.gain]
    }

    /// Denominator coefficients, highest power first.
    pub fn denominator(&self) -> [Real; 2] {
        [self.time_constant, 1.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polynomial_form_normalizes() {
        let tf = ContinuousTransferFunction::new(&[4.0], &[10.0, 2.0]).unwrap();
        assert_eq!(tf.gain(), 2.0);
        assert_eq!(tf.time_constant(), 5.0);
        assert_eq!(tf.denominator(), [5.0, 1.0]);
        assert!((tf.pole() + 0.2).abs() < 1e-15);
    }

    #[test]
    fn rejects_non_positive_time_constant() {
        assert!(matches!(
            ContinuousTransferFunction::first_order(1.0, 0.0),
            Err(PlantError::InvalidModel { .. })
        ));
        assert!(ContinuousTransferFunction::first_order(1.0, -3.0).is_err());
        // Negative ratio d0/d1 is an unstable pole
        assert!(ContinuousTransferFunction::new(&[1.0], &[1.0, -1.0]).is_err());
    }

    #[test]
    fn rejects_non_finite_gain() {
        assert!(matches!(
            ContinuousTransferFunction::first_order(f64::NAN, 1.0),
            Err(PlantError::InvalidModel { .. })
        ));
        assert!(ContinuousTransferFunction::first_order(f64::INFINITY, 1.0).is_err());
    }

    #[test]
    fn rejects_wrong_order() {
        assert!(ContinuousTransferFunction::new(&[1.0, 2.0], &[1.0, 1.0]).is_err());
        assert!(ContinuousTransferFunction::new(&[1.0], &[1.0, 2.0, 1.0]).is_err());
        assert!(ContinuousTransferFunction::new(&[], &[1.0, 1.0]).is_err());
        assert!(ContinuousTransferFunction::new(&[1.0], &[1.0, 0.0]).is_err());
    }
}
