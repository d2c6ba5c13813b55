//! Zero-order-hold discretization of first-order plants.
//!
//! For `G(s) = K / (tau*s + 1)` sampled every `Ts` seconds with the input held
//! constant between samples, the exact discrete equivalent is
//!
//! ```text
//!          K (1 - p)
//! G(z) = -----------,   p = exp(-Ts / tau)
//!            z - p
//! ```
//!
//! i.e. numerator `[K(1-p)]` and denominator `[1, -p]`. After delay padding
//! the numerator becomes `[0, K(1-p)]` and the recurrence reads
//! `y[k] = b1*u[k-1] - a1*y[k-1]` with `b1 = K(1-p)` and `a1 = -p`.

use pl_core::Real;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PlantError, PlantResult};
use crate::transfer_function::ContinuousTransferFunction;

/// Discrete transfer function in powers of `z^-1` after normalization.
///
/// Invariants (enforced by [`DiscreteTransferFunction::from_raw`]):
/// - `den[0] == 1`
/// - `num.len() == den.len() == 2`
/// - a single-term numerator is padded with a leading zero
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscreteTransferFunction {
    num: Vec<Real>,
    den: Vec<Real>,
    sample_period: Real,
}

impl DiscreteTransferFunction {
    /// Build a first-order discrete transfer function from raw coefficients.
    ///
    /// Coefficients are scaled so the leading denominator term is 1. A
    /// numerator of length 1 is padded to `[0, n]` so the recurrence never
    /// references `u[k]`.
    pub fn from_raw(num: Vec<Real>, den: Vec<Real>, sample_period: Real) -> PlantResult<Self> {
        validate_sample_period(sample_period)?;
        if den.len() != 2 {
            return Err(PlantError::model(format!(
                "discrete denominator must have 2 coefficients, got {}",
                den.len()
            )));
        }
        if num.is_empty() || num.len() > 2 {
            return Err(PlantError::model(format!(
                "discrete numerator must have 1 or 2 coefficients, got {}",
                num.len()
            )));
        }
        if num.iter().chain(den.iter()).any(|c| !c.is_finite()) {
            return Err(PlantError::model("non-finite discrete coefficient"));
        }

        let lead = den[0];
        if lead == 0.0 {
            return Err(PlantError::model("leading denominator coefficient is zero"));
        }

        let (mut num, den) = if lead != 1.0 {
            (
                num.iter().map(|c| c / lead).collect::<Vec<_>>(),
                den.iter().map(|c| c / lead).collect::<Vec<_>>(),
            )
        } else {
            (num, den)
        };

        if num.len() == 1 {
            num.insert(0, 0.0);
        }

        Ok(Self {
            num,
            den,
            sample_period,
        })
    }

    /// Numerator coefficients in powers of `z^-1`.
    pub fn numerator(&self) -> &[Real] {
        &self.num
    }

    /// Denominator coefficients in powers of `z^-1`; `den[0] == 1`.
    pub fn denominator(&self) -> &[Real] {
        &self.den
    }

    /// Sample period in seconds.
    pub fn sample_period(&self) -> Real {
        self.sample_period
    }

    /// Extract the recurrence coefficients `{b1, a1}`.
    pub fn coefficients(&self) -> PlantCoefficients {
        PlantCoefficients {
            b1: self.num[1],
            a1: self.den[1],
        }
    }
}

/// Coefficients of `y[k] = b1 * u[k-1] - a1 * y[k-1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlantCoefficients {
    /// Input coefficient applied to the previous control sample.
    pub b1: Real,
    /// Denominator coefficient; the recurrence subtracts `a1 * y[k-1]`.
    pub a1: Real,
}

impl PlantCoefficients {
    /// Discrete pole location `-a1`.
    pub fn pole(&self) -> Real {
        -self.a1
    }

    /// True when `|a1| < 1`.
    pub fn is_stable(&self) -> bool {
        self.a1.abs() < 1.0
    }

    /// Steady-state gain `b1 / (1 + a1)`. `None` when the pole sits at `z = 1`.
    pub fn dc_gain(&self) -> Option<Real> {
        let den = 1.0 + self.a1;
        if den == 0.0 { None } else { Some(self.b1 / den) }
    }

    /// Advance the recurrence by one sample.
    #[inline]
    pub fn next_output(&self, y_prev: Real, u_prev: Real) -> Real {
        self.b1 * u_prev - self.a1 * y_prev
    }
}

/// Zero-order-hold equivalent of a continuous first-order plant.
pub fn zoh(
    plant: &ContinuousTransferFunction,
    sample_period: Real,
) -> PlantResult<DiscreteTransferFunction> {
    validate_sample_period(sample_period)?;
    let p = (-sample_period / plant.time_constant()).exp();
    let tf = DiscreteTransferFunction::from_raw(
        vec![plant.gain() * (1.0 - p)],
        vec![1.0, -p],
        sample_period,
    )?;
    debug!(
        gain = plant.gain(),
        tau = plant.time_constant(),
        ts = sample_period,
        num = ?tf.numerator(),
        den = ?tf.denominator(),
        "discretized plant (zoh)"
    );
    Ok(tf)
}

/// Discretize `gain / (time_constant*s + 1)` with sample period `sample_period`.
///
/// ```
/// let c = pl_plant::discretize(20.0, 50.0, 0.1).unwrap();
/// let p = (-0.1_f64 / 50.0).exp();
/// assert!((c.a1 + p).abs() < 1e-12);
/// assert!((c.b1 - 20.0 * (1.0 - p)).abs() < 1e-12);
/// ```
///
/// # Errors
///
/// - [`PlantError::InvalidSamplePeriod`] if `sample_period` is not finite and positive
/// - [`PlantError::InvalidModel`] if `time_constant <= 0` or either parameter is non-finite
pub fn discretize(
    gain: Real,
    time_constant: Real,
    sample_period: Real,
) -> PlantResult<PlantCoefficients> {
    validate_sample_period(sample_period)?;
    let plant = ContinuousTransferFunction::first_order(gain, time_constant)?;
    Ok(zoh(&plant, sample_period)?.coefficients())
}

fn validate_sample_period(sample_period: Real) -> PlantResult<()> {
    if sample_period.is_finite() && sample_period > 0.0 {
        Ok(())
    } else {
        Err(PlantError::InvalidSamplePeriod {
            value: sample_period,
        })
    }
}
