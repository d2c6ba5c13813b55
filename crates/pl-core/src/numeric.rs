use crate::CoreError;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Require a finite, strictly positive value.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, CoreError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(CoreError::InvalidArg { what })
    }
}

/// Upper bound on grid length; each sample is recorded in several output vectors.
pub const MAX_SAMPLES: usize = 10_000_000;

/// Number of samples on a uniform grid `0, dt, 2dt, ..., t_end`.
///
/// The end point is included when `t_end` is a multiple of `dt` up to rounding.
/// Grids longer than [`MAX_SAMPLES`] (or with a non-finite ratio) are rejected.
pub fn sample_count(dt: Real, t_end: Real) -> Result<usize, CoreError> {
    if t_end <= 0.0 {
        return Ok(1);
    }
    let ratio = t_end / dt;
    let rounded = ratio.round();
    let steps = if (ratio - rounded).abs() <= 1e-9 * rounded.max(1.0) {
        rounded
    } else {
        ratio.floor()
    };
    if steps.is_nan() || steps >= MAX_SAMPLES as Real {
        return Err(CoreError::TooManySamples {
            requested: steps + 1.0,
            max: MAX_SAMPLES,
        });
    }
    Ok(steps as usize + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_positive_rejects_zero_and_negative() {
        assert!(ensure_positive(0.0, "x").is_err());
        assert!(ensure_positive(-1.0, "x").is_err());
        assert!(matches!(
            ensure_positive(Real::INFINITY, "x"),
            Err(CoreError::NonFinite { .. })
        ));
        assert_eq!(ensure_positive(0.1, "x").unwrap(), 0.1);
    }

    #[test]
    fn sample_count_includes_end_point() {
        assert_eq!(sample_count(0.1, 60.0), Ok(601));
        assert_eq!(sample_count(0.5, 2.0), Ok(5));
        assert_eq!(sample_count(0.3, 1.0), Ok(4));
        assert_eq!(sample_count(0.1, 0.0), Ok(1));
    }

    #[test]
    fn sample_count_rejects_huge_grids() {
        assert!(matches!(
            sample_count(1e-300, 1e300),
            Err(CoreError::TooManySamples { .. })
        ));
        assert!(matches!(
            sample_count(1e-3, 1e9),
            Err(CoreError::TooManySamples { max: MAX_SAMPLES, .. })
        ));
        assert!(sample_count(f64::MIN_POSITIVE, 1.0).is_err());
        assert!(sample_count(1.0, f64::INFINITY).is_err());

        let limit = (MAX_SAMPLES - 1) as f64;
        assert_eq!(sample_count(1.0, limit), Ok(MAX_SAMPLES));
        assert!(sample_count(1.0, limit + 1.0).is_err());
    }
}
