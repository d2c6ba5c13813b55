//! Sampled execution primitives for digital controllers.
//!
//! The loop runs on a uniform grid `t[k] = k * Ts`. Between samples the
//! controller output is held constant (zero-order hold), which is the same
//! assumption the plant discretization relies on.

use crate::error::{ControlError, ControlResult};
use pl_core::units::{Frequency, Time, hertz, s, seconds};
use pl_core::sample_count;
use serde::{Deserialize, Serialize};

/// Sample configuration for a controller or control block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleConfig {
    /// Sample period in seconds.
    pub dt: f64,
}

impl SampleConfig {
    /// Create a new sample configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::InvalidSamplePeriod`] if `dt` is not finite and positive.
    pub fn new(dt: f64) -> ControlResult<Self> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(ControlError::InvalidSamplePeriod { value: dt });
        }
        Ok(Self { dt })
    }

    /// Create a sample configuration from a unit-aware period.
    pub fn from_time(period: Time) -> ControlResult<Self> {
        Self::new(seconds(period))
    }

    /// Create a sample configuration from a sample rate.
    pub fn from_frequency(freq: Frequency) -> ControlResult<Self> {
        let f = hertz(freq);
        if !(f.is_finite() && f > 0.0) {
            return Err(ControlError::InvalidArg {
                what: "sample frequency must be positive",
            });
        }
        Self::new(1.0 / f)
    }

    /// Get the sample frequency in Hz.
    pub fn frequency(&self) -> f64 {
        1.0 / self.dt
    }

    /// Sample period as a unit-aware quantity.
    pub fn period(&self) -> Time {
        s(self.dt)
    }
}

/// Uniform time grid `0, dt, 2*dt, ..., t_end`.
///
/// Samples are computed as `k * dt` rather than accumulated, so the grid has
/// no drift over long runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeGrid {
    config: SampleConfig,
    len: usize,
}

impl TimeGrid {
    /// Grid from `0` to `t_end` inclusive with step `dt`.
    ///
    /// `t_end = 60`, `dt = 0.1` yields 601 samples.
    pub fn new(dt: f64, t_end: f64) -> ControlResult<Self> {
        let config = SampleConfig::new(dt)?;
        if !t_end.is_finite() || t_end < 0.0 {
            return Err(ControlError::InvalidArg {
                what: "t_end must be finite and non-negative",
            });
        }
        Ok(Self {
            config,
            len: sample_count(dt, t_end)?,
        })
    }

    /// Grid with an explicit number of samples.
    pub fn with_len(config: SampleConfig, len: usize) -> Self {
        Self { config, len }
    }

    /// Unit-aware constructor.
    pub fn from_times(dt: Time, t_end: Time) -> ControlResult<Self> {
        Self::new(seconds(dt), seconds(t_end))
    }

    pub fn config(&self) -> SampleConfig {
        self.config
    }

    pub fn dt(&self) -> f64 {
        self.config.dt
    }

    /// Number of samples `N`.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Time of sample `k`.
    #[inline]
    pub fn time(&self, k: usize) -> f64 {
        k as f64 * self.config.dt
    }

    /// Last sample time, if any.
    pub fn t_end(&self) -> Option<f64> {
        self.len.checked_sub(1).map(|k| self.time(k))
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len).map(|k| self.time(k))
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pl_core::units::hz;

    #[test]
    fn sample_config_creation() {
        let config = SampleConfig::new(0.1).unwrap();
        assert_eq!(config.dt, 0.1);
        assert!((config.frequency() - 10.0).abs() < 1e-10);
        assert!((seconds(config.period()) - 0.1).abs() < 1e-15);
    }

    #[test]
    fn sample_config_from_frequency() {
        let config = SampleConfig::from_frequency(hz(10.0)).unwrap();
        assert!((config.dt - 0.1).abs() < 1e-10);
        assert!(SampleConfig::from_frequency(hz(0.0)).is_err());
    }

    #[test]
    fn sample_config_rejects_bad_period() {
        for dt in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                SampleConfig::new(dt),
                Err(ControlError::InvalidSamplePeriod { .. })
            ));
        }
    }

    #[test]
    fn reference_grid_has_601_samples() {
        let grid = TimeGrid::new(0.1, 60.0).unwrap();
        assert_eq!(grid.len(), 601);
        assert_eq!(grid.time(0), 0.0);
        assert!((grid.t_end().unwrap() - 60.0).abs() < 1e-9);
        assert_eq!(grid.to_vec().len(), 601);
    }

    #[test]
    fn grid_from_times() {
        let grid = TimeGrid::from_times(s(0.5), s(2.0)).unwrap();
        assert_eq!(grid.to_vec(), vec![0.0, 0.5, 1.0, 1.5, 2.0]);
    }

    #[test]
    fn oversized_grid_is_rejected() {
        assert!(matches!(
            TimeGrid::new(1e-300, 1e300),
            Err(ControlError::TooManySamples { .. })
        ));
        assert!(matches!(
            TimeGrid::new(1e-6, 1e6),
            Err(ControlError::TooManySamples { max: pl_core::MAX_SAMPLES, .. })
        ));
    }

    #[test]
    fn zero_duration_grid_has_one_sample() {
        let grid = TimeGrid::new(0.1, 0.0).unwrap();
        assert_eq!(grid.len(), 1);
        assert!(TimeGrid::new(0.1, -1.0).is_err());
    }

    #[test]
    fn empty_grid() {
        let grid = TimeGrid::with_len(SampleConfig::new(0.1).unwrap(), 0);
        assert!(grid.is_empty());
        assert!(grid.t_end().is_none());
    }
}
