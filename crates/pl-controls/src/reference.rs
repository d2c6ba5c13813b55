//! Reference (setpoint) trajectories.

use crate::error::{ControlError, ControlResult};
use crate::sampled::TimeGrid;
use serde::{Deserialize, Serialize};

/// A single step in a piecewise-constant reference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceStep {
    /// Time at which the step takes effect (seconds).
    pub t_s: f64,
    /// Reference value from `t_s` on.
    pub value: f64,
}

/// Target output trajectory sampled onto the simulation grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Reference {
    /// Constant step of magnitude `value` applied from `t = 0`.
    Constant { value: f64 },
    /// Piecewise-constant schedule. The reference is `0` before the first step.
    Steps { steps: Vec<ReferenceStep> },
}

impl Default for Reference {
    fn default() -> Self {
        Reference::Constant { value: 400.0 }
    }
}

impl Reference {
    pub fn constant(value: f64) -> Self {
        Reference::Constant { value }
    }

    /// Piecewise-constant reference from `(t_s, value)` pairs.
    pub fn steps(steps: impl IntoIterator<Item = (f64, f64)>) -> ControlResult<Self> {
        let reference = Reference::Steps {
            steps: steps
                .into_iter()
                .map(|(t_s, value)| ReferenceStep { t_s, value })
                .collect(),
        };
        reference.validate()?;
        Ok(reference)
    }

    /// Check values are finite and step times are non-negative and ascending.
    pub fn validate(&self) -> ControlResult<()> {
        match self {
            Reference::Constant { value } => {
                if !value.is_finite() {
                    return Err(ControlError::InvalidReference {
                        what: format!("constant value must be finite, got {value}"),
                    });
                }
            }
            Reference::Steps { steps } => {
                if steps.is_empty() {
                    return Err(ControlError::InvalidReference {
                        what: "step schedule is empty".to_string(),
                    });
                }
                let mut last_t = f64::NEG_INFINITY;
                for (i, step) in steps.iter().enumerate() {
                    if !step.t_s.is_finite() || step.t_s < 0.0 || !step.value.is_finite() {
                        return Err(ControlError::InvalidReference {
                            what: format!("step {i} has non-finite or negative entries"),
                        });
                    }
                    if step.t_s <= last_t {
                        return Err(ControlError::InvalidReference {
                            what: format!("step {i} time {} is not ascending", step.t_s),
                        });
                    }
                    last_t = step.t_s;
                }
            }
        }
        Ok(())
    }

    /// Reference value at time `t`.
    ///
    /// A step at `t_s` is considered active at any grid time within a
    /// relative `1e-9` of `t_s`, so `k * dt` rounding never delays a step.
    pub fn value_at(&self, t: f64) -> f64 {
        match self {
            Reference::Constant { value } => *value,
            Reference::Steps { steps } => steps
                .iter()
                .take_while(|step| t + 1e-9 * step.t_s.abs().max(1.0) >= step.t_s)
                .last()
                .map_or(0.0, |step| step.value),
        }
    }

    /// Sample the reference onto a time grid (one value per grid point).
    pub fn sample(&self, grid: &TimeGrid) -> Vec<f64> {
        grid.iter().map(|t| self.value_at(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_reference_fills_grid() {
        let grid = TimeGrid::new(0.1, 60.0).unwrap();
        let r = Reference::constant(400.0).sample(&grid);
        assert_eq!(r.len(), 601);
        assert!(r.iter().all(|&v| v == 400.0));
    }

    #[test]
    fn step_schedule() {
        let r = Reference::steps([(0.0, 1000.0), (30.0, 200.0)]).unwrap();
        assert_eq!(r.value_at(0.0), 1000.0);
        assert_eq!(r.value_at(29.9), 1000.0);
        // 300 * 0.1 is not exactly 30.0
        assert_eq!(r.value_at(300.0 * 0.1), 200.0);
        assert_eq!(r.value_at(29.999_999_999_999_996), 200.0);
        assert_eq!(r.value_at(59.0), 200.0);
    }

    #[test]
    fn zero_before_first_step() {
        let r = Reference::steps([(1.0, 5.0)]).unwrap();
        assert_eq!(r.value_at(0.5), 0.0);
        assert_eq!(r.value_at(1.0), 5.0);
    }

    #[test]
    fn invalid_schedules() {
        assert!(Reference::steps(Vec::<(f64, f64)>::new()).is_err());
        assert!(Reference::steps([(1.0, 1.0), (1.0, 2.0)]).is_err());
        assert!(Reference::steps([(2.0, 1.0), (1.0, 2.0)]).is_err());
        assert!(Reference::steps([(-1.0, 1.0)]).is_err());
        assert!(Reference::steps([(0.0, f64::NAN)]).is_err());
        assert!(Reference::constant(f64::INFINITY).validate().is_err());
    }

    #[test]
    fn default_is_reference_scenario_step() {
        assert_eq!(Reference::default(), Reference::Constant { value: 400.0 });
    }
}
