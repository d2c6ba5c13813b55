//! Simulation runner and result recording.

use pl_controls::{PIController, SampleConfig, Saturation, TimeGrid};
use pl_core::{Tolerances, nearly_equal};
use pl_plant::PlantCoefficients;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{SimError, SimResult};
use crate::step::{LoopState, StepOutput, step};

/// Trajectories of a closed-loop run, in lockstep with the time grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimOutput {
    /// Time points (seconds)
    pub t: Vec<f64>,
    /// Plant output
    pub y: Vec<f64>,
    /// Applied (saturated) control signal
    pub u: Vec<f64>,
}

impl SimOutput {
    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }
}

/// Full per-step trace of a closed-loop run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TracedOutput {
    pub t: Vec<f64>,
    pub reference: Vec<f64>,
    pub y: Vec<f64>,
    pub u: Vec<f64>,
    /// Controller command before saturation
    pub raw_u: Vec<f64>,
    pub error: Vec<f64>,
    /// Integral accumulator after each step's update
    pub integral: Vec<f64>,
}

impl TracedOutput {
    fn with_capacity(n: usize) -> Self {
        Self {
            t: Vec::with_capacity(n),
            reference: Vec::with_capacity(n),
            y: Vec::with_capacity(n),
            u: Vec::with_capacity(n),
            raw_u: Vec::with_capacity(n),
            error: Vec::with_capacity(n),
            integral: Vec::with_capacity(n),
        }
    }

    pub fn into_output(self) -> SimOutput {
        SimOutput {
            t: self.t,
            y: self.y,
            u: self.u,
        }
    }
}

/// Discrete plant, PI controller and actuator limits sharing one sample period.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClosedLoop {
    pub plant: PlantCoefficients,
    pub controller: PIController,
    pub actuator: Saturation,
    pub sample: SampleConfig,
}

impl ClosedLoop {
    /// Assemble a closed loop.
    ///
    /// An unstable discrete plant (`|a1| >= 1`) is accepted; its trajectory may
    /// diverge, which is a valid simulation outcome.
    pub fn new(
        plant: PlantCoefficients,
        controller: PIController,
        actuator: Saturation,
        sample: SampleConfig,
    ) -> SimResult<Self> {
        if !plant.b1.is_finite() || !plant.a1.is_finite() {
            return Err(SimError::InvalidModel {
                what: format!(
                    "discrete coefficients must be finite (b1={}, a1={})",
                    plant.b1, plant.a1
                ),
            });
        }
        if !plant.is_stable() {
            warn!(a1 = plant.a1, "discrete plant is not stable; trajectory may diverge");
        }
        Ok(Self {
            plant,
            controller,
            actuator,
            sample,
        })
    }

    pub fn dt(&self) -> f64 {
        self.sample.dt
    }

    /// Run over `grid`, returning output and control trajectories.
    pub fn run(&self, grid: &TimeGrid, reference: &[f64]) -> SimResult<SimOutput> {
        let mut out = SimOutput {
            t: Vec::with_capacity(grid.len()),
            y: Vec::with_capacity(grid.len()),
            u: Vec::with_capacity(grid.len()),
        };
        self.drive(grid, reference, |t, _, _, o| {
            out.t.push(t);
            out.y.push(o.y);
            out.u.push(o.u);
        })?;
        Ok(out)
    }

    /// Run over `grid`, recording every intermediate quantity.
    pub fn run_traced(&self, grid: &TimeGrid, reference: &[f64]) -> SimResult<TracedOutput> {
        let mut out = TracedOutput::with_capacity(grid.len());
        self.drive(grid, reference, |t, r, state, o| {
            out.t.push(t);
            out.reference.push(r);
            out.y.push(o.y);
            out.u.push(o.u);
            out.raw_u.push(o.raw_u);
            out.error.push(o.error);
            out.integral.push(state.integral);
        })?;
        Ok(out)
    }

    fn drive(
        &self,
        grid: &TimeGrid,
        reference: &[f64],
        mut record: impl FnMut(f64, f64, &LoopState, &StepOutput),
    ) -> SimResult<LoopState> {
        if reference.len() != grid.len() {
            return Err(SimError::LengthMismatch {
                expected: grid.len(),
                got: reference.len(),
            });
        }
        // Grids built from uom quantities may differ from the loop period in the last bits
        if !nearly_equal(grid.dt(), self.sample.dt, Tolerances::default()) {
            return Err(SimError::InvalidSamplePeriod { value: grid.dt() });
        }

        debug!(
            steps = grid.len(),
            dt = self.sample.dt,
            b1 = self.plant.b1,
            a1 = self.plant.a1,
            kp = self.controller.kp,
            ti = self.controller.ti,
            "closed-loop run"
        );

        let mut state = LoopState::default();
        for (k, &r) in reference.iter().enumerate() {
            let (next, out) = step(
                &self.plant,
                &self.controller,
                &self.actuator,
                state,
                r,
                self.sample.dt,
            );
            state = next;
            record(grid.time(k), r, &state, &out);
        }
        Ok(state)
    }
}

/// Simulate the loop with actuator limits `[0, 100]`.
///
/// The time grid has one sample per reference value, spaced `ts` apart from
/// `t = 0`.
///
/// ```
/// let c = pl_plant::discretize(20.0, 50.0, 0.1).unwrap();
/// let reference = vec![400.0; 601];
/// let out = pl_sim::simulate(c.b1, c.a1, 0.8, 9.0, 0.1, &reference).unwrap();
/// assert_eq!(out.y.len(), 601);
/// assert_eq!(out.y[0], 0.0);
/// assert_eq!(out.u[0], 100.0);
/// ```
pub fn simulate(
    b1: f64,
    a1: f64,
    kp: f64,
    ti: f64,
    ts: f64,
    reference: &[f64],
) -> SimResult<SimOutput> {
    let sample = SampleConfig::new(ts)?;
    let controller = PIController::new(kp, ti)?;
    let closed_loop = ClosedLoop::new(
        PlantCoefficients { b1, a1 },
        controller,
        Saturation::default(),
        sample,
    )?;
    let grid = TimeGrid::with_len(sample, reference.len());
    closed_loop.run(&grid, reference)
}
