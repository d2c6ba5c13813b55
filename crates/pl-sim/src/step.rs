//! Single closed-loop step.

use pl_controls::{PIController, PIControllerState, Saturation};
use pl_plant::PlantCoefficients;
use serde::{Deserialize, Serialize};

/// Carried state of the closed loop between samples.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LoopState {
    /// Plant output at the previous sample.
    pub y_prev: f64,
    /// Integral accumulator of the tracking error.
    pub integral: f64,
    /// Saturated control signal computed at the previous sample.
    pub u: f64,
}

/// Values produced by one step.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepOutput {
    /// Plant output `y[k]`.
    pub y: f64,
    /// Tracking error `ref[k] - y[k]`.
    pub error: f64,
    /// Controller command before saturation.
    pub raw_u: f64,
    /// Applied (saturated) control signal.
    pub u: f64,
}

/// Advance the loop by one sample.
///
/// Order is fixed:
/// 1. plant output from the *previous* control signal
/// 2. tracking error
/// 3. integral update (unconditional)
/// 4. raw PI command
/// 5. saturation; the integral is left as is
/// 6. state shift
pub fn step(
    plant: &PlantCoefficients,
    controller: &PIController,
    actuator: &Saturation,
    state: LoopState,
    reference: f64,
    dt: f64,
) -> (LoopState, StepOutput) {
    let y = plant.next_output(state.y_prev, state.u);
    let error = reference - y;

    let (ctrl, raw_u) = controller.update(
        &PIControllerState {
            integral: state.integral,
        },
        error,
        dt,
    );
    let u = actuator.apply(raw_u);

    let next = LoopState {
        y_prev: y,
        integral: ctrl.integral,
        u,
    };
    (
        next,
        StepOutput {
            y,
            error,
            raw_u,
            u,
        },
    )
}
