//! Scenario → runnable closed loop.

use pl_controls::{PIController, Reference, SampleConfig, Saturation, TimeGrid};
use pl_plant::{ContinuousTransferFunction, DiscreteTransferFunction, zoh};
use pl_project::schema::{ReferenceDef, Scenario};
use pl_sim::ClosedLoop;
use tracing::debug;

use crate::error::AppResult;

/// Everything needed to run a scenario, with the discrete plant retained for
/// reporting.
#[derive(Debug, Clone)]
pub struct CompiledLoop {
    pub plant: ContinuousTransferFunction,
    pub discrete: DiscreteTransferFunction,
    pub closed_loop: ClosedLoop,
    pub grid: TimeGrid,
    pub reference: Vec<f64>,
}

/// Discretize the plant, build controller and actuator, and sample the
/// reference onto the time grid.
pub fn compile_scenario(scenario: &Scenario) -> AppResult<CompiledLoop> {
    crate::scenario_service::validate_scenario(scenario)?;

    let plant =
        ContinuousTransferFunction::first_order(scenario.plant.gain, scenario.plant.time_constant_s)?;
    let discrete = zoh(&plant, scenario.sample_period_s)?;

    let sample = SampleConfig::new(scenario.sample_period_s)?;
    let controller = PIController::new(scenario.controller.kp, scenario.controller.ti_s)?;
    let actuator = Saturation::new(scenario.actuator.min, scenario.actuator.max)?;
    let closed_loop = ClosedLoop::new(discrete.coefficients(), controller, actuator, sample)?;

    let grid = TimeGrid::new(scenario.sample_period_s, scenario.t_end_s)?;
    let reference = build_reference(&scenario.reference)?.sample(&grid);

    debug!(
        scenario = %scenario.name,
        samples = grid.len(),
        "compiled scenario"
    );

    Ok(CompiledLoop {
        plant,
        discrete,
        closed_loop,
        grid,
        reference,
    })
}

fn build_reference(def: &ReferenceDef) -> AppResult<Reference> {
    let reference = match def {
        ReferenceDef::Constant { value } => Reference::constant(*value),
        ReferenceDef::Steps { steps } => Reference::steps(steps.iter().map(|s| (s.t_s, s.value)))?,
    };
    reference.validate()?;
    Ok(reference)
}
