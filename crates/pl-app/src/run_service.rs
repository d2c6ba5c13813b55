//! Run execution and caching service.

use std::path::Path;
use std::time::Instant;

use pl_project::schema::Scenario;
use pl_results::{ActuatorLimits, DiscretePlantSnapshot, RunManifest, RunStore, TimeseriesRecord};
use tracing::info;

use crate::compile::{CompiledLoop, compile_scenario};
use crate::error::AppResult;
use crate::scenario_service;

/// Version string mixed into run ids; bump when simulated trajectories change.
pub const ENGINE_VERSION: &str = "0.1.0";

/// Options for running simulations.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub use_cache: bool,
    pub engine_version: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            engine_version: ENGINE_VERSION.to_string(),
        }
    }
}

/// Request to execute a run.
pub struct RunRequest<'a> {
    pub scenario_path: &'a Path,
    pub options: RunOptions,
}

/// Concise timing summary for a run.
#[derive(Debug, Clone, Default)]
pub struct RunTimingSummary {
    pub compile_time_s: f64,
    pub simulate_time_s: f64,
    pub save_time_s: f64,
    pub load_cache_time_s: f64,
    pub total_time_s: f64,
}

/// Response from a run execution.
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub run_id: String,
    pub manifest: RunManifest,
    pub loaded_from_cache: bool,
    pub timing: RunTimingSummary,
}

/// Simulate a scenario in memory.
///
/// Returns the manifest (with `run_id` computed but nothing persisted) and one
/// record per grid sample.
pub fn run_scenario(
    scenario: &Scenario,
    engine_version: &str,
) -> AppResult<(RunManifest, Vec<TimeseriesRecord>)> {
    let compiled = compile_scenario(scenario)?;
    simulate_compiled(scenario, &compiled, engine_version)
}

fn simulate_compiled(
    scenario: &Scenario,
    compiled: &CompiledLoop,
    engine_version: &str,
) -> AppResult<(RunManifest, Vec<TimeseriesRecord>)> {
    let output = compiled
        .closed_loop
        .run(&compiled.grid, &compiled.reference)?;

    let records: Vec<TimeseriesRecord> = output
        .t
        .iter()
        .zip(&compiled.reference)
        .zip(output.y.iter().zip(&output.u))
        .map(|((&time_s, &reference), (&output, &control))| TimeseriesRecord {
            time_s,
            reference,
            output,
            control,
        })
        .collect();

    let coefficients = compiled.discrete.coefficients();
    let manifest = RunManifest {
        run_id: pl_results::compute_run_id(scenario, engine_version)?,
        scenario_name: scenario.name.clone(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        engine_version: engine_version.to_string(),
        sample_period_s: scenario.sample_period_s,
        t_end_s: scenario.t_end_s,
        samples: records.len(),
        plant: DiscretePlantSnapshot {
            b1: coefficients.b1,
            a1: coefficients.a1,
        },
        actuator: ActuatorLimits {
            min: scenario.actuator.min,
            max: scenario.actuator.max,
        },
    };

    Ok((manifest, records))
}

/// Execute or load a run based on request.
pub fn ensure_run(request: &RunRequest) -> AppResult<RunResponse> {
    let started = Instant::now();
    let mut timing = RunTimingSummary::default();

    let scenario = scenario_service::load_scenario(request.scenario_path)?;
    let run_id = pl_results::compute_run_id(&scenario, &request.options.engine_version)?;
    let store = RunStore::for_scenario(request.scenario_path)?;

    if request.options.use_cache && store.has_run(&run_id) {
        let load_started = Instant::now();
        let manifest = store.load_manifest(&run_id)?;
        timing.load_cache_time_s = load_started.elapsed().as_secs_f64();
        timing.total_time_s = started.elapsed().as_secs_f64();

        info!(run_id = %run_id, "loaded cached run");
        return Ok(RunResponse {
            run_id,
            manifest,
            loaded_from_cache: true,
            timing,
        });
    }

    let compile_started = Instant::now();
    let compiled = compile_scenario(&scenario)?;
    timing.compile_time_s = compile_started.elapsed().as_secs_f64();

    let sim_started = Instant::now();
    let (manifest, records) =
        simulate_compiled(&scenario, &compiled, &request.options.engine_version)?;
    timing.simulate_time_s = sim_started.elapsed().as_secs_f64();

    let save_started = Instant::now();
    store.save_run(&manifest, &records)?;
    timing.save_time_s = save_started.elapsed().as_secs_f64();
    timing.total_time_s = started.elapsed().as_secs_f64();

    info!(
        run_id = %run_id,
        samples = records.len(),
        "run completed"
    );

    Ok(RunResponse {
        run_id,
        manifest,
        loaded_from_cache: false,
        timing,
    })
}

/// List stored runs for a scenario file.
pub fn list_runs(scenario_path: &Path) -> AppResult<Vec<RunManifest>> {
    let store = RunStore::for_scenario(scenario_path)?;
    Ok(store.list_runs()?)
}

/// Load a stored run.
pub fn load_run(
    scenario_path: &Path,
    run_id: &str,
) -> AppResult<(RunManifest, Vec<TimeseriesRecord>)> {
    let store = RunStore::for_scenario(scenario_path)?;
    let manifest = store.load_manifest(run_id)?;
    let records = store.load_timeseries(run_id)?;
    Ok((manifest, records))
}

/// Delete a stored run; returns whether it existed.
pub fn delete_run(scenario_path: &Path, run_id: &str) -> AppResult<bool> {
    let store = RunStore::for_scenario(scenario_path)?;
    let deleted = store.delete_run(run_id)?;
    if deleted {
        info!(run_id = %run_id, "deleted run");
    }
    Ok(deleted)
}
