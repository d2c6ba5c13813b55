//! Result data types.

use serde::{Deserialize, Serialize};

pub type RunId = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: RunId,
    pub scenario_name: String,
    pub timestamp: String,
    pub engine_version: String,
    pub sample_period_s: f64,
    pub t_end_s: f64,
    pub samples: usize,
    pub plant: DiscretePlantSnapshot,
    pub actuator: ActuatorLimits,
}

/// Discrete coefficients the run was simulated with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscretePlantSnapshot {
    pub b1: f64,
    pub a1: f64,
}

/// Range the control signal was clamped to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActuatorLimits {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeseriesRecord {
    pub time_s: f64,
    pub reference: f64,
    pub output: f64,
    pub control: f64,
}
