//! Scenario schema definitions.
//!
//! Every field defaults to the reference heater scenario, so a minimal file
//! only needs to list what it changes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Scenario {
    /// Files without a version field are treated as version 0.
    #[serde(default)]
    pub version: u32,
    pub name: String,
    pub plant: PlantDef,
    pub controller: ControllerDef,
    pub actuator: ActuatorDef,
    pub sample_period_s: f64,
    pub t_end_s: f64,
    pub reference: ReferenceDef,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            version: crate::migrate::LATEST_VERSION,
            name: "Identified first-order loop".to_string(),
            plant: PlantDef::default(),
            controller: ControllerDef::default(),
            actuator: ActuatorDef::default(),
            sample_period_s: 0.1,
            t_end_s: 60.0,
            reference: ReferenceDef::default(),
        }
    }
}

/// Continuous plant `gain / (time_constant_s * s + 1)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlantDef {
    pub gain: f64,
    pub time_constant_s: f64,
}

impl Default for PlantDef {
    fn default() -> Self {
        Self {
            gain: 20.0,
            time_constant_s: 50.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ControllerDef {
    pub kp: f64,
    pub ti_s: f64,
}

impl Default for ControllerDef {
    fn default() -> Self {
        Self { kp: 0.8, ti_s: 9.0 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ActuatorDef {
    pub min: f64,
    pub max: f64,
}

impl Default for ActuatorDef {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ReferenceDef {
    Constant { value: f64 },
    Steps { steps: Vec<ReferenceStepDef> },
}

impl Default for ReferenceDef {
    fn default() -> Self {
        ReferenceDef::Constant { value: 400.0 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReferenceStepDef {
    pub t_s: f64,
    pub value: f64,
}
