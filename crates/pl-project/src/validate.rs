//! Scenario validation logic.

use crate::schema::{ReferenceDef, Scenario};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn require_finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, value, "must be finite"))
    }
}

fn require_positive(field: &str, value: f64) -> Result<(), ValidationError> {
    require_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be positive"))
    }
}

pub fn validate_scenario(scenario: &Scenario) -> Result<(), ValidationError> {
    if scenario.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: scenario.version,
        });
    }

    require_finite("plant.gain", scenario.plant.gain)?;
    require_positive("plant.time_constant_s", scenario.plant.time_constant_s)?;

    require_positive("controller.kp", scenario.controller.kp)?;
    require_positive("controller.ti_s", scenario.controller.ti_s)?;

    require_finite("actuator.min", scenario.actuator.min)?;
    require_finite("actuator.max", scenario.actuator.max)?;
    if scenario.actuator.min >= scenario.actuator.max {
        return Err(invalid(
            "actuator.max",
            scenario.actuator.max,
            "must be greater than actuator.min",
        ));
    }

    require_positive("sample_period_s", scenario.sample_period_s)?;
    require_finite("t_end_s", scenario.t_end_s)?;
    if scenario.t_end_s < 0.0 {
        return Err(invalid("t_end_s", scenario.t_end_s, "must be non-negative"));
    }
    if let Err(e) = pl_core::sample_count(scenario.sample_period_s, scenario.t_end_s) {
        return Err(invalid("t_end_s", scenario.t_end_s, &e.to_string()));
    }

    validate_reference(&scenario.reference)
}

fn validate_reference(reference: &ReferenceDef) -> Result<(), ValidationError> {
    match reference {
        ReferenceDef::Constant { value } => require_finite("reference.value", *value),
        ReferenceDef::Steps { steps } => {
            if steps.is_empty() {
                return Err(invalid("reference.steps", "[]", "must not be empty"));
            }
            let mut last_t = f64::NEG_INFINITY;
            for (i, step) in steps.iter().enumerate() {
                let field = format!("reference.steps[{i}]");
                require_finite(&format!("{field}.value"), step.value)?;
                require_finite(&format!("{field}.t_s"), step.t_s)?;
                if step.t_s < 0.0 {
                    return Err(invalid(&format!("{field}.t_s"), step.t_s, "must be non-negative"));
                }
                if step.t_s <= last_t {
                    return Err(invalid(
                        &format!("{field}.t_s"),
                        step.t_s,
                        "step times must be strictly ascending",
                    ));
                }
                last_t = step.t_s;
            }
            Ok(())
        }
    }
}
