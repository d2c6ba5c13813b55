//! Query helpers for extracting data from loaded runs.

use std::fmt;
use std::str::FromStr;

use pl_results::TimeseriesRecord;

use crate::error::{AppError, AppResult};

/// Summary of a run's time range and final values.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub time_range: (f64, f64),
    pub record_count: usize,
    pub final_reference: f64,
    pub final_output: f64,
    pub final_control: f64,
}

/// Get run summary from timeseries records.
pub fn get_run_summary(records: &[TimeseriesRecord]) -> AppResult<RunSummary> {
    let (Some(first), Some(last)) = (records.first(), records.last()) else {
        return Err(AppError::InvalidInput("No records in run".to_string()));
    };

    Ok(RunSummary {
        time_range: (first.time_s, last.time_s),
        record_count: records.len(),
        final_reference: last.reference,
        final_output: last.output,
        final_control: last.control,
    })
}

/// A per-sample signal stored in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variable {
    Reference,
    Output,
    Control,
}

impl Variable {
    pub const ALL: [Variable; 3] = [Variable::Reference, Variable::Output, Variable::Control];

    pub fn name(self) -> &'static str {
        match self {
            Variable::Reference => "reference",
            Variable::Output => "output",
            Variable::Control => "control",
        }
    }

    fn value(self, record: &TimeseriesRecord) -> f64 {
        match self {
            Variable::Reference => record.reference,
            Variable::Output => record.output,
            Variable::Control => record.control,
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variable {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reference" | "r" | "setpoint" => Ok(Variable::Reference),
            "output" | "y" => Ok(Variable::Output),
            "control" | "u" => Ok(Variable::Control),
            _ => {
                let expected: Vec<&str> = Variable::ALL.iter().map(|v| v.name()).collect();
                Err(AppError::InvalidInput(format!(
                    "Unknown variable: {s} (expected one of {})",
                    expected.join(", ")
                )))
            }
        }
    }
}

/// Extract `(time, value)` pairs for one variable.
pub fn extract_series(records: &[TimeseriesRecord], variable: Variable) -> Vec<(f64, f64)> {
    records
        .iter()
        .map(|r| (r.time_s, variable.value(r)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<TimeseriesRecord> {
        (0..3)
            .map(|k| TimeseriesRecord {
                time_s: k as f64 * 0.5,
                reference: 10.0,
                output: k as f64,
                control: 100.0 - k as f64,
            })
            .collect()
    }

    #[test]
    fn summary_reports_range_and_final_values() {
        let summary = get_run_summary(&records()).unwrap();
        assert_eq!(summary.time_range, (0.0, 1.0));
        assert_eq!(summary.record_count, 3);
        assert_eq!(summary.final_output, 2.0);
        assert_eq!(summary.final_control, 98.0);
    }

    #[test]
    fn summary_of_empty_run_fails() {
        assert!(matches!(
            get_run_summary(&[]),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn extracts_each_variable() {
        let recs = records();
        assert_eq!(
            extract_series(&recs, Variable::Output),
            vec![(0.0, 0.0), (0.5, 1.0), (1.0, 2.0)]
        );
        assert!(
            extract_series(&recs, Variable::Reference)
                .iter()
                .all(|&(_, v)| v == 10.0)
        );
        assert_eq!(extract_series(&recs, Variable::Control)[2], (1.0, 98.0));
    }

    #[test]
    fn parses_variable_names() {
        assert_eq!("y".parse::<Variable>().unwrap(), Variable::Output);
        assert_eq!("control".parse::<Variable>().unwrap(), Variable::Control);
        for v in Variable::ALL {
            assert_eq!(v.to_string().parse::<Variable>().unwrap(), v);
        }
        let err = "pressure".parse::<Variable>().unwrap_err();
        assert!(err.to_string().contains("reference, output, control"));
    }
}
