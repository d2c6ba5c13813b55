//! Closed-loop performance metrics.
//!
//! Computes rise time, settling time, overshoot, steady-state error and
//! actuator saturation from a run's reference, output and control series.

use serde::{Deserialize, Serialize};

use pl_results::{RunManifest, TimeseriesRecord};

use crate::error::{AppError, AppResult};
use crate::query::{Variable, extract_series};

/// Standard control loop performance metrics.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoopMetrics {
    /// Time for output to reach 10% of its final change (seconds)
    pub rise_time_10_s: Option<f64>,
    /// Time for output to reach 90% of its final change (seconds)
    pub rise_time_90_s: Option<f64>,
    /// Time after which output stays inside the ±2% band (seconds)
    pub settling_time_2pct_s: Option<f64>,
    /// Peak overshoot in percent of final value
    pub overshoot_pct: Option<f64>,
    /// Final output minus final reference
    pub steady_state_error: Option<f64>,
    pub max_controller_output: Option<f64>,
    /// Percentage of run time with control pinned at the upper limit
    pub controller_saturation_pct_upper: Option<f64>,
    /// Percentage of run time with control pinned at the lower limit
    pub controller_saturation_pct_lower: Option<f64>,
}

impl LoopMetrics {
    /// Returns true if at least some response metrics were computed.
    pub fn has_data(&self) -> bool {
        self.rise_time_10_s.is_some()
            || self.rise_time_90_s.is_some()
            || self.settling_time_2pct_s.is_some()
            || self.overshoot_pct.is_some()
            || self.steady_state_error.is_some()
    }
}

/// Compute metrics for a loop from `(time, value)` series.
///
/// `actuator_limits` is the `(min, max)` range the control signal was clamped
/// to. Saturation percentages treat each control sample as held until the next
/// one.
pub fn compute_loop_metrics(
    measured_series: &[(f64, f64)],
    reference_series: &[(f64, f64)],
    control_series: Option<&[(f64, f64)]>,
    actuator_limits: (f64, f64),
) -> AppResult<LoopMetrics> {
    let (lower, upper) = actuator_limits;
    if lower.is_nan() || upper.is_nan() || lower >= upper {
        return Err(AppError::InvalidInput(format!(
            "actuator limits must satisfy min < max, got [{lower}, {upper}]"
        )));
    }

    let mut metrics = LoopMetrics::default();

    let (Some(&(_, initial_measured)), Some(&(_, final_measured))) =
        (measured_series.first(), measured_series.last())
    else {
        return Ok(metrics);
    };
    let Some(&(_, final_reference)) = reference_series.last() else {
        return Ok(metrics);
    };

    metrics.steady_state_error = Some(final_measured - final_reference);

    if (final_measured - initial_measured).abs() > 1e-6 && final_measured.abs() > 1e-6 {
        metrics.rise_time_10_s =
            time_to_fraction(measured_series, initial_measured, final_measured, 0.1);
        metrics.rise_time_90_s =
            time_to_fraction(measured_series, initial_measured, final_measured, 0.9);

        let peak = measured_series
            .iter()
            .map(|&(_, v)| v)
            .fold(f64::NEG_INFINITY, f64::max);
        let overshoot = (peak - final_measured) / final_measured.abs() * 100.0;
        if overshoot > 0.0 {
            metrics.overshoot_pct = Some(overshoot);
        }

        metrics.settling_time_2pct_s = settling_time(measured_series, final_measured, 0.02);
    }

    if let Some(control) = control_series {
        metrics.max_controller_output = control
            .iter()
            .map(|&(_, v)| v)
            .reduce(f64::max);

        let tol = (upper - lower) * 1e-9;
        metrics.controller_saturation_pct_upper =
            Some(held_time_pct(control, |u| u >= upper - tol));
        metrics.controller_saturation_pct_lower =
            Some(held_time_pct(control, |u| u <= lower + tol));
    }

    Ok(metrics)
}

/// Metrics for a stored or in-memory run, using the manifest's actuator limits.
pub fn compute_run_metrics(
    manifest: &RunManifest,
    records: &[TimeseriesRecord],
) -> AppResult<LoopMetrics> {
    let measured = extract_series(records, Variable::Output);
    let reference = extract_series(records, Variable::Reference);
    let control = extract_series(records, Variable::Control);
    compute_loop_metrics(
        &measured,
        &reference,
        Some(&control),
        (manifest.actuator.min, manifest.actuator.max),
    )
}

/// Interpolated time at which the response first covers `fraction` of the
/// change from `initial` to `final_val`.
fn time_to_fraction(
    series: &[(f64, f64)],
    initial: f64,
    final_val: f64,
    fraction: f64,
) -> Option<f64> {
    let change = final_val - initial;
    if change.abs() < 1e-9 {
        return None;
    }
    let target = initial + fraction * change;
    let rising = change > 0.0;

    for (i, &(time, val)) in series.iter().enumerate() {
        let reached = if rising { val >= target } else { val <= target };
        if i > 0 && reached {
            let (prev_time, prev_val) = series[i - 1];
            let delta_v = val - prev_val;
            if delta_v.abs() > 1e-9 {
                return Some(prev_time + (target - prev_val) / delta_v * (time - prev_time));
            }
            return Some(time);
        }
    }

    None
}

/// Start of the final stretch spent strictly inside
/// `final_val * (1 ± tolerance)`.
fn settling_time(series: &[(f64, f64)], final_val: f64, tolerance: f64) -> Option<f64> {
    if final_val.abs() < 1e-9 {
        return None;
    }
    let band = final_val.abs() * tolerance;
    let (lower, upper) = (final_val - band, final_val + band);

    let mut entry: Option<f64> = None;
    for &(time, val) in series {
        let in_band = val > lower && val < upper;
        match (entry, in_band) {
            (None, true) => entry = Some(time),
            (Some(_), false) => entry = None,
            _ => {}
        }
    }
    entry
}

/// Share of total time where `pinned` holds, each sample held until the next.
fn held_time_pct(series: &[(f64, f64)], pinned: impl Fn(f64) -> bool) -> f64 {
    let (Some(&(t_first, _)), Some(&(t_last, _))) = (series.first(), series.last()) else {
        return 0.0;
    };
    let total = t_last - t_first;
    if total <= 0.0 {
        return 0.0;
    }

    let held: f64 = series
        .windows(2)
        .filter(|w| pinned(w[0].1))
        .map(|w| w[1].0 - w[0].0)
        .sum();

    held / total * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMITS: (f64, f64) = (0.0, 100.0);

    #[test]
    fn rise_time_10_90_percent() {
        let measured = vec![
            (0.0, 0.0),
            (1.0, 0.0),
            (1.5, 0.15),
            (2.0, 0.5),
            (2.5, 0.85),
            (3.0, 0.95),
            (4.0, 1.0),
        ];
        let reference = vec![(0.0, 1.0), (4.0, 1.0)];

        let metrics = compute_loop_metrics(&measured, &reference, None, LIMITS).unwrap();

        let t10 = metrics.rise_time_10_s.unwrap();
        let t90 = metrics.rise_time_90_s.unwrap();
        assert!(t10 < t90);
        assert!(t10 > 1.0 && t10 < 2.0);
        assert!(t90 > 2.5 && t90 < 3.0);
    }

    #[test]
    fn overshoot() {
        let measured = vec![(0.0, 0.0), (1.0, 0.5), (2.0, 1.2), (3.0, 1.1), (4.0, 1.0)];
        let reference = vec![(0.0, 1.0), (4.0, 1.0)];

        let metrics = compute_loop_metrics(&measured, &reference, None, LIMITS).unwrap();

        let overshoot = metrics.overshoot_pct.unwrap();
        assert!((overshoot - 20.0).abs() < 1e-9);
    }

    #[test]
    fn settling_time_is_last_band_entry() {
        let measured = vec![
            (0.0, 0.0),
            (1.0, 0.99),
            (2.0, 1.05),
            (3.0, 1.01),
            (4.0, 1.002),
            (5.0, 1.0),
        ];
        let reference = vec![(0.0, 1.0), (5.0, 1.0)];

        let metrics = compute_loop_metrics(&measured, &reference, None, LIMITS).unwrap();

        assert_eq!(metrics.settling_time_2pct_s, Some(3.0));
    }

    #[test]
    fn steady_state_error_is_signed() {
        let measured = vec![(0.0, 95.0), (1.0, 98.0), (2.0, 99.0), (3.0, 99.5)];
        let reference = vec![(0.0, 100.0), (3.0, 100.0)];

        let metrics = compute_loop_metrics(&measured, &reference, None, LIMITS).unwrap();

        assert!((metrics.steady_state_error.unwrap() + 0.5).abs() < 1e-12);
    }

    #[test]
    fn saturation_uses_actuator_limits() {
        let measured = vec![(0.0, 0.0), (4.0, 1.0)];
        let reference = vec![(0.0, 1.0), (4.0, 1.0)];
        let control = vec![
            (0.0, 100.0),
            (1.0, 100.0),
            (2.0, 40.0),
            (3.0, 0.0),
            (4.0, 20.0),
        ];

        let metrics =
            compute_loop_metrics(&measured, &reference, Some(&control), LIMITS).unwrap();

        assert_eq!(metrics.max_controller_output, Some(100.0));
        assert!((metrics.controller_saturation_pct_upper.unwrap() - 50.0).abs() < 1e-9);
        assert!((metrics.controller_saturation_pct_lower.unwrap() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn empty_series_yields_no_data() {
        let empty: Vec<(f64, f64)> = vec![];
        let reference = vec![(0.0, 1.0), (1.0, 1.0)];

        let metrics = compute_loop_metrics(&empty, &reference, None, LIMITS).unwrap();

        assert!(!metrics.has_data());
    }

    #[test]
    fn constant_signal_has_no_response_metrics() {
        let measured = vec![(0.0, 100.0), (1.0, 100.0), (2.0, 100.0)];
        let reference = vec![(0.0, 100.0), (2.0, 100.0)];

        let metrics = compute_loop_metrics(&measured, &reference, None, LIMITS).unwrap();

        assert!(metrics.rise_time_10_s.is_none());
        assert!(metrics.overshoot_pct.is_none());
        assert_eq!(metrics.steady_state_error, Some(0.0));
    }

    #[test]
    fn rejects_inverted_limits() {
        let s = vec![(0.0, 1.0)];
        assert!(compute_loop_metrics(&s, &s, None, (1.0, 0.0)).is_err());
    }
}
