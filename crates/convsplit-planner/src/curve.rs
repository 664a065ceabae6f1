//! Sampling the cost curve and checking the shape ternary search relies on.

use convsplit_core::{PerfProfile, ProblemSpec};
use convsplit_model::estimate_exec_time;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CurvePoint {
    pub rows: u64,
    pub time: u64,
}

/// Estimates at `0, step, 2*step, ...` and always at `M`.
pub fn cost_curve(spec: &ProblemSpec, perf: &PerfProfile, step: u64) -> Vec<CurvePoint> {
    let m = spec.rows();
    let step = step.max(1);
    let mut points = Vec::with_capacity((m / step) as usize + 2);

    let mut rows = 0u64;
    loop {
        points.push(CurvePoint {
            rows,
            time: estimate_exec_time(spec, perf, i64::try_from(rows).unwrap_or(i64::MAX)),
        });
        if rows >= m {
            break;
        }
        rows = rows.saturating_add(step).min(m);
    }
    points
}

/// Non-increasing, then non-decreasing. Flat runs are allowed anywhere.
///
/// This is necessary for ternary search but not sufficient: a flat run above
/// the minimum that covers both probes of one round sends the bracket the
/// wrong way. The model always has one such run over `[0, K-1]`, which the
/// search skips; rounding plateaus elsewhere are not detected here. Compare
/// against [`crate::exhaustive`] when in doubt.
pub fn is_unimodal(times: &[u64]) -> bool {
    let mut rising = false;
    for pair in times.windows(2) {
        if pair[1] > pair[0] {
            rising = true;
        } else if pair[1] < pair[0] && rising {
            return false;
        }
    }
    true
}

/// First sampled point with the lowest time.
pub fn curve_minimum(points: &[CurvePoint]) -> Option<CurvePoint> {
    points
        .iter()
        .copied()
        .reduce(|best, p| if p.time < best.time { p } else { best })
}
