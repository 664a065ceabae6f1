//! Verification helpers for split recommendations.
//!
//! The `check_*` functions return `Error::Invariant` when a recommendation is
//! out of range or beaten by a nearby candidate. The `assert_*` variants
//! panic with the same message and are meant for tests.

use convsplit_core::{Error, PerfProfile, ProblemSpec, Result};
use convsplit_model::estimate_exec_time;

/// Verify that a recommended row count lies in `[0, M]`.
pub fn check_in_range(spec: &ProblemSpec, rows: u64) -> Result<()> {
    if rows > spec.rows() {
        return Err(Error::Invariant(format!(
            "recommended {rows} offloaded rows, but the input only has {}",
            spec.rows()
        )));
    }
    Ok(())
}

/// Candidates a recommendation at `rows` is compared against:
/// `0, r/4, r/2, 3r/4, r-1, r+1, 2r, 4r, M`, clamped to `[0, M]`, without
/// `rows` itself and without duplicates.
pub fn neighbor_candidates(spec: &ProblemSpec, rows: u64) -> Vec<u64> {
    let m = spec.rows();
    let mut points: Vec<u64> = [
        0,
        rows / 4,
        rows / 2,
        rows.saturating_mul(3) / 4,
        rows.saturating_sub(1),
        rows.saturating_add(1),
        rows.saturating_mul(2),
        rows.saturating_mul(4),
        m,
    ]
    .into_iter()
    .map(|p| p.min(m))
    .filter(|&p| p != rows)
    .collect();
    points.sort_unstable();
    points.dedup();
    points
}

/// Verify that no neighbor candidate has a strictly lower estimate.
pub fn check_local_optimum(spec: &ProblemSpec, perf: &PerfProfile, rows: u64) -> Result<()> {
    check_in_range(spec, rows)?;
    let at = |r: u64| estimate_exec_time(spec, perf, i64::try_from(r).unwrap_or(i64::MAX));
    let best = at(rows);
    for point in neighbor_candidates(spec, rows) {
        let time = at(point);
        if time < best {
            return Err(Error::Invariant(format!(
                "better estimate {time} at {point} rows than {best} at recommended {rows} rows"
            )));
        }
    }
    Ok(())
}

/// Panicking form of [`check_in_range`].
pub fn assert_in_range(spec: &ProblemSpec, rows: u64) {
    if let Err(e) = check_in_range(spec, rows) {
        panic!("{e}");
    }
}

/// Panicking form of [`check_local_optimum`].
pub fn assert_local_optimum(spec: &ProblemSpec, perf: &PerfProfile, rows: u64) {
    if let Err(e) = check_local_optimum(spec, perf, rows) {
        panic!("{e}");
    }
}
