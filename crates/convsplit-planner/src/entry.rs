//! Flat integer entry points for callers that hold raw calibration numbers.
//!
//! Every function validates its arguments first and returns
//! `Error::InvalidArgument` for negative dimensions, a non-positive kernel,
//! or a non-positive throughput/bandwidth. After validation the typed
//! functions do the work, so both optimizers and the cost model share one
//! policy.

use convsplit_core::{Error, PerfProfile, ProblemSpec, Result};

fn non_negative(name: &'static str, value: i64) -> Result<u64> {
    u64::try_from(value).map_err(|_| Error::invalid(name, format!("must be >= 0, got {value}")))
}

fn positive(name: &'static str, value: i64) -> Result<u64> {
    if value <= 0 {
        return Err(Error::invalid(name, format!("must be > 0, got {value}")));
    }
    Ok(value as u64)
}

fn validate(
    m: i64,
    n: i64,
    k: i64,
    cpu_ops: i64,
    gpu_ops: i64,
    bandwidth: i64,
) -> Result<(ProblemSpec, PerfProfile)> {
    let spec = ProblemSpec::new(
        non_negative("M", m)?,
        non_negative("N", n)?,
        positive("K", k)?,
    )?;
    let perf = PerfProfile::new(
        positive("cpu_ops", cpu_ops)?,
        positive("gpu_ops", gpu_ops)?,
        positive("bandwidth", bandwidth)?,
    )?;
    Ok((spec, perf))
}

/// Estimated time for offloading `num_offloaded_rows` leading rows of an
/// `M x N` input convolved with a `K x K` kernel.
#[allow(clippy::too_many_arguments)]
pub fn estimate_exec_time(
    m: i64,
    n: i64,
    k: i64,
    cpu_ops: i64,
    gpu_ops: i64,
    bandwidth: i64,
    num_offloaded_rows: i64,
) -> Result<u64> {
    let (spec, perf) = validate(m, n, k, cpu_ops, gpu_ops, bandwidth)?;
    Ok(convsplit_model::estimate_exec_time(&spec, &perf, num_offloaded_rows))
}

pub fn best_split_exhaustive(
    m: i64,
    n: i64,
    k: i64,
    cpu_ops: i64,
    gpu_ops: i64,
    bandwidth: i64,
) -> Result<u64> {
    let (spec, perf) = validate(m, n, k, cpu_ops, gpu_ops, bandwidth)?;
    Ok(crate::exhaustive::best_split_exhaustive(&spec, &perf))
}

pub fn best_split_fast(
    m: i64,
    n: i64,
    k: i64,
    cpu_ops: i64,
    gpu_ops: i64,
    bandwidth: i64,
) -> Result<u64> {
    let (spec, perf) = validate(m, n, k, cpu_ops, gpu_ops, bandwidth)?;
    Ok(crate::ternary::best_split_fast(&spec, &perf))
}
