//! Exhaustive split search: evaluate every row count in `[0, M]`.
//!
//! O(M) cost-model calls. This is the reference answer the ternary search is
//! tested against, and what `Auto` uses for small inputs.

use convsplit_core::{PerfProfile, ProblemSpec};

use crate::probe::CostProbe;

/// Row count in `[0, M]` with the lowest estimate; ties go to the smallest
/// row count. Returns 0 when `M < K`.
pub fn best_split_exhaustive(spec: &ProblemSpec, perf: &PerfProfile) -> u64 {
    let mut probe = CostProbe::new(spec, perf);
    run(&mut probe)
}

pub(crate) fn run(probe: &mut CostProbe<'_>) -> u64 {
    if probe.spec().is_degenerate() {
        return 0;
    }
    let m = probe.spec().rows();
    probe.argmin(0, m)
}
