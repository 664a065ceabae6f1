//! Sub-linear split search.
//!
//! # Unimodality
//!
//! Ternary search is only correct when the cost curve over `[0, M]` has a
//! single minimum (non-increasing, then non-decreasing). The model's curve
//! usually has this shape: CPU time falls and GPU time rises as rows move to
//! the GPU.
//!
//! Flat stretches are what break it. Every count in `[0, K-1]` yields no GPU
//! output rows and costs exactly as much as `K-1`, so the bracket starts at
//! `K-1` instead of 0. Past that point the GPU share grows by one output row
//! per input row; only ceiling rounding can still flatten the curve. After
//! the final scan the result is walked back to the first row count of its
//! plateau, which keeps the smallest-row tie-break of the exhaustive scan.
//! A rounding plateau above the minimum that swallows both probes can still
//! mislead the bracket. Callers that cannot accept that risk should use
//! [`crate::exhaustive`].

use convsplit_core::config::DEFAULT_FAST_SEARCH_THRESHOLD;
use convsplit_core::{PerfProfile, ProblemSpec};

use crate::exhaustive;
use crate::probe::CostProbe;

/// Same contract as [`exhaustive::best_split_exhaustive`], using the default
/// threshold of 100 rows below which the exhaustive scan is used instead.
pub fn best_split_fast(spec: &ProblemSpec, perf: &PerfProfile) -> u64 {
    best_split_fast_with_threshold(spec, perf, DEFAULT_FAST_SEARCH_THRESHOLD)
}

/// [`best_split_fast`] with a caller-chosen small-input threshold.
pub fn best_split_fast_with_threshold(spec: &ProblemSpec, perf: &PerfProfile, threshold: u64) -> u64 {
    let mut probe = CostProbe::new(spec, perf);
    if spec.rows() < threshold {
        exhaustive::run(&mut probe)
    } else {
        run(&mut probe)
    }
}

/// Ternary search over `[K-1, M]` followed by an exact scan of the last
/// bracket. Returns 0 when `M < K` or when the minimum is already reached
/// without offloading any output row.
pub(crate) fn run(probe: &mut CostProbe<'_>) -> u64 {
    if probe.spec().is_degenerate() {
        return 0;
    }

    // Counts below K produce nothing on the GPU: same cost as K - 1.
    let floor = probe.spec().kernel() - 1;
    let mut left = floor;
    let mut right = probe.spec().rows();

    while right - left > 2 {
        let third = (right - left) / 3;
        let mid1 = left + third;
        let mid2 = right - third;

        // On ties keep the left part: the smallest minimizer wins.
        if probe.at(mid1) <= probe.at(mid2) {
            right = mid2;
        } else {
            left = mid1;
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(left, right, "ternary bracket");
    }

    let best = probe.argmin(left, right);
    let first = plateau_start(probe, floor, best);
    if first == floor {
        0
    } else {
        first
    }
}

/// First row count in `[lo, best]` costing the same as `best`. The curve is
/// non-increasing up to its minimum, so a binary search finds it.
fn plateau_start(probe: &mut CostProbe<'_>, lo: u64, best: u64) -> u64 {
    let target = probe.at(best);
    let (mut lo, mut hi) = (lo, best);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if probe.at(mid) <= target {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    lo
}
