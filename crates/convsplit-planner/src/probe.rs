//! Counted access to the cost model during a search.

use convsplit_core::{PerfProfile, ProblemSpec};
use convsplit_model::estimate_exec_time;

/// Evaluates the cost model for one fixed problem and counts the calls.
pub(crate) struct CostProbe<'a> {
    spec: &'a ProblemSpec,
    perf: &'a PerfProfile,
    evaluations: u64,
}

impl<'a> CostProbe<'a> {
    pub(crate) fn new(spec: &'a ProblemSpec, perf: &'a PerfProfile) -> Self {
        Self {
            spec,
            perf,
            evaluations: 0,
        }
    }

    pub(crate) fn spec(&self) -> &ProblemSpec {
        self.spec
    }

    pub(crate) fn evaluations(&self) -> u64 {
        self.evaluations
    }

    pub(crate) fn at(&mut self, rows: u64) -> u64 {
        self.evaluations += 1;
        let time = estimate_exec_time(self.spec, self.perf, i64::try_from(rows).unwrap_or(i64::MAX));
        #[cfg(feature = "tracing")]
        tracing::trace!(rows, time, "cost probe");
        time
    }

    /// Linear scan of `[lo, hi]`; the first minimum wins.
    pub(crate) fn argmin(&mut self, lo: u64, hi: u64) -> u64 {
        let mut best_rows = lo;
        let mut min_time = self.at(lo);
        for rows in lo.saturating_add(1)..=hi {
            let time = self.at(rows);
            if time < min_time {
                min_time = time;
                best_rows = rows;
            }
        }
        best_rows
    }
}
