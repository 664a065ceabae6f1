//! Config-driven split recommendation with the cost breakdown attached.

use convsplit_core::{PerfProfile, ProblemSpec, SearchStrategy, SplitConfig};
use convsplit_model::{breakdown, CostBreakdown};
use serde::Serialize;

use crate::probe::CostProbe;
use crate::{exhaustive, ternary};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Recommendation {
    /// Number of leading input rows to hand to the GPU.
    pub rows: u64,
    /// Cost-model estimate at `rows`.
    pub estimate: u64,
    /// Variant that actually ran (`Auto` is resolved).
    pub strategy: SearchStrategy,
    /// Cost-model calls spent by the search.
    pub evaluations: u64,
    pub breakdown: CostBreakdown,
}

/// Resolve `Auto` against the problem size.
pub fn resolve_strategy(spec: &ProblemSpec, config: &SplitConfig) -> SearchStrategy {
    match config.strategy {
        SearchStrategy::Auto if spec.rows() < config.fast_search_threshold => {
            SearchStrategy::Exhaustive
        }
        SearchStrategy::Auto => SearchStrategy::Ternary,
        other => other,
    }
}

pub fn recommend(spec: &ProblemSpec, perf: &PerfProfile, config: &SplitConfig) -> Recommendation {
    let strategy = resolve_strategy(spec, config);
    let mut probe = CostProbe::new(spec, perf);
    let rows = match strategy {
        SearchStrategy::Exhaustive | SearchStrategy::Auto => exhaustive::run(&mut probe),
        SearchStrategy::Ternary => ternary::run(&mut probe),
    };

    let breakdown = breakdown(spec, perf, i64::try_from(rows).unwrap_or(i64::MAX));
    let rec = Recommendation {
        rows,
        estimate: breakdown.total(),
        strategy,
        evaluations: probe.evaluations(),
        breakdown,
    };

    #[cfg(feature = "tracing")]
    tracing::debug!(
        rows = rec.rows,
        estimate = rec.estimate,
        strategy = %rec.strategy,
        evaluations = rec.evaluations,
        "split recommendation"
    );

    rec
}
