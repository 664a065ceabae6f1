#![forbid(unsafe_code)]
//! convsplit-planner: find the CPU/GPU row split that minimizes the
//! `convsplit-model` estimate.
//!
//! Design:
//! - `exhaustive`: O(M) scan, ground truth, used for small inputs.
//! - `ternary`: ternary search + exact scan of the final bracket. Assumes a
//!   unimodal cost curve (see the module docs).
//! - `recommend`: config-driven wrapper that reports the strategy used, the
//!   evaluation count and the cost breakdown.
//! - `entry`: flat integer API with boundary validation.
//! - `curve` / `verify`: sweep and assertion helpers for tests and the CLI.
//! - `dsl::yaml`: scenario files (problem + profile + optional config).
//!
//! Every function is pure; nothing here allocates shared state or blocks.

pub mod curve;
pub mod dsl;
pub mod entry;
pub mod exhaustive;
mod probe;
pub mod recommend;
pub mod ternary;
pub mod verify;

pub use curve::{cost_curve, curve_minimum, is_unimodal, CurvePoint};
pub use dsl::yaml::{parse_yaml_scenario, ConfigDef, Scenario};
pub use entry::{best_split_exhaustive, best_split_fast, estimate_exec_time};
pub use recommend::{recommend, resolve_strategy, Recommendation};
pub use ternary::best_split_fast_with_threshold;
