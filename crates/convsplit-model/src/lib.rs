#![forbid(unsafe_code)]
//! convsplit-model: analytical cost model for a 2D convolution whose output
//! rows are split between a CPU and a GPU.
//!
//! Pure functions over validated `convsplit-core` values. **No search, no
//! I/O, no state** here; the planner crate drives this model.

pub mod cost;

pub use cost::{breakdown, estimate_exec_time, gpu_output_rows, Bottleneck, CostBreakdown};
