//! Analytical execution-time model for a CPU/GPU row split.
//!
//! The GPU receives the first `num_offloaded_rows` input rows, the CPU the
//! rest. Both run concurrently behind a barrier, so the estimate is the
//! slower of the two paths:
//!
//! ```text
//! cpu_time = cpu_positions * ops_per_position / cpu_ops
//! gpu_time = in_bytes / bandwidth
//!          + gpu_positions * ops_per_position / gpu_ops
//!          + out_bytes / bandwidth
//! estimate = ceil(max(cpu_time, gpu_time))
//! ```
//!
//! Time units are whatever the profile's rates are expressed in.
//! All counts are `u64`; row x width x ops products overflow 32 bits long
//! before inputs get large.

use convsplit_core::{OutputGrid, PerfProfile, ProblemSpec};
use serde::{Deserialize, Serialize};

/// Which path bounds the estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bottleneck {
    Cpu,
    Gpu,
    Balanced,
}

/// Every intermediate of one cost-model evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub grid: OutputGrid,
    pub ops_per_position: u64,

    /// Output rows produced on the GPU (kernel footprint already subtracted).
    pub gpu_output_rows: u64,
    pub cpu_output_rows: u64,
    pub gpu_positions: u64,
    pub cpu_positions: u64,

    /// Input rows shipped to the device, halo rows included.
    pub rows_to_transfer: u64,
    pub transfer_in_bytes: u64,
    pub transfer_out_bytes: u64,

    pub cpu_time: f64,
    pub transfer_in_time: f64,
    pub gpu_compute_time: f64,
    pub transfer_out_time: f64,
}

impl CostBreakdown {
    pub fn gpu_time(&self) -> f64 {
        self.transfer_in_time + self.gpu_compute_time + self.transfer_out_time
    }

    pub fn cpu_total_ops(&self) -> u64 {
        self.cpu_positions.saturating_mul(self.ops_per_position)
    }

    pub fn gpu_total_ops(&self) -> u64 {
        self.gpu_positions.saturating_mul(self.ops_per_position)
    }

    /// Integer estimate: ceiling of the slower path.
    pub fn total(&self) -> u64 {
        // f64 -> u64 casts saturate, so huge estimates clamp to u64::MAX.
        self.cpu_time.max(self.gpu_time()).ceil() as u64
    }

    pub fn bottleneck(&self) -> Bottleneck {
        let gpu = self.gpu_time();
        if self.cpu_time > gpu {
            Bottleneck::Cpu
        } else if gpu > self.cpu_time {
            Bottleneck::Gpu
        } else {
            Bottleneck::Balanced
        }
    }
}

/// Output rows the GPU can produce from `num_offloaded_rows` input rows:
/// `clamp(rows - K + 1, 0, output_height)`. Fewer than `K` input rows yield
/// nothing.
pub fn gpu_output_rows(spec: &ProblemSpec, num_offloaded_rows: i64) -> u64 {
    let height = spec.output_grid().height;
    if num_offloaded_rows <= 0 {
        return 0;
    }
    (num_offloaded_rows as u64)
        .saturating_add(1)
        .saturating_sub(spec.kernel())
        .min(height)
}

/// Full evaluation of the model. `num_offloaded_rows` may be any integer;
/// values outside `[0, M]` clamp through `gpu_output_rows`.
pub fn breakdown(spec: &ProblemSpec, perf: &PerfProfile, num_offloaded_rows: i64) -> CostBreakdown {
    let grid = spec.output_grid();
    let ops_per_position = spec.ops_per_position();
    let element_bytes = spec.element().size_bytes();

    let gpu_rows = gpu_output_rows(spec, num_offloaded_rows);
    let cpu_rows = grid.height - gpu_rows;
    let gpu_positions = gpu_rows.saturating_mul(grid.width);
    let cpu_positions = cpu_rows.saturating_mul(grid.width);

    let cpu_total_ops = cpu_positions.saturating_mul(ops_per_position);
    let gpu_total_ops = gpu_positions.saturating_mul(ops_per_position);

    // Halo: K - 1 extra input rows per contiguous GPU block, capped at M.
    let rows_to_transfer = gpu_rows
        .saturating_add(spec.kernel() - 1)
        .min(spec.rows());
    let transfer_in_bytes = rows_to_transfer
        .saturating_mul(spec.cols())
        .saturating_mul(element_bytes);
    let transfer_out_bytes = gpu_positions.saturating_mul(element_bytes);

    let bandwidth = perf.bandwidth() as f64;
    CostBreakdown {
        grid,
        ops_per_position,
        gpu_output_rows: gpu_rows,
        cpu_output_rows: cpu_rows,
        gpu_positions,
        cpu_positions,
        rows_to_transfer,
        transfer_in_bytes,
        transfer_out_bytes,
        cpu_time: cpu_total_ops as f64 / perf.cpu_ops() as f64,
        transfer_in_time: transfer_in_bytes as f64 / bandwidth,
        gpu_compute_time: gpu_total_ops as f64 / perf.gpu_ops() as f64,
        transfer_out_time: transfer_out_bytes as f64 / bandwidth,
    }
}

/// Estimated wall-clock time for offloading `num_offloaded_rows` leading
/// input rows to the GPU.
///
/// When `M < K` the output grid is empty and the result does not depend on
/// `num_offloaded_rows`.
pub fn estimate_exec_time(spec: &ProblemSpec, perf: &PerfProfile, num_offloaded_rows: i64) -> u64 {
    breakdown(spec, perf, num_offloaded_rows).total()
}
