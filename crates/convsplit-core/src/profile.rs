//! Calibration constants for the two devices and the bus between them.
//!
//! These come from outside (benchmarks, vendor sheets, config files); the
//! model only requires that every rate is strictly positive.

use serde::Serialize;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PerfProfile {
    cpu_ops: u64,
    gpu_ops: u64,
    bandwidth: u64,
}

impl PerfProfile {
    /// Build a profile. Zero rates are rejected: the cost model divides by
    /// each of them.
    pub fn new(cpu_ops: u64, gpu_ops: u64, bandwidth: u64) -> Result<Self> {
        if cpu_ops == 0 {
            return Err(Error::invalid("cpu_ops", "CPU throughput must be positive"));
        }
        if gpu_ops == 0 {
            return Err(Error::invalid("gpu_ops", "GPU throughput must be positive"));
        }
        if bandwidth == 0 {
            return Err(Error::invalid("bandwidth", "bus bandwidth must be positive"));
        }
        Ok(Self {
            cpu_ops,
            gpu_ops,
            bandwidth,
        })
    }

    /// CPU throughput in operations per time unit.
    pub const fn cpu_ops(&self) -> u64 {
        self.cpu_ops
    }

    /// GPU throughput in operations per time unit.
    pub const fn gpu_ops(&self) -> u64 {
        self.gpu_ops
    }

    /// Host/device transfer rate in bytes per time unit.
    pub const fn bandwidth(&self) -> u64 {
        self.bandwidth
    }
}
