//! Convolution problem shape: an `M x N` input convolved with a square `K x K`
//! kernel (valid padding, stride 1).
//!
//! Rows are the unit of partitioning. The planner hands the first
//! `num_offloaded_rows` input rows to the GPU and the remainder to the CPU.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Element type of the input and output matrices. Only its width matters:
/// transfer volume is counted in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    F16,
    #[default]
    F32,
    F64,
}

impl ElementType {
    pub const fn size_bytes(self) -> u64 {
        match self {
            ElementType::F16 => 2,
            ElementType::F32 => 4,
            ElementType::F64 => 8,
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ElementType::F16 => "f16",
            ElementType::F32 => "f32",
            ElementType::F64 => "f64",
        };
        f.write_str(s)
    }
}

impl FromStr for ElementType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "f16" | "half" => Ok(ElementType::F16),
            "f32" | "float" => Ok(ElementType::F32),
            "f64" | "double" => Ok(ElementType::F64),
            other => Err(Error::invalid(
                "element",
                format!("unknown element type '{other}' (expected f16, f32 or f64)"),
            )),
        }
    }
}

/// Validated problem shape.
///
/// `kernel` is always at least 1. `rows < kernel` (or `cols < kernel`) is
/// accepted: it is the degenerate case with an empty output grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ProblemSpec {
    rows: u64,
    cols: u64,
    kernel: u64,
    element: ElementType,
}

impl ProblemSpec {
    pub fn new(rows: u64, cols: u64, kernel: u64) -> Result<Self> {
        if kernel == 0 {
            return Err(Error::invalid("kernel", "kernel size must be at least 1"));
        }
        Ok(Self {
            rows,
            cols,
            kernel,
            element: ElementType::default(),
        })
    }

    pub fn with_element(mut self, element: ElementType) -> Self {
        self.element = element;
        self
    }

    /// Input height `M`.
    pub const fn rows(&self) -> u64 {
        self.rows
    }

    /// Input width `N`.
    pub const fn cols(&self) -> u64 {
        self.cols
    }

    /// Kernel side `K`.
    pub const fn kernel(&self) -> u64 {
        self.kernel
    }

    pub const fn element(&self) -> ElementType {
        self.element
    }

    /// True when the kernel does not fit vertically, so no row split can
    /// produce output on either device.
    pub const fn is_degenerate(&self) -> bool {
        self.rows < self.kernel
    }

    /// Dimensions of the sliding-window result grid. Negative extents
    /// collapse to zero.
    pub fn output_grid(&self) -> OutputGrid {
        OutputGrid {
            height: self.rows.saturating_add(1).saturating_sub(self.kernel),
            width: self.cols.saturating_add(1).saturating_sub(self.kernel),
        }
    }

    /// Multiply/add count for one output position: `K^2` multiplications
    /// plus `K^2 - 1` additions.
    pub fn ops_per_position(&self) -> u64 {
        let k2 = self.kernel.saturating_mul(self.kernel);
        k2.saturating_mul(2) - 1
    }
}

impl fmt::Display for ProblemSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} input, {}x{} kernel, {}",
            self.rows, self.cols, self.kernel, self.kernel, self.element
        )
    }
}

/// Output grid of a valid convolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputGrid {
    pub height: u64,
    pub width: u64,
}

impl OutputGrid {
    pub fn positions(&self) -> u64 {
        self.height.saturating_mul(self.width)
    }

    pub fn is_empty(&self) -> bool {
        self.positions() == 0
    }
}
