#![forbid(unsafe_code)]
//! convsplit-core: the value types shared by the cost model, the planner and
//! the CLI.
//!
//! - `ProblemSpec`: input/kernel shape (validated, `K >= 1`).
//! - `PerfProfile`: CPU/GPU throughput and bus bandwidth (validated, all > 0).
//! - `SplitConfig`: which search variant to use and when.
//!
//! Invalid inputs are rejected here, at construction, so every downstream
//! computation can stay infallible.

pub mod config;
pub mod error;
pub mod prelude;
pub mod problem;
pub mod profile;

pub use config::{SearchStrategy, SplitConfig};
pub use error::{Error, Result};
pub use problem::{ElementType, OutputGrid, ProblemSpec};
pub use profile::PerfProfile;
