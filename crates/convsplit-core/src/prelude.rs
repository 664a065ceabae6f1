//! Convenient re-exports for downstream crates.

pub use crate::config::{SearchStrategy, SplitConfig, DEFAULT_FAST_SEARCH_THRESHOLD};
pub use crate::error::{Error, Result};
pub use crate::problem::{ElementType, OutputGrid, ProblemSpec};
pub use crate::profile::PerfProfile;
