//! Minimal YAML → scenario parser.
//!
//! Example:
//! ```yaml
//! problem: { rows: 1000, cols: 1000, kernel: 5, element: f32 }
//! profile: { cpu_ops: 500, gpu_ops: 2000, bandwidth: 100 }
//! config:  { strategy: auto, fast_search_threshold: 100 }
//! offload_rows: 480
//! ```
//!
//! `element`, `config` and `offload_rows` are optional. Values go through the
//! same validation as the typed constructors.

use serde::{Deserialize, Serialize};

use convsplit_core::{
    ElementType, Error, PerfProfile, ProblemSpec, Result, SearchStrategy, SplitConfig,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioDoc {
    pub problem: ProblemDef,
    pub profile: ProfileDef,
    #[serde(default)]
    pub config: ConfigDef,
    #[serde(default)]
    pub offload_rows: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProblemDef {
    pub rows: u64,
    pub cols: u64,
    pub kernel: u64,
    #[serde(default)]
    pub element: ElementType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileDef {
    pub cpu_ops: u64,
    pub gpu_ops: u64,
    pub bandwidth: u64,
}

/// Search settings from a scenario file. Unset fields leave the caller's
/// config untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigDef {
    pub strategy: Option<SearchStrategy>,
    pub fast_search_threshold: Option<u64>,
}

impl ConfigDef {
    pub fn apply_to(&self, cfg: &mut SplitConfig) {
        if let Some(strategy) = self.strategy {
            cfg.strategy = strategy;
        }
        if let Some(threshold) = self.fast_search_threshold {
            cfg.fast_search_threshold = threshold;
        }
    }
}

/// Validated scenario.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub problem: ProblemSpec,
    pub profile: PerfProfile,
    /// Config block from the file. Callers layer it over env defaults.
    pub config: ConfigDef,
    pub offload_rows: Option<i64>,
}

pub fn parse_yaml_scenario(yaml_src: &str) -> Result<Scenario> {
    let doc: ScenarioDoc =
        serde_yaml::from_str(yaml_src).map_err(|e| Error::Scenario(e.to_string()))?;

    let problem = ProblemSpec::new(doc.problem.rows, doc.problem.cols, doc.problem.kernel)?
        .with_element(doc.problem.element);
    let profile = PerfProfile::new(
        doc.profile.cpu_ops,
        doc.profile.gpu_ops,
        doc.profile.bandwidth,
    )?;

    Ok(Scenario {
        problem,
        profile,
        config: doc.config,
        offload_rows: doc.offload_rows,
    })
}
