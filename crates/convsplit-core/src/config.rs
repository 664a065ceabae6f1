//! Search configuration that downstream crates can serialize/deserialize.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Row count below which `Auto` falls back to the exhaustive scan.
pub const DEFAULT_FAST_SEARCH_THRESHOLD: u64 = 100;

/// Which optimizer variant answers a split query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStrategy {
    /// Exhaustive below the threshold, ternary search above it.
    #[default]
    Auto,
    /// Always scan every row count in `[0, M]`.
    Exhaustive,
    /// Always use ternary search, regardless of size.
    Ternary,
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SearchStrategy::Auto => "auto",
            SearchStrategy::Exhaustive => "exhaustive",
            SearchStrategy::Ternary => "ternary",
        };
        f.write_str(s)
    }
}

impl FromStr for SearchStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(SearchStrategy::Auto),
            "exhaustive" | "full" => Ok(SearchStrategy::Exhaustive),
            "ternary" | "fast" => Ok(SearchStrategy::Ternary),
            other => Err(Error::Config(format!(
                "unknown search strategy '{other}' (expected auto, exhaustive or ternary)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    pub strategy: SearchStrategy,

    /// Inputs with fewer rows than this are scanned exhaustively under `Auto`.
    pub fast_search_threshold: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            strategy: SearchStrategy::Auto,
            fast_search_threshold: DEFAULT_FAST_SEARCH_THRESHOLD,
        }
    }
}

impl SplitConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `CONVSPLIT_STRATEGY`: `auto`, `exhaustive` or `ternary`
    /// - `CONVSPLIT_FAST_SEARCH_THRESHOLD`: row count threshold for `auto`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        if let Some(s) = lookup("CONVSPLIT_STRATEGY") {
            if let Ok(v) = s.parse::<SearchStrategy>() {
                cfg.strategy = v;
            }
        }

        if let Some(s) = lookup("CONVSPLIT_FAST_SEARCH_THRESHOLD") {
            if let Ok(v) = s.trim().parse::<u64>() {
                cfg.fast_search_threshold = v;
            }
        }

        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let cfg = SplitConfig::default();
        assert_eq!(cfg.strategy, SearchStrategy::Auto);
        assert_eq!(cfg.fast_search_threshold, 100);
    }

    #[test]
    fn test_env_overrides() {
        let cfg = SplitConfig::from_lookup(lookup_from(&[
            ("CONVSPLIT_STRATEGY", "Ternary"),
            ("CONVSPLIT_FAST_SEARCH_THRESHOLD", " 250 "),
        ]));
        assert_eq!(cfg.strategy, SearchStrategy::Ternary);
        assert_eq!(cfg.fast_search_threshold, 250);
    }

    #[test]
    fn test_env_garbage_keeps_defaults() {
        let cfg = SplitConfig::from_lookup(lookup_from(&[
            ("CONVSPLIT_STRATEGY", "bisect"),
            ("CONVSPLIT_FAST_SEARCH_THRESHOLD", "-3"),
        ]));
        assert_eq!(cfg, SplitConfig::default());
    }

    #[test]
    fn test_serde_partial_document() {
        let cfg: SplitConfig = serde_json::from_str(r#"{"strategy":"exhaustive"}"#).unwrap();
        assert_eq!(cfg.strategy, SearchStrategy::Exhaustive);
        assert_eq!(cfg.fast_search_threshold, DEFAULT_FAST_SEARCH_THRESHOLD);
    }
}
