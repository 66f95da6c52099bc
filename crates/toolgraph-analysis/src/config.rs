//! Analysis configuration.

use serde::{Deserialize, Serialize};

/// How computed names with no definition are treated by the closure resolver.
///
/// Either way the reference is reported as a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedPolicy {
    /// Keep the unresolved name in the closure and in the tool group's
    /// internal computed list.
    #[default]
    Include,
    /// Drop the unresolved name from the closure.
    Exclude,
}

/// Tunables for a single [`analyze_with_config`](crate::analyze_with_config) run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub unresolved: UnresolvedPolicy,
}

impl AnalysisConfig {
    /// Configuration that excludes unresolved computed names from closures.
    pub fn strict() -> Self {
        AnalysisConfig {
            unresolved: UnresolvedPolicy::Exclude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_includes_unresolved() {
        assert_eq!(AnalysisConfig::default().unresolved, UnresolvedPolicy::Include);
        assert_eq!(AnalysisConfig::strict().unresolved, UnresolvedPolicy::Exclude);
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: AnalysisConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AnalysisConfig::default());

        let config: AnalysisConfig = serde_json::from_str(r#"{"unresolved": "exclude"}"#).unwrap();
        assert_eq!(config, AnalysisConfig::strict());
    }
}
