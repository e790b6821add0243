// Industry exclusion configuration from config/exclusions.yaml
//
// Named categories of NAICS codes to hide from display without rerunning
// the upstream pipeline, e.g.:
//
//   public_education:
//     enabled: true
//     naics_codes: ["61111001", "61111002"]

use std::collections::BTreeMap;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExclusionRule {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub naics_codes: Vec<String>,
}

/// Whole exclusions file; absent file means no exclusions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExclusionConfig {
    pub categories: BTreeMap<String, ExclusionRule>,
}

impl ExclusionConfig {
    /// NAICS codes excluded by every enabled category
    pub fn excluded_naics_codes(&self) -> HashSet<&str> {
        self.categories
            .values()
            .filter(|rule| rule.enabled)
            .flat_map(|rule| rule.naics_codes.iter())
            .map(|code| code.trim())
            .collect()
    }

    pub fn excludes(&self, naics: &str) -> bool {
        self.excluded_naics_codes().contains(naics.trim())
    }

    pub fn is_empty(&self) -> bool {
        self.excluded_naics_codes().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_from_yaml(yaml: &str) -> ExclusionConfig {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_enabled_category_excludes_codes() {
        let config = config_from_yaml(
            "public_education:\n  enabled: true\n  naics_codes:\n    - \"61111001\"\n    - \"61111002\"\n",
        );

        assert!(config.excludes("61111001"));
        assert!(config.excludes(" 61111002 "));
        assert!(!config.excludes("56172001"));
    }

    #[test]
    fn test_disabled_category_is_inert() {
        let config = config_from_yaml(
            "public_education:\n  enabled: false\n  naics_codes:\n    - \"61111001\"\n",
        );

        assert!(!config.excludes("61111001"));
        assert!(config.is_empty());
    }

    #[test]
    fn test_multiple_categories_union() {
        let config = config_from_yaml(
            "public_education:\n  enabled: true\n  naics_codes: [\"61111001\"]\ngovernment_facilities:\n  enabled: true\n  naics_codes: [\"92811001\"]\n",
        );

        let codes = config.excluded_naics_codes();
        assert_eq!(codes.len(), 2);
        assert!(codes.contains("92811001"));
    }

    #[test]
    fn test_default_is_empty() {
        assert!(ExclusionConfig::default().is_empty());
    }
}
