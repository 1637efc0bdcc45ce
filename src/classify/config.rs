//! Rule configuration. Keyword set, capability set, and the interface-prefix
//! table are data, not code: loadable from TOML with working defaults.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read rules file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse rules file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid rules: {0}")]
    Invalid(String),
}

/// One interface-prefix rewrite, e.g. "TenGigabitEthernet1/0/24" -> "Te1/0/24".
#[derive(Debug, Clone, Deserialize)]
pub struct PrefixRule {
    /// Long-form fragment to look for, e.g. "TenGigabit". Case-insensitive.
    pub pattern: String,
    /// Canonical short replacement, e.g. "Te".
    pub short: String,
    /// When true the fragment must start the name. "Gigabit" needs this so it
    /// does not also hit "TenGigabitEthernet".
    #[serde(default)]
    pub anchored: bool,
}

/// Configuration for the three exclusion rules and the name normalizer.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Description keywords, matched case-insensitively as substrings.
    pub keywords: Vec<String>,
    /// LLDP remote capabilities that mark an infrastructure neighbor.
    pub capabilities: BTreeSet<String>,
    /// Prefix rewrites, checked in order; first match wins.
    pub interface_prefixes: Vec<PrefixRule>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        let prefix = |pattern: &str, short: &str, anchored: bool| PrefixRule {
            pattern: pattern.to_string(),
            short: short.to_string(),
            anchored,
        };
        RuleConfig {
            keywords: [
                "ASR", "ENCS", "UPLINK", "CIRCUIT", "ISP", "SWITCH", "TRUNK", "ESXI", "VMWARE",
            ]
            .iter()
            .map(|k| k.to_string())
            .collect(),
            capabilities: BTreeSet::from(["router".to_string(), "bridge".to_string()]),
            interface_prefixes: vec![
                prefix("TenGigabit", "Te", false),
                prefix("TwoGigabit", "Tw", false),
                // Some platforms spell 2.5G ports with a hyphen.
                prefix("Two-Gigabit", "Tw", false),
                prefix("Gigabit", "Gi", true),
            ],
        }
    }
}

impl RuleConfig {
    /// Load rules from a TOML file. Missing sections fall back to defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: RuleConfig =
            toml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for rule in &self.interface_prefixes {
            if rule.pattern.is_empty() || rule.short.is_empty() {
                return Err(ConfigError::Invalid(
                    "interface prefix rules need a pattern and a short form".to_string(),
                ));
            }
        }
        if self.keywords.iter().any(|k| k.is_empty()) {
            return Err(ConfigError::Invalid(
                "empty description keyword".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_the_stock_rules() {
        let config = RuleConfig::default();
        assert!(config.keywords.iter().any(|k| k == "UPLINK"));
        assert!(config.capabilities.contains("router"));
        assert!(config.capabilities.contains("bridge"));
        // TenGigabit must be checked before the anchored Gigabit rule.
        assert_eq!(config.interface_prefixes[0].pattern, "TenGigabit");
        assert!(config.interface_prefixes.last().unwrap().anchored);
    }

    #[test]
    fn test_parse_toml_overrides() {
        let config: RuleConfig = toml::from_str(
            r#"
            keywords = ["UPLINK", "MDF"]
            capabilities = ["router"]

            [[interface_prefixes]]
            pattern = "FortyGigabit"
            short = "Fo"
            "#,
        )
        .unwrap();
        assert_eq!(config.keywords, vec!["UPLINK", "MDF"]);
        assert!(!config.capabilities.contains("bridge"));
        assert_eq!(config.interface_prefixes.len(), 1);
        assert!(!config.interface_prefixes[0].anchored);
    }

    #[test]
    fn test_validate_rejects_empty_prefix() {
        let config: RuleConfig = toml::from_str(
            r#"
            [[interface_prefixes]]
            pattern = ""
            short = "Xx"
            "#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }
}
