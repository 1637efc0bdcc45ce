//! Host inventory. A TOML file of switches with site/role attributes, and the
//! filters that pick which of them a run should target.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("failed to read inventory {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse inventory {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// One switch in the inventory.
#[derive(Debug, Clone, Deserialize)]
pub struct Host {
    /// Inventory key, filled from the map key on load.
    #[serde(skip)]
    pub name: String,
    /// Management address or DNS name.
    pub hostname: String,
    #[serde(default)]
    pub site: String,
    #[serde(default)]
    pub role: String,
}

/// Selection applied before a run; empty fields match everything.
#[derive(Debug, Clone, Default)]
pub struct HostFilter {
    pub site: Option<String>,
    pub role: Option<String>,
    pub name: Option<String>,
}

impl HostFilter {
    fn matches(&self, host: &Host) -> bool {
        let field_matches =
            |want: &Option<String>, have: &str| want.as_deref().is_none_or(|w| w == have);
        field_matches(&self.site, &host.site)
            && field_matches(&self.role, &host.role)
            && field_matches(&self.name, &host.name)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Inventory {
    #[serde(default)]
    hosts: BTreeMap<String, Host>,
}

impl Inventory {
    pub fn load(path: &Path) -> Result<Self, InventoryError> {
        let content = fs::read_to_string(path).map_err(|source| InventoryError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let inventory: Inventory =
            toml::from_str(&content).map_err(|source| InventoryError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        Ok(inventory)
    }

    /// Hosts passing the filter, names filled in, in inventory order.
    pub fn select(&self, filter: &HostFilter) -> Vec<Host> {
        self.hosts
            .iter()
            .map(|(name, host)| {
                let mut host = host.clone();
                host.name = name.clone();
                host
            })
            .filter(|host| filter.matches(host))
            .collect()
    }
}
