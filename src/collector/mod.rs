//! Fact collection boundary. A `FactsSource` hands back every fact family for
//! one host by name; failure is per host, and a failed host simply drops out
//! of classification. The shipped source reads per-host JSON snapshots laid
//! down by whatever drives the switches, keeping transport out of this tool.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::facts::{self, DeviceFacts, InterfaceDetail, LldpNeighbor, MacEntry};
use crate::inventory::Host;

#[derive(Debug, Error)]
pub enum CollectError {
    #[error("host {host} unreachable or failed: {reason}")]
    HostFailed { host: String, reason: String },
}

impl CollectError {
    fn failed(host: &Host, reason: impl std::fmt::Display) -> Self {
        CollectError::HostFailed {
            host: host.name.clone(),
            reason: reason.to_string(),
        }
    }
}

/// Every fact family for one healthy host, already typed. Each family has its
/// own field; nothing downstream ever indexes into a result list by position.
#[derive(Debug)]
pub struct HostFacts {
    pub host: String,
    pub facts: DeviceFacts,
    pub mac_table: Vec<MacEntry>,
    pub lldp_neighbors: Vec<LldpNeighbor>,
    pub interfaces: Vec<InterfaceDetail>,
}

/// Supplies per-host facts. Implementations fail whole hosts, never rows;
/// row-level noise is handled inside the fact parsers.
pub trait FactsSource: Send + Sync {
    fn collect(&self, host: &Host) -> Result<HostFacts, CollectError>;
}

/// On-disk getter payload for one host, everything in one document.
#[derive(Deserialize)]
struct Snapshot {
    facts: DeviceFacts,
    #[serde(default)]
    mac_address_table: Vec<Value>,
    #[serde(default)]
    lldp_neighbors_detail: BTreeMap<String, Vec<Value>>,
    #[serde(default)]
    interfaces: BTreeMap<String, Value>,
}

/// Reads `<dir>/<host name>.json` snapshot files.
pub struct SnapshotSource {
    dir: PathBuf,
}

impl SnapshotSource {
    pub fn new(dir: PathBuf) -> Self {
        SnapshotSource { dir }
    }
}

impl FactsSource for SnapshotSource {
    fn collect(&self, host: &Host) -> Result<HostFacts, CollectError> {
        let path = self.dir.join(format!("{}.json", host.name));
        let content = fs::read_to_string(&path).map_err(|e| {
            CollectError::failed(host, format!("cannot read {}: {e}", path.display()))
        })?;
        let snapshot: Snapshot = serde_json::from_str(&content).map_err(|e| {
            CollectError::failed(host, format!("bad snapshot {}: {e}", path.display()))
        })?;
        Ok(HostFacts {
            host: host.name.clone(),
            facts: snapshot.facts,
            mac_table: facts::mac_table(&host.name, snapshot.mac_address_table),
            lldp_neighbors: facts::lldp_neighbors(&host.name, snapshot.lldp_neighbors_detail),
            interfaces: facts::interfaces(&host.name, snapshot.interfaces),
        })
    }
}
