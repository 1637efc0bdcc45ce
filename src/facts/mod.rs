//! Device fact types shaped like the getter payloads switches report: identity
//! facts, MAC address table rows, LLDP neighbor detail, and interface status.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Device identity facts for one host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceFacts {
    #[serde(default)]
    pub vendor: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub os_version: String,
    #[serde(default)]
    pub serial_number: String,
    /// Uptime in seconds.
    #[serde(default)]
    pub uptime: f64,
    #[serde(default)]
    pub hostname: String,
}

/// One learned address from a switch MAC table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacEntry {
    pub mac: String,
    /// Empty when the address is not learned on a front-panel port
    /// (CPU/management entries); such rows are filtered, not errors.
    #[serde(default)]
    pub interface: String,
    #[serde(default)]
    pub vlan: i64,
}

/// One LLDP neighbor on a local port.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LldpNeighbor {
    /// Local port the neighbor was heard on; keyed outside the row itself.
    #[serde(skip)]
    pub local_interface: String,
    #[serde(default)]
    pub remote_chassis_id: String,
    #[serde(default)]
    pub remote_system_name: String,
    #[serde(default)]
    pub remote_system_description: String,
    #[serde(default)]
    pub remote_port: String,
    #[serde(default)]
    pub remote_port_description: String,
    /// Advertised capability set, e.g. ["bridge", "router"]. Required: a
    /// neighbor row without it is malformed and gets skipped.
    pub remote_system_capab: Vec<String>,
}

/// Status and description of one interface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceDetail {
    #[serde(skip)]
    pub interface: String,
    #[serde(default)]
    pub is_enabled: bool,
    #[serde(default)]
    pub is_up: bool,
    #[serde(default)]
    pub description: String,
    /// Link speed in Mbps.
    #[serde(default)]
    pub speed: f64,
}

/// Parse one raw getter row. A row missing a required field is dropped with a
/// console note so one bad row never sinks the rest of the host's data.
fn parse_row<T: DeserializeOwned>(host: &str, family: &str, row: Value) -> Option<T> {
    match serde_json::from_value(row) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            eprintln!("{host}: skipping malformed {family} row: {e}");
            None
        }
    }
}

/// Typed MAC table from raw `mac_address_table` rows.
pub fn mac_table(host: &str, rows: Vec<Value>) -> Vec<MacEntry> {
    rows.into_iter()
        .filter_map(|row| parse_row(host, "mac_address_table", row))
        .collect()
}

/// Typed neighbor list from raw `lldp_neighbors_detail`, which arrives keyed
/// by local port with one or more neighbor rows per port.
pub fn lldp_neighbors(host: &str, detail: BTreeMap<String, Vec<Value>>) -> Vec<LldpNeighbor> {
    let mut neighbors = Vec::new();
    for (local_interface, rows) in detail {
        for row in rows {
            if let Some(mut neighbor) =
                parse_row::<LldpNeighbor>(host, "lldp_neighbors_detail", row)
            {
                neighbor.local_interface = local_interface.clone();
                neighbors.push(neighbor);
            }
        }
    }
    neighbors
}

/// Typed interface list from the raw `interfaces` map, keyed by name.
pub fn interfaces(host: &str, table: BTreeMap<String, Value>) -> Vec<InterfaceDetail> {
    let mut details = Vec::new();
    for (name, row) in table {
        if let Some(mut detail) = parse_row::<InterfaceDetail>(host, "interfaces", row) {
            detail.interface = name;
            details.push(detail);
        }
    }
    details
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mac_table_parses_rows() {
        let rows = vec![
            json!({"mac": "00:1B:21:AA:BB:CC", "interface": "Gi1/0/1", "vlan": 10}),
            json!({"mac": "00:1B:21:AA:BB:CD", "interface": ""}),
        ];
        let table = mac_table("SW1", rows);
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].interface, "Gi1/0/1");
        assert_eq!(table[0].vlan, 10);
        assert!(table[1].interface.is_empty());
    }

    #[test]
    fn test_mac_table_skips_row_without_mac() {
        let rows = vec![
            json!({"interface": "Gi1/0/1"}),
            json!({"mac": "00:1B:21:AA:BB:CC", "interface": "Gi1/0/2"}),
        ];
        let table = mac_table("SW1", rows);
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].interface, "Gi1/0/2");
    }

    #[test]
    fn test_lldp_row_without_capability_is_skipped() {
        let mut detail = BTreeMap::new();
        detail.insert(
            "GigabitEthernet1/0/10".to_string(),
            vec![
                json!({"remote_system_name": "no-capab-field"}),
                json!({"remote_system_name": "core1", "remote_system_capab": ["bridge", "router"]}),
            ],
        );
        let neighbors = lldp_neighbors("SW1", detail);
        assert_eq!(neighbors.len(), 1);
        assert_eq!(neighbors[0].remote_system_name, "core1");
        assert_eq!(neighbors[0].local_interface, "GigabitEthernet1/0/10");
    }

    #[test]
    fn test_interfaces_keyed_by_name() {
        let mut table = BTreeMap::new();
        table.insert(
            "TenGigabitEthernet1/0/24".to_string(),
            json!({"is_enabled": true, "is_up": false, "description": "uplink", "speed": 10000.0}),
        );
        let details = interfaces("SW1", table);
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].interface, "TenGigabitEthernet1/0/24");
        assert!(details[0].is_enabled);
        assert!(!details[0].is_up);
        assert_eq!(details[0].description, "uplink");
    }
}
