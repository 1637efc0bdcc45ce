//! Builders for synthetic switch facts used across the unit tests.

use std::collections::HashMap;

use crate::facts::{InterfaceDetail, LldpNeighbor, MacEntry};
use crate::oui::{OuiError, VendorLookup};

/// Fixed MAC->vendor table; any address not listed fails the lookup, which
/// exercises the "Unknown" substitution path.
pub struct StaticVendors(HashMap<String, String>);

impl StaticVendors {
    pub fn new(pairs: &[(&str, &str)]) -> Self {
        StaticVendors(
            pairs
                .iter()
                .map(|(mac, vendor)| (mac.to_string(), vendor.to_string()))
                .collect(),
        )
    }
}

impl VendorLookup for StaticVendors {
    fn lookup(&self, mac: &str) -> Result<Option<String>, OuiError> {
        match self.0.get(mac) {
            Some(vendor) => Ok(Some(vendor.clone())),
            None => Err(OuiError::Lookup {
                mac: mac.to_string(),
                reason: "not in test table".to_string(),
            }),
        }
    }
}

pub fn mac_entry(interface: &str, mac: &str) -> MacEntry {
    MacEntry {
        mac: mac.to_string(),
        interface: interface.to_string(),
        vlan: 1,
    }
}

pub fn lldp_neighbor(local_interface: &str, capabilities: &[&str]) -> LldpNeighbor {
    LldpNeighbor {
        local_interface: local_interface.to_string(),
        remote_chassis_id: "00:1b:21:aa:bb:cc".to_string(),
        remote_system_name: "neighbor".to_string(),
        remote_system_description: String::new(),
        remote_port: "Gi0/0".to_string(),
        remote_port_description: String::new(),
        remote_system_capab: capabilities.iter().map(|c| c.to_string()).collect(),
    }
}

pub fn interface_detail(interface: &str, description: &str) -> InterfaceDetail {
    InterfaceDetail {
        interface: interface.to_string(),
        is_enabled: true,
        is_up: true,
        description: description.to_string(),
        speed: 1000.0,
    }
}
