//! MAC-vendor aggregation. Folds one host's MAC table into a map of
//! normalized interface name -> observed vendor labels, in table order.

use std::collections::BTreeMap;

use crate::facts::MacEntry;
use crate::oui::VendorLookup;

use super::config::PrefixRule;
use super::normalize::normalize_or_raw;

/// Vendor labels per normalized interface name, one label per observed MAC,
/// appended in observation order and never deduplicated. An interface with no
/// learned addresses is never a key.
pub type InterfaceVendorMap = BTreeMap<String, Vec<String>>;

/// One resolved MAC table row, kept for the raw report sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct MacVendorRow {
    /// Interface as the switch reported it, unnormalized.
    pub interface: String,
    pub mac: String,
    pub vendor: String,
}

/// Output of one aggregation pass over a host's MAC table.
#[derive(Debug, Default)]
pub struct MacAggregate {
    pub vendors: InterfaceVendorMap,
    pub rows: Vec<MacVendorRow>,
}

/// Aggregate a host's MAC table. Entries without an interface are filtered
/// (address not learned on a front-panel port); a failed vendor lookup
/// becomes "Unknown" and the pass keeps going.
pub fn aggregate(
    host: &str,
    entries: &[MacEntry],
    lookup: &dyn VendorLookup,
    prefixes: &[PrefixRule],
) -> MacAggregate {
    let mut result = MacAggregate::default();
    for entry in entries {
        if entry.interface.is_empty() {
            continue;
        }
        let vendor = lookup.lookup_or_unknown(&entry.mac);
        let key = normalize_or_raw(host, &entry.interface, prefixes);
        result.vendors.entry(key).or_default().push(vendor.clone());
        result.rows.push(MacVendorRow {
            interface: entry.interface.clone(),
            mac: entry.mac.clone(),
            vendor,
        });
    }
    result
}
