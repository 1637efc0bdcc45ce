//! Port classification engine. Takes one host's already-collected facts and
//! decides which ports to recommend excluding from the 802.1x rollout.
//! Pure per-host transformation: no I/O, no state shared between hosts.

pub mod aggregate;
pub mod config;
pub mod normalize;
pub mod rules;

pub use aggregate::{InterfaceVendorMap, MacVendorRow, aggregate};
pub use config::{PrefixRule, RuleConfig};
pub use normalize::{MalformedInterfaceName, normalize, normalize_or_raw};
pub use rules::{ExclusionRecord, REASON_MULTIMAC, evaluate};

use crate::facts::{InterfaceDetail, LldpNeighbor, MacEntry};
use crate::oui::VendorLookup;

/// Everything the engine derives from one host's facts.
#[derive(Debug)]
pub struct Classification {
    pub vendors: InterfaceVendorMap,
    /// Resolved MAC table rows, raw interface spellings, for the report.
    pub mac_rows: Vec<MacVendorRow>,
    pub exclusions: Vec<ExclusionRecord>,
}

/// Classify one host: aggregate the MAC table, then run the exclusion rules
/// over the vendor map, LLDP neighbors, and interface descriptions.
pub fn classify_host(
    host: &str,
    mac_table: &[MacEntry],
    neighbors: &[LldpNeighbor],
    interfaces: &[InterfaceDetail],
    config: &RuleConfig,
    lookup: &dyn VendorLookup,
) -> Classification {
    let agg = aggregate(host, mac_table, lookup, &config.interface_prefixes);
    let exclusions = evaluate(host, &agg.vendors, neighbors, interfaces, config);
    Classification {
        vendors: agg.vendors,
        mac_rows: agg.rows,
        exclusions,
    }
}
