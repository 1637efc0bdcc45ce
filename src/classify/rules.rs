//! Exclusion rule evaluation. Three passes in fixed order (multi-MAC, LLDP
//! capability, description keyword) fill a per-host accumulator; each touched
//! interface comes out as one record carrying every reason that fired.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::facts::{InterfaceDetail, LldpNeighbor};

use super::aggregate::InterfaceVendorMap;
use super::config::RuleConfig;
use super::normalize::normalize_or_raw;

pub const REASON_MULTIMAC: &str = "multimac";

/// Recommendation that one port be exempted from NAC enforcement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExclusionRecord {
    pub host: String,
    pub interface: String,
    /// Reasons in pass order; never empty once the record exists.
    pub reasons: Vec<String>,
    /// Raw port description, present when the keyword rule fired.
    pub description: Option<String>,
}

#[derive(Default)]
struct Accumulator {
    reasons: Vec<String>,
    description: Option<String>,
}

/// Run all three rules over one host's data. Interfaces touched by no rule
/// produce nothing; absence of a record means "include in NAC".
pub fn evaluate(
    host: &str,
    vendors: &InterfaceVendorMap,
    neighbors: &[LldpNeighbor],
    interfaces: &[InterfaceDetail],
    config: &RuleConfig,
) -> Vec<ExclusionRecord> {
    let mut acc: BTreeMap<String, Accumulator> = BTreeMap::new();
    let prefixes = &config.interface_prefixes;

    // Rule 1: more than one MAC behind a port means it is not a lone
    // endpoint, whether or not the vendors differ.
    for (interface, seen) in vendors {
        if seen.len() > 1 {
            acc.entry(interface.clone())
                .or_default()
                .reasons
                .push(REASON_MULTIMAC.to_string());
        }
    }

    // Rule 2: a neighbor advertising an infrastructure capability.
    for neighbor in neighbors {
        let infra = neighbor
            .remote_system_capab
            .iter()
            .any(|cap| config.capabilities.contains(cap));
        if infra {
            let key = normalize_or_raw(host, &neighbor.local_interface, prefixes);
            acc.entry(key)
                .or_default()
                .reasons
                .push(format!("LLDP Neighbor{:?}", neighbor.remote_system_capab));
        }
    }

    // Rule 3: infrastructure keywords in the port description.
    for detail in interfaces {
        let description = detail.description.to_lowercase();
        let matched = config
            .keywords
            .iter()
            .find(|keyword| description.contains(&keyword.to_lowercase()));
        if let Some(keyword) = matched {
            let key = normalize_or_raw(host, &detail.interface, prefixes);
            let entry = acc.entry(key).or_default();
            entry
                .reasons
                .push(format!("Description contains: {keyword}"));
            entry.description = Some(detail.description.clone());
        }
    }

    acc.into_iter()
        .map(|(interface, entry)| ExclusionRecord {
            host: host.to_string(),
            interface,
            reasons: entry.reasons,
            description: entry.description,
        })
        .collect()
}
