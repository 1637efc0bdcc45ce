//! MAC OUI vendor resolution. Wraps the bundled IEEE registry behind a small
//! trait so the classification engine can be driven by a stub in tests.

use mac_oui::Oui;
use thiserror::Error;

/// Vendor label substituted whenever a lookup fails or finds nothing.
pub const UNKNOWN_VENDOR: &str = "Unknown";

#[derive(Debug, Error)]
pub enum OuiError {
    #[error("failed to load OUI database: {0}")]
    Load(String),
    #[error("vendor lookup failed for {mac}: {reason}")]
    Lookup { mac: String, reason: String },
}

/// Resolves a MAC address to its registered vendor name.
pub trait VendorLookup {
    /// Look up the OUI vendor for a MAC address. `Ok(None)` means the prefix
    /// is simply unregistered; `Err` means the lookup itself failed.
    fn lookup(&self, mac: &str) -> Result<Option<String>, OuiError>;

    /// Lookup with the standing substitution: any failure or miss becomes
    /// the literal "Unknown" so one bad address never stops a pass.
    fn lookup_or_unknown(&self, mac: &str) -> String {
        match self.lookup(mac) {
            Ok(Some(vendor)) => vendor,
            Ok(None) => UNKNOWN_VENDOR.to_string(),
            Err(e) => {
                eprintln!("OUI lookup failed: {e}");
                UNKNOWN_VENDOR.to_string()
            }
        }
    }
}

/// The bundled IEEE OUI registry.
pub struct OuiDb {
    db: Oui,
}

impl OuiDb {
    pub fn load() -> Result<Self, OuiError> {
        let db = Oui::default().map_err(|e| OuiError::Load(format!("{e}")))?;
        Ok(OuiDb { db })
    }
}

impl VendorLookup for OuiDb {
    fn lookup(&self, mac: &str) -> Result<Option<String>, OuiError> {
        match self.db.lookup_by_mac(mac) {
            Ok(Some(entry)) => Ok(Some(entry.company_name.clone())),
            Ok(None) => Ok(None),
            Err(e) => Err(OuiError::Lookup {
                mac: mac.to_string(),
                reason: format!("{e}"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapLookup(HashMap<String, String>);

    impl VendorLookup for MapLookup {
        fn lookup(&self, mac: &str) -> Result<Option<String>, OuiError> {
            match self.0.get(mac) {
                Some(vendor) => Ok(Some(vendor.clone())),
                None => Err(OuiError::Lookup {
                    mac: mac.to_string(),
                    reason: "not in test map".to_string(),
                }),
            }
        }
    }

    #[test]
    fn test_lookup_or_unknown_substitutes_on_failure() {
        let lookup = MapLookup(HashMap::from([(
            "00:50:56:aa:bb:cc".to_string(),
            "VMware, Inc.".to_string(),
        )]));
        assert_eq!(lookup.lookup_or_unknown("00:50:56:aa:bb:cc"), "VMware, Inc.");
        assert_eq!(lookup.lookup_or_unknown("not-a-mac"), UNKNOWN_VENDOR);
    }
}
