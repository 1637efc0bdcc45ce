//! Interface name normalization. Different getters report the same physical
//! port at different verbosity ("TenGigabitEthernet1/0/1" vs "Te1/0/1");
//! without one canonical spelling the per-port maps split into duplicate keys.

use thiserror::Error;

use super::config::PrefixRule;

/// A prefix-matched name with no trailing slot/port digits to carry over.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("malformed interface name: {0:?}")]
pub struct MalformedInterfaceName(pub String);

/// Canonicalize a raw interface name against the prefix table. Rules are
/// checked in table order so "TenGigabit" wins before an anchored "Gigabit"
/// gets a chance; names matching no rule pass through unchanged.
pub fn normalize(raw: &str, prefixes: &[PrefixRule]) -> Result<String, MalformedInterfaceName> {
    let lower = raw.to_lowercase();
    for rule in prefixes {
        let pattern = rule.pattern.to_lowercase();
        let matched = if rule.anchored {
            lower.starts_with(&pattern)
        } else {
            lower.contains(&pattern)
        };
        if matched {
            let suffix = trailing_port_suffix(raw);
            if suffix.chars().any(|c| c.is_ascii_digit()) {
                return Ok(format!("{}{}", rule.short, suffix));
            }
            return Err(MalformedInterfaceName(raw.to_string()));
        }
    }
    Ok(raw.to_string())
}

/// Normalize with the standing fallback: a malformed name is reported and the
/// raw spelling kept, so rule matching still gets a chance on it.
pub fn normalize_or_raw(host: &str, raw: &str, prefixes: &[PrefixRule]) -> String {
    match normalize(raw, prefixes) {
        Ok(name) => name,
        Err(e) => {
            eprintln!("{host}: {e}, keeping raw name");
            raw.to_string()
        }
    }
}

/// Maximal trailing run of digits and "/" characters, e.g. "1/0/24".
fn trailing_port_suffix(raw: &str) -> &str {
    let tail = raw
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit() || *c == '/')
        .count();
    // Digits and "/" are single-byte, so the char count is a byte count.
    &raw[raw.len() - tail..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::config::RuleConfig;

    fn prefixes() -> Vec<PrefixRule> {
        RuleConfig::default().interface_prefixes
    }

    #[test]
    fn test_long_forms_shorten() {
        assert_eq!(
            normalize("TenGigabitEthernet1/0/24", &prefixes()).unwrap(),
            "Te1/0/24"
        );
        assert_eq!(
            normalize("GigabitEthernet0/1", &prefixes()).unwrap(),
            "Gi0/1"
        );
        assert_eq!(
            normalize("TwoGigabitEthernet2/3", &prefixes()).unwrap(),
            "Tw2/3"
        );
        assert_eq!(
            normalize("Two-GigabitEthernet2/1", &prefixes()).unwrap(),
            "Tw2/1"
        );
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(
            normalize("tengigabitethernet1/0/1", &prefixes()).unwrap(),
            "Te1/0/1"
        );
    }

    #[test]
    fn test_unmatched_names_pass_through() {
        assert_eq!(normalize("Po1", &prefixes()).unwrap(), "Po1");
        assert_eq!(normalize("Vlan100", &prefixes()).unwrap(), "Vlan100");
    }

    #[test]
    fn test_gigabit_rule_is_anchored() {
        // "MgmtGigabitEthernet0" is nobody's front-panel Gi port.
        assert_eq!(
            normalize("MgmtGigabitEthernet0", &prefixes()).unwrap(),
            "MgmtGigabitEthernet0"
        );
    }

    #[test]
    fn test_no_digits_is_malformed() {
        assert_eq!(
            normalize("TenGigabitEthernet", &prefixes()),
            Err(MalformedInterfaceName("TenGigabitEthernet".to_string()))
        );
        // A run of slashes alone is not a port number.
        assert!(normalize("GigabitEthernet//", &prefixes()).is_err());
    }

    #[test]
    fn test_normalize_or_raw_keeps_raw_on_error() {
        assert_eq!(
            normalize_or_raw("SW1", "TenGigabitEthernet", &prefixes()),
            "TenGigabitEthernet"
        );
    }
}
