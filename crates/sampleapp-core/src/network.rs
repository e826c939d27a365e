// SPDX-License-Identifier: Apache-2.0

//! Network/firewall configuration builders.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::config::NetworkSettings;

/// IPv4 "any source" CIDR.
pub const ANY_SOURCE: &str = "0.0.0.0/0";

/// Source markers that mean "anywhere".
const ANY_SOURCE_MARKERS: &[&str] = &[ANY_SOURCE, "::/0", "*", "any"];

/// Ports the sample opens inbound.
pub const SAMPLE_PORTS: &[u16] = &[80, 443, 22, 3306];

/// Returns true if `source` permits traffic from anywhere.
#[must_use]
pub fn is_any_source(source: &str) -> bool {
    let source = source.trim();
    ANY_SOURCE_MARKERS
        .iter()
        .any(|marker| marker.eq_ignore_ascii_case(source))
}

/// Returns true if `source` names a concrete, non-blank source.
#[must_use]
pub fn is_restricted_source(source: &str) -> bool {
    !source.trim().is_empty() && !is_any_source(source)
}

/// Inbound firewall rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkConfig {
    /// Transport protocol of the inbound rule.
    pub protocol: String,
    /// Sources allowed inbound (CIDRs or markers).
    pub allowed_sources: BTreeSet<String>,
    /// Inbound ports, in rule order.
    pub ports: Vec<u16>,
    /// Accept everything regardless of source/port.
    pub allow_all: bool,
    /// Service is exposed publicly.
    pub public_access: bool,
}

impl NetworkConfig {
    /// True when any allowed source is an "anywhere" marker.
    #[must_use]
    pub fn permits_any_source(&self) -> bool {
        self.allowed_sources.iter().any(|s| is_any_source(s))
    }
}

/// Builds the sample's open firewall config.
#[must_use]
pub fn build_network_config() -> NetworkConfig {
    NetworkConfig {
        protocol: "tcp".to_string(),
        allowed_sources: [ANY_SOURCE, "public_ip"]
            .into_iter()
            .map(String::from)
            .collect(),
        ports: SAMPLE_PORTS.to_vec(),
        allow_all: true,
        public_access: true,
    }
}

/// Builds a restricted firewall config from settings.
///
/// "Anywhere" markers are dropped from the configured sources.
#[must_use]
pub fn build_restricted_network_config(settings: &NetworkSettings) -> NetworkConfig {
    NetworkConfig {
        protocol: "tcp".to_string(),
        allowed_sources: settings
            .allowed_sources
            .iter()
            .map(|s| s.trim())
            .filter(|s| is_restricted_source(s))
            .map(String::from)
            .collect(),
        ports: settings.ports.clone(),
        allow_all: false,
        public_access: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_network_config_is_open() {
        let config = build_network_config();

        assert!(config.allowed_sources.contains(ANY_SOURCE));
        assert!(config.allow_all);
        assert!(config.public_access);
        assert!(config.permits_any_source());
        assert_eq!(config.ports, vec![80, 443, 22, 3306]);
        assert_eq!(config.protocol, "tcp");
    }

    #[test]
    fn test_is_any_source() {
        assert!(is_any_source("0.0.0.0/0"));
        assert!(is_any_source(" ::/0 "));
        assert!(is_any_source("ANY"));
        assert!(!is_any_source("10.0.0.0/8"));
        assert!(!is_any_source("public_ip"));
    }

    #[test]
    fn test_is_restricted_source() {
        assert!(is_restricted_source("10.0.0.0/8"));
        assert!(!is_restricted_source(""));
        assert!(!is_restricted_source("   "));
        assert!(!is_restricted_source("*"));
    }

    #[test]
    fn test_restricted_config_drops_any_source() {
        let settings = NetworkSettings {
            allowed_sources: vec![
                "10.0.0.0/8".to_string(),
                "0.0.0.0/0".to_string(),
                "192.168.1.0/24".to_string(),
                String::new(),
            ],
            ports: vec![443, 8443],
        };

        let config = build_restricted_network_config(&settings);

        assert!(!config.permits_any_source());
        assert!(!config.allow_all);
        assert!(!config.public_access);
        assert_eq!(config.allowed_sources.len(), 2);
        assert_eq!(config.ports, vec![443, 8443]);
    }
}
