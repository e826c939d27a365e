// SPDX-License-Identifier: Apache-2.0

//! Compliance audit of the built configuration records.
//!
//! Maps each defect of the sample to the control it violates. Findings are
//! informational; nothing is blocked.

use std::fmt;

use secrecy::ExposeSecret;
use serde::{Serialize, Serializer};

use crate::database::DatabaseConfig;
use crate::fetch::RemoteRequestConfig;
use crate::network::NetworkConfig;
use crate::samples::is_sample_secret;
use crate::security::SecurityManager;

/// Compliance control identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Control {
    /// Account management (hardcoded credentials).
    Ac2,
    /// Access enforcement (overly permissive network access).
    Ac3,
    /// Transmission confidentiality (unencrypted transport).
    Sc8,
    /// Cryptographic protection (encryption disabled).
    Sc13,
}

impl Control {
    /// Control identifier, e.g. `AC-2`.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Control::Ac2 => "AC-2",
            Control::Ac3 => "AC-3",
            Control::Sc8 => "SC-8",
            Control::Sc13 => "SC-13",
        }
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl Serialize for Control {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

/// Severity level of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Credential exposure or unrestricted access.
    High,
    /// Weakened protection.
    Medium,
}

/// A control violation found in a configuration record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Violated control.
    pub control: Control,
    /// Severity level.
    pub severity: Severity,
    /// Human-readable description of the issue.
    pub description: String,
}

impl Finding {
    fn new(control: Control, severity: Severity, description: impl Into<String>) -> Self {
        Self {
            control,
            severity,
            description: description.into(),
        }
    }
}

/// Audits the remote request.
#[must_use]
pub fn audit_request(request: &RemoteRequestConfig) -> Vec<Finding> {
    let mut findings = Vec::new();
    if !request.is_encrypted() {
        findings.push(Finding::new(
            Control::Sc8,
            Severity::High,
            format!("Unencrypted HTTP connection to {}", request.url),
        ));
    }
    if !request.verify_tls {
        findings.push(Finding::new(
            Control::Sc8,
            Severity::Medium,
            "TLS certificate verification is disabled",
        ));
    }
    if is_sample_secret(request.token()) {
        findings.push(Finding::new(
            Control::Ac2,
            Severity::High,
            "Hardcoded API bearer token",
        ));
    }
    findings
}

/// Audits the database config.
#[must_use]
pub fn audit_database(config: &DatabaseConfig) -> Vec<Finding> {
    let mut findings = Vec::new();
    if is_sample_secret(config.password().expose_secret()) {
        findings.push(Finding::new(
            Control::Ac2,
            Severity::High,
            format!("Hardcoded password for database user '{}'", config.user),
        ));
    }
    if !config.encryption_enabled {
        findings.push(Finding::new(
            Control::Sc13,
            Severity::Medium,
            "Database encryption is disabled",
        ));
    }
    findings
}

/// Audits the network config.
#[must_use]
pub fn audit_network(config: &NetworkConfig) -> Vec<Finding> {
    let mut findings = Vec::new();
    if config.permits_any_source() {
        findings.push(Finding::new(
            Control::Ac3,
            Severity::High,
            "Inbound traffic permitted from any source",
        ));
    }
    if config.allow_all {
        findings.push(Finding::new(
            Control::Ac3,
            Severity::High,
            "Firewall allows all traffic",
        ));
    }
    findings
}

/// Audits the auth manager.
#[must_use]
pub fn audit_security(manager: &SecurityManager) -> Vec<Finding> {
    let mut findings = Vec::new();
    if is_sample_secret(manager.admin().secret().expose_secret()) {
        findings.push(Finding::new(
            Control::Ac2,
            Severity::High,
            format!(
                "Hardcoded password for admin account '{}'",
                manager.admin().identifier()
            ),
        ));
    }
    if !manager.encryption_enabled() {
        findings.push(Finding::new(
            Control::Sc13,
            Severity::Medium,
            "Data encryption is disabled",
        ));
    }
    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Credentials;
    use crate::config::{DatabaseSettings, NetworkSettings};
    use crate::database::{build_database_config, build_hardened_database_config};
    use crate::network::{build_network_config, build_restricted_network_config};
    use secrecy::SecretString;

    fn controls(findings: &[Finding]) -> Vec<Control> {
        findings.iter().map(|f| f.control).collect()
    }

    #[test]
    fn test_audit_sample_request() {
        let creds = Credentials::new("api", SecretString::from("secret-key-hardcoded"));
        let request = RemoteRequestConfig::new("http://api.internal.com", &creds, false);

        assert_eq!(
            controls(&audit_request(&request)),
            vec![Control::Sc8, Control::Sc8, Control::Ac2]
        );
    }

    #[test]
    fn test_audit_clean_request() {
        let creds = Credentials::new("api", SecretString::from("injected"));
        let request = RemoteRequestConfig::new("https://api.example.com", &creds, true);

        assert!(audit_request(&request).is_empty());
    }

    #[test]
    fn test_audit_database() {
        let sample = build_database_config(&DatabaseSettings::default());
        assert_eq!(
            controls(&audit_database(&sample)),
            vec![Control::Ac2, Control::Sc13]
        );

        let hardened = build_hardened_database_config(&DatabaseSettings {
            password: SecretString::from("injected"),
            ..DatabaseSettings::default()
        });
        assert!(audit_database(&hardened).is_empty());
    }

    #[test]
    fn test_audit_network() {
        assert_eq!(
            controls(&audit_network(&build_network_config())),
            vec![Control::Ac3, Control::Ac3]
        );
        let restricted = build_restricted_network_config(&NetworkSettings::default());
        assert!(audit_network(&restricted).is_empty());
    }

    #[test]
    fn test_audit_security() {
        let mgr = SecurityManager::new(
            Credentials::new("admin", SecretString::from("admin123")),
            false,
        );
        assert_eq!(
            controls(&audit_security(&mgr)),
            vec![Control::Ac2, Control::Sc13]
        );
    }

    #[test]
    fn test_control_serializes_as_id() {
        let json = serde_json::to_string(&Control::Sc13).expect("serialize");
        assert_eq!(json, "\"SC-13\"");
    }
}
