// SPDX-License-Identifier: Apache-2.0

//! Credential provider abstraction.
//!
//! Secrets are never read from module-level constants by the operations in
//! this crate. Callers hand a [`CredentialProvider`] (or the [`Credentials`]
//! it yields) to the constructors that need one. [`ConfigCredentialProvider`]
//! resolves them from loaded configuration; tests and embedders can supply
//! their own implementation.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

use crate::config::AppConfig;

/// Identifier used for the API bearer credential.
pub const API_CREDENTIAL_ID: &str = "api";

/// An identifier/secret pair.
#[derive(Clone)]
pub struct Credentials {
    identifier: String,
    secret: SecretString,
}

impl Credentials {
    /// Creates a credential pair.
    pub fn new(identifier: impl Into<String>, secret: SecretString) -> Self {
        Self {
            identifier: identifier.into(),
            secret,
        }
    }

    /// The public half of the pair (user name, key id).
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The secret half of the pair.
    #[must_use]
    pub fn secret(&self) -> &SecretString {
        &self.secret
    }

    /// Exact comparison against a candidate pair.
    ///
    /// An empty stored secret never matches.
    #[must_use]
    pub fn matches(&self, identifier: &str, secret: &str) -> bool {
        let stored = self.secret.expose_secret();
        !stored.is_empty() && self.identifier == identifier && stored == secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Provides the credentials used by sampleapp operations.
pub trait CredentialProvider: Send + Sync {
    /// Bearer credential for the remote API.
    fn api_credentials(&self) -> Credentials;

    /// Administrator account checked by the auth manager.
    fn admin_credentials(&self) -> Credentials;
}

/// Resolves credentials from an [`AppConfig`].
pub struct ConfigCredentialProvider<'a> {
    config: &'a AppConfig,
}

impl<'a> ConfigCredentialProvider<'a> {
    /// Wraps a loaded configuration.
    #[must_use]
    pub fn new(config: &'a AppConfig) -> Self {
        Self { config }
    }
}

impl CredentialProvider for ConfigCredentialProvider<'_> {
    fn api_credentials(&self) -> Credentials {
        Credentials::new(API_CREDENTIAL_ID, self.config.api.token.clone())
    }

    fn admin_credentials(&self) -> Credentials {
        Credentials::new(
            self.config.security.admin_user.clone(),
            self.config.security.admin_password.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_match_exactly() {
        let creds = Credentials::new("admin", SecretString::from("admin123"));

        assert!(creds.matches("admin", "admin123"));
        assert!(!creds.matches("admin", "admin1234"));
        assert!(!creds.matches("Admin", "admin123"));
    }

    #[test]
    fn test_empty_secret_never_matches() {
        let creds = Credentials::new("", SecretString::from(""));
        assert!(!creds.matches("", ""));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let creds = Credentials::new("admin", SecretString::from("admin123"));
        let debug = format!("{creds:?}");

        assert!(debug.contains("admin"));
        assert!(!debug.contains("admin123"));
    }

    #[test]
    fn test_config_provider_reads_defaults() {
        let config = AppConfig::default();
        let provider = ConfigCredentialProvider::new(&config);

        let api = provider.api_credentials();
        assert_eq!(api.identifier(), API_CREDENTIAL_ID);
        assert_eq!(api.secret().expose_secret(), "secret-key-hardcoded");

        let admin = provider.admin_credentials();
        assert!(admin.matches("admin", "admin123"));
    }
}
