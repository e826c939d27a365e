// SPDX-License-Identifier: Apache-2.0

//! Credential/auth manager.
//!
//! WARNING: neither operation here is real security. `authenticate` is a plain
//! string comparison and `encrypt` is either the identity function or a fixed
//! tag. Both exist to be flagged by compliance scanners.

use serde::Serialize;
use tracing::warn;

use crate::auth::{CredentialProvider, Credentials};

/// Tag prepended by [`SecurityManager::encrypt`] when encryption is enabled.
pub const ENCRYPTED_TAG: &str = "encrypted_";

/// Warning emitted when data passes through unencrypted.
pub const ENCRYPTION_DISABLED_WARNING: &str = "Encryption is disabled!";

/// Output of [`SecurityManager::encrypt`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sealed {
    /// Resulting data (unchanged input when encryption is off).
    pub data: String,
    /// Set exactly once when the data was passed through unencrypted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<&'static str>,
}

/// Holds the administrator credentials and the encryption flag.
#[derive(Debug, Clone)]
pub struct SecurityManager {
    admin: Credentials,
    encryption_enabled: bool,
}

impl SecurityManager {
    /// Creates a manager for the given admin credentials.
    #[must_use]
    pub fn new(admin: Credentials, encryption_enabled: bool) -> Self {
        Self {
            admin,
            encryption_enabled,
        }
    }

    /// Creates a manager from a credential provider.
    #[must_use]
    pub fn from_provider(provider: &dyn CredentialProvider, encryption_enabled: bool) -> Self {
        Self::new(provider.admin_credentials(), encryption_enabled)
    }

    /// The stored administrator credentials.
    #[must_use]
    pub fn admin(&self) -> &Credentials {
        &self.admin
    }

    /// Whether `encrypt` tags its input.
    #[must_use]
    pub fn encryption_enabled(&self) -> bool {
        self.encryption_enabled
    }

    /// Returns true iff both fields exactly match the stored credentials.
    #[must_use]
    pub fn authenticate(&self, username: &str, password: &str) -> bool {
        self.admin.matches(username, password)
    }

    /// Placeholder encryption.
    ///
    /// Disabled: returns `data` unchanged with one warning. Enabled: returns
    /// `"encrypted_" + data`.
    #[must_use]
    pub fn encrypt(&self, data: &str) -> Sealed {
        if self.encryption_enabled {
            Sealed {
                data: format!("{ENCRYPTED_TAG}{data}"),
                warning: None,
            }
        } else {
            warn!("{ENCRYPTION_DISABLED_WARNING}");
            Sealed {
                data: data.to_string(),
                warning: Some(ENCRYPTION_DISABLED_WARNING),
            }
        }
    }
}
