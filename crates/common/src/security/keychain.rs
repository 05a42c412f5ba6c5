//! Platform keychain provider for secret storage
//!
//! Thin wrapper over the platform keychain: macOS Keychain Access, Windows
//! Credential Manager and the Linux Secret Service API.
//!
//! ```no_run
//! use daybook_common::security::KeychainProvider;
//!
//! let keychain = KeychainProvider::new("Daybook.google");
//! keychain.set_secret("googleAccessToken", "ya29.token")?;
//! assert_eq!(keychain.get_secret("googleAccessToken")?.as_deref(), Some("ya29.token"));
//! # Ok::<(), daybook_common::security::KeychainError>(())
//! ```

use keyring::Entry;
use thiserror::Error;
use tracing::debug;

/// Keychain failures
#[derive(Debug, Error)]
pub enum KeychainError {
    #[error("keychain access failed: {0}")]
    AccessFailed(String),
}

/// Secrets stored under one keychain service name
#[derive(Debug, Clone)]
pub struct KeychainProvider {
    service_name: String,
}

impl KeychainProvider {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self { service_name: service_name.into() }
    }

    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn set_secret(&self, key: &str, value: &str) -> Result<(), KeychainError> {
        debug!(service = %self.service_name, key = %key, "Storing secret in keychain");

        self.entry(key)?
            .set_password(value)
            .map_err(|e| KeychainError::AccessFailed(format!("Failed to store secret for {key}: {e}")))
    }

    /// `Ok(None)` when no entry exists
    pub fn get_secret(&self, key: &str) -> Result<Option<String>, KeychainError> {
        debug!(service = %self.service_name, key = %key, "Retrieving secret from keychain");

        match self.entry(key)?.get_password() {
            Ok(secret) => Ok(Some(secret)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(KeychainError::AccessFailed(format!("Failed to retrieve secret for {key}: {e}"))),
        }
    }

    /// Delete a secret (idempotent)
    pub fn delete_secret(&self, key: &str) -> Result<(), KeychainError> {
        debug!(service = %self.service_name, key = %key, "Deleting secret from keychain");

        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(KeychainError::AccessFailed(format!("Failed to delete secret for {key}: {e}"))),
        }
    }

    fn entry(&self, key: &str) -> Result<Entry, KeychainError> {
        Entry::new(&self.service_name, key)
            .map_err(|e| KeychainError::AccessFailed(format!("Failed to open keychain entry {key}: {e}")))
    }
}
