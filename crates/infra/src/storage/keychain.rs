//! Platform keychain credential backend

use daybook_common::security::KeychainProvider;
use daybook_core::CredentialStorage;
use daybook_domain::{DaybookError, Result};

use crate::errors::InfraError;

/// Stores values as keychain secrets under one service name
#[derive(Debug, Clone)]
pub struct KeychainCredentialStorage {
    keychain: KeychainProvider,
}

impl KeychainCredentialStorage {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self { keychain: KeychainProvider::new(service_name) }
    }

    pub fn service_name(&self) -> &str {
        self.keychain.service_name()
    }
}

impl CredentialStorage for KeychainCredentialStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.keychain.get_secret(key).map_err(|e| DaybookError::from(InfraError::from(e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.keychain.set_secret(key, value).map_err(|e| DaybookError::from(InfraError::from(e)))
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.keychain.delete_secret(key).map_err(|e| DaybookError::from(InfraError::from(e)))
    }
}
