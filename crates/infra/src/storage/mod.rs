//! Credential storage adapters

pub mod file;
pub mod keychain;
pub mod memory;

use std::sync::Arc;

use daybook_core::CredentialStorage;
use daybook_domain::{CredentialBackend, DaybookError, Result, StorageConfig};
use tracing::info;

pub use file::FileCredentialStorage;
pub use keychain::KeychainCredentialStorage;
pub use memory::MemoryCredentialStorage;

/// Build the credential backend selected in config.
///
/// # Errors
/// `Config` when the file backend has no path.
pub fn credential_storage(config: &StorageConfig) -> Result<Arc<dyn CredentialStorage>> {
    info!(backend = %config.backend, "Using credential storage backend");

    match config.backend {
        CredentialBackend::Keychain => Ok(Arc::new(KeychainCredentialStorage::new(config.service_name.clone()))),
        CredentialBackend::File => {
            let path = config
                .path
                .as_deref()
                .ok_or_else(|| DaybookError::Config("storage.path is required for the file backend".into()))?;
            Ok(Arc::new(FileCredentialStorage::new(path)))
        }
        CredentialBackend::Memory => Ok(Arc::new(MemoryCredentialStorage::new())),
    }
}
