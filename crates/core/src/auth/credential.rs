//! Delegated credential cache
//!
//! One credential at most, mirrored in memory and in durable storage. The
//! memory side is filled lazily from storage on first read.

use std::sync::Arc;

use daybook_domain::constants::CREDENTIAL_STORAGE_KEY;
use daybook_domain::{DelegatedCredential, Result};
use parking_lot::Mutex;
use tracing::debug;

use super::ports::CredentialStorage;

enum Cached {
    Unloaded,
    Loaded(Option<DelegatedCredential>),
}

/// Owned credential context handed to everything that needs the token.
///
/// Writes hold one lock across the durable and the in-memory update, so
/// readers never see the two disagree. A failed durable write leaves the
/// memory side untouched.
///
/// Every call is synchronous and may block on keychain or file I/O while
/// holding the lock.
pub struct CredentialContext {
    storage: Arc<dyn CredentialStorage>,
    key: String,
    cached: Mutex<Cached>,
}

impl CredentialContext {
    pub fn new(storage: Arc<dyn CredentialStorage>) -> Self {
        Self { storage, key: CREDENTIAL_STORAGE_KEY.to_string(), cached: Mutex::new(Cached::Unloaded) }
    }

    /// Use a storage key other than the default.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current credential, loading it from durable storage on first access.
    ///
    /// Absence is reported as `Ok(None)`; nothing here re-authenticates.
    pub fn get(&self) -> Result<Option<DelegatedCredential>> {
        let mut cached = self.cached.lock();
        if let Cached::Loaded(credential) = &*cached {
            return Ok(credential.clone());
        }

        let credential = self.storage.get(&self.key)?.map(DelegatedCredential::new);
        debug!(present = credential.is_some(), "Loaded delegated credential from storage");
        *cached = Cached::Loaded(credential.clone());
        Ok(credential)
    }

    pub fn store(&self, credential: DelegatedCredential) -> Result<()> {
        let mut cached = self.cached.lock();
        self.storage.set(&self.key, credential.expose())?;
        *cached = Cached::Loaded(Some(credential));
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        let mut cached = self.cached.lock();
        self.storage.remove(&self.key)?;
        *cached = Cached::Loaded(None);
        Ok(())
    }
}
