//! Process-local credential backend

use std::collections::HashMap;

use daybook_core::CredentialStorage;
use daybook_domain::Result;
use parking_lot::RwLock;

/// Non-durable storage; values vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryCredentialStorage {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryCredentialStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStorage for MemoryCredentialStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.values.write().remove(key);
        Ok(())
    }
}
