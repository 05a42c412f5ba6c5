//! JSON file credential backend
//!
//! The whole file is one JSON object of string values. Every write goes to a
//! temporary file in the same directory which then replaces the original, so
//! a crash mid-write leaves the previous contents intact.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use daybook_core::CredentialStorage;
use daybook_domain::{DaybookError, Result};
use parking_lot::Mutex;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::errors::InfraError;

type Entries = BTreeMap<String, String>;

#[derive(Debug)]
pub struct FileCredentialStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileCredentialStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), write_lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Entries> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(Entries::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents).map_err(InfraError::from)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Entries::new()),
            Err(err) => Err(InfraError::from(err).into()),
        }
    }

    fn write_entries(&self, entries: &Entries) -> Result<()> {
        write_json_atomically(&self.path, entries)?;
        debug!(path = %self.path.display(), entries = entries.len(), "Wrote credential file");
        Ok(())
    }

    fn modify(&self, change: impl FnOnce(&mut Entries) -> bool) -> Result<()> {
        let _guard = self.write_lock.lock();
        let mut entries = self.read_entries()?;
        if change(&mut entries) {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

/// Serialise `value` to a temporary file next to `path`, then move it over
/// `path`.
pub(crate) fn write_json_atomically<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir).map_err(InfraError::from)?;

    let mut temp = NamedTempFile::new_in(&dir).map_err(InfraError::from)?;
    serde_json::to_writer_pretty(&mut temp, value).map_err(InfraError::from)?;
    temp.flush().map_err(InfraError::from)?;
    temp.as_file().sync_all().map_err(InfraError::from)?;

    temp.persist(path)
        .map_err(|e| DaybookError::Storage(format!("failed to replace {}: {}", path.display(), e.error)))?;
    Ok(())
}

impl CredentialStorage for FileCredentialStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.modify(|entries| {
            entries.insert(key.to_string(), value.to_string());
            true
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.modify(|entries| entries.remove(key).is_some())
    }
}
