//! JSON file event store
//!
//! Every user's events live in one JSON array of records. The file is read
//! once when the store opens and rewritten in full, via a temporary file, on
//! each change. Live snapshots behave exactly as in
//! [`InMemoryEventStore`].

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use daybook_core::{EventStore, SnapshotCallback, Subscription};
use daybook_domain::{CalendarEvent, EventDraft, EventUpdate, Result};
use tracing::{debug, info};

use super::memory::{InMemoryEventStore, StoredEvent};
use crate::errors::InfraError;
use crate::storage::file::write_json_atomically;

/// Writes the collection to its file.
#[derive(Debug)]
pub(crate) struct EventJournal {
    path: PathBuf,
}

impl EventJournal {
    pub(crate) fn save(&self, records: &[StoredEvent]) -> Result<()> {
        write_json_atomically(&self.path, records)?;
        debug!(path = %self.path.display(), events = records.len(), "Wrote event file");
        Ok(())
    }
}

fn read_records(path: &Path) -> Result<Vec<StoredEvent>> {
    match std::fs::read_to_string(path) {
        Ok(contents) if contents.trim().is_empty() => Ok(Vec::new()),
        Ok(contents) => Ok(serde_json::from_str(&contents).map_err(InfraError::from)?),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(err) => Err(InfraError::from(err).into()),
    }
}

/// [`EventStore`] persisted to a JSON file.
///
/// A change is visible to subscribers only after the file has been written;
/// a failed write leaves both the file and the collection unchanged.
#[derive(Clone)]
pub struct FileEventStore {
    store: InMemoryEventStore,
    path: PathBuf,
}

impl FileEventStore {
    /// Open the collection at `path`. A missing or empty file is an empty
    /// collection; the file is created on the first write.
    ///
    /// # Errors
    /// `Storage` when the file cannot be read or is not a valid collection.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let records = read_records(&path)?;
        info!(path = %path.display(), events = records.len(), "Opened event file");

        let journal = EventJournal { path: path.clone() };
        Ok(Self { store: InMemoryEventStore::with_journal(records, journal), path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn subscriber_count(&self) -> usize {
        self.store.subscriber_count()
    }

    pub fn events_for(&self, user_id: &str) -> Vec<CalendarEvent> {
        self.store.events_for(user_id)
    }
}

#[async_trait]
impl EventStore for FileEventStore {
    async fn subscribe(&self, user_id: &str, on_snapshot: SnapshotCallback) -> Result<Subscription> {
        self.store.subscribe(user_id, on_snapshot).await
    }

    async fn create(&self, user_id: &str, draft: EventDraft) -> Result<String> {
        self.store.create(user_id, draft).await
    }

    async fn update(&self, id: &str, update: EventUpdate) -> Result<()> {
        self.store.update(id, update).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.store.delete(id).await
    }
}
