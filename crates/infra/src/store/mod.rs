//! Event store adapters

pub mod file;
pub mod memory;

use std::sync::Arc;

use daybook_core::EventStore;
use daybook_domain::{Result, StorageConfig};
use tracing::info;

pub use file::FileEventStore;
pub use memory::InMemoryEventStore;

/// Build the event store selected in config: the JSON file at
/// `events_path` when set, process memory otherwise.
///
/// # Errors
/// `Storage` when the event file exists but cannot be read.
pub fn event_store(config: &StorageConfig) -> Result<Arc<dyn EventStore>> {
    match config.events_path.as_deref() {
        Some(path) => {
            info!(path, "Using file event store");
            Ok(Arc::new(FileEventStore::open(path)?))
        }
        None => {
            info!("Using in-memory event store; events last for this process only");
            Ok(Arc::new(InMemoryEventStore::new()))
        }
    }
}
