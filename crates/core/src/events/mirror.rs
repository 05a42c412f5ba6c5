//! Live local mirror of the remote event collection

use std::sync::Arc;

use daybook_domain::CalendarEvent;
use tokio::sync::watch;

/// Snapshot-replace mirror of the signed-in user's events.
///
/// Every snapshot overwrites the previous collection wholesale; there is no
/// merging. Clones share the same underlying channel.
#[derive(Clone)]
pub struct EventMirror {
    tx: Arc<watch::Sender<Arc<Vec<CalendarEvent>>>>,
}

impl EventMirror {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Arc::new(Vec::new()));
        Self { tx: Arc::new(tx) }
    }

    /// Replace the whole collection.
    pub fn replace(&self, events: Vec<CalendarEvent>) {
        self.tx.send_replace(Arc::new(events));
    }

    pub fn clear(&self) {
        self.replace(Vec::new());
    }

    /// Current collection.
    pub fn snapshot(&self) -> Arc<Vec<CalendarEvent>> {
        Arc::clone(&self.tx.borrow())
    }

    /// Watch future snapshots.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<CalendarEvent>>> {
        self.tx.subscribe()
    }

    pub fn find(&self, id: &str) -> Option<CalendarEvent> {
        self.tx.borrow().iter().find(|event| event.id.as_deref() == Some(id)).cloned()
    }

    pub fn len(&self) -> usize {
        self.tx.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for EventMirror {
    fn default() -> Self {
        Self::new()
    }
}
