use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use daybook_core::{EventStore, SnapshotCallback, Subscription};
use daybook_domain::{CalendarEvent, DaybookError, EventDraft, EventUpdate, Result as DomainResult};

type Listeners = Arc<Mutex<HashMap<usize, (String, Arc<SnapshotCallback>)>>>;

/// In-memory mock for `EventStore`.
///
/// Pushes the owner's full collection to every listener after each write and
/// counts calls so tests can assert that validation short-circuits.
#[derive(Default, Clone)]
pub struct MockEventStore {
    events: Arc<Mutex<Vec<CalendarEvent>>>,
    listeners: Listeners,
    next_listener: Arc<AtomicUsize>,
    next_id: Arc<AtomicUsize>,
    pub calls: Arc<AtomicUsize>,
}

impl MockEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an event without notifying listeners.
    pub fn with_event(self, event: CalendarEvent) -> Self {
        self.events.lock().unwrap().push(event);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().unwrap().len()
    }

    /// Simulate an out-of-band change from another session.
    pub fn push_external(&self, event: CalendarEvent) {
        self.events.lock().unwrap().push(event);
        self.notify();
    }

    fn snapshot_for(&self, user_id: &str) -> Vec<CalendarEvent> {
        self.events.lock().unwrap().iter().filter(|event| event.user_id == user_id).cloned().collect()
    }

    fn notify(&self) {
        let listeners: Vec<_> = self.listeners.lock().unwrap().values().cloned().collect();
        for (user_id, callback) in listeners {
            callback(self.snapshot_for(&user_id));
        }
    }
}

#[async_trait]
impl EventStore for MockEventStore {
    async fn subscribe(&self, user_id: &str, on_snapshot: SnapshotCallback) -> DomainResult<Subscription> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let key = self.next_listener.fetch_add(1, Ordering::SeqCst);
        let callback = Arc::new(on_snapshot);
        callback(self.snapshot_for(user_id));
        self.listeners.lock().unwrap().insert(key, (user_id.to_string(), callback));

        let listeners = Arc::clone(&self.listeners);
        Ok(Subscription::new(move || {
            listeners.lock().unwrap().remove(&key);
        }))
    }

    async fn create(&self, user_id: &str, draft: EventDraft) -> DomainResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let id = format!("evt-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        self.events.lock().unwrap().push(CalendarEvent::from_draft(draft, user_id, Some(id.clone())));
        self.notify();
        Ok(id)
    }

    async fn update(&self, id: &str, update: EventUpdate) -> DomainResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        {
            let mut events = self.events.lock().unwrap();
            let event = events
                .iter_mut()
                .find(|event| event.id.as_deref() == Some(id))
                .ok_or_else(|| DaybookError::NotFound(format!("event {id}")))?;
            update.apply_to(event);
        }
        self.notify();
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        {
            let mut events = self.events.lock().unwrap();
            let before = events.len();
            events.retain(|event| event.id.as_deref() != Some(id));
            if events.len() == before {
                return Err(DaybookError::NotFound(format!("event {id}")));
            }
        }
        self.notify();
        Ok(())
    }
}
