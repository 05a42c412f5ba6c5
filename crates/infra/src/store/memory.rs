//! In-process event store with live snapshots
//!
//! Behaves like the remote document collection: records are keyed by a
//! store-assigned id, timestamps are kept in UTC, and every change pushes
//! the owner's full collection to their subscribers.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use async_trait::async_trait;
use chrono::{DateTime, Local, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};
use daybook_core::{EventStore, SnapshotCallback, Subscription};
use daybook_domain::{CalendarEvent, DaybookError, EventColor, EventDraft, EventKind, EventUpdate, Result};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::file::EventJournal;

/// One record of the collection, with timestamps as UTC instants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StoredEvent {
    id: String,
    user_id: String,
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<EventColor>,
    #[serde(default)]
    kind: EventKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    video_link: Option<String>,
}

impl StoredEvent {
    fn from_event(id: String, event: CalendarEvent) -> Self {
        Self {
            id,
            user_id: event.user_id,
            title: event.title,
            description: event.description,
            start: local_to_utc(event.start_time),
            end: local_to_utc(event.end_time),
            color: event.color,
            kind: event.kind,
            video_link: event.video_link,
        }
    }

    fn to_event(&self) -> CalendarEvent {
        CalendarEvent {
            id: Some(self.id.clone()),
            title: self.title.clone(),
            description: self.description.clone(),
            start_time: utc_to_local(self.start),
            end_time: utc_to_local(self.end),
            color: self.color,
            kind: self.kind,
            video_link: self.video_link.clone(),
            user_id: self.user_id.clone(),
        }
    }
}

/// Wall-clock time on this host to an instant. Times skipped by a DST jump
/// use the offset in effect before the jump.
pub fn local_to_utc(local: NaiveDateTime) -> DateTime<Utc> {
    match Local.from_local_datetime(&local) {
        LocalResult::Single(at) | LocalResult::Ambiguous(at, _) => at.with_timezone(&Utc),
        LocalResult::None => {
            let offset = Local.offset_from_utc_datetime(&local).fix();
            let shifted = local - chrono::Duration::seconds(i64::from(offset.local_minus_utc()));
            Utc.from_utc_datetime(&shifted)
        }
    }
}

pub fn utc_to_local(at: DateTime<Utc>) -> NaiveDateTime {
    at.with_timezone(&Local).naive_local()
}

struct Listener {
    user_id: String,
    on_snapshot: Arc<SnapshotCallback>,
}

#[derive(Default)]
struct Inner {
    events: Vec<StoredEvent>,
    listeners: HashMap<u64, Listener>,
    next_listener: u64,
}

impl Inner {
    fn snapshot(&self, user_id: &str) -> Vec<CalendarEvent> {
        self.events.iter().filter(|event| event.user_id == user_id).map(StoredEvent::to_event).collect()
    }

    fn listeners_for(&self, user_id: &str) -> Vec<Arc<SnapshotCallback>> {
        self.listeners
            .values()
            .filter(|listener| listener.user_id == user_id)
            .map(|listener| Arc::clone(&listener.on_snapshot))
            .collect()
    }
}

fn position(events: &[StoredEvent], id: &str) -> Result<usize> {
    events
        .iter()
        .position(|event| event.id == id)
        .ok_or_else(|| DaybookError::NotFound(format!("event {id} not found")))
}

/// [`EventStore`] held in process memory.
///
/// Snapshots list a user's events in insertion order. Callbacks run on the
/// task that made the change, after the store lock is released, and one
/// delivery at a time: each snapshot is taken under the delivery lock, so a
/// subscriber never sees an older collection after a newer one. Callbacks
/// must not write back to the store.
#[derive(Clone, Default)]
pub struct InMemoryEventStore {
    inner: Arc<Mutex<Inner>>,
    delivery: Arc<Mutex<()>>,
    journal: Option<Arc<EventJournal>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with `records` that saves the collection through
    /// `journal` before each change becomes visible.
    pub(crate) fn with_journal(records: Vec<StoredEvent>, journal: EventJournal) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner { events: records, ..Inner::default() })),
            delivery: Arc::default(),
            journal: Some(Arc::new(journal)),
        }
    }

    /// Number of live subscriptions across all users.
    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().listeners.len()
    }

    /// All stored events for `user_id`, as a subscriber would see them.
    pub fn events_for(&self, user_id: &str) -> Vec<CalendarEvent> {
        self.inner.lock().snapshot(user_id)
    }

    /// Apply `change` under the store lock. With a journal the new collection
    /// is saved first; a failed save restores the previous collection.
    fn commit<R>(&self, change: impl FnOnce(&mut Vec<StoredEvent>) -> Result<R>) -> Result<R> {
        let mut inner = self.inner.lock();
        let Some(journal) = &self.journal else {
            return change(&mut inner.events);
        };

        let previous = inner.events.clone();
        let outcome = change(&mut inner.events)?;
        if let Err(err) = journal.save(&inner.events) {
            warn!(error = %err, "Failed to save event collection; change rolled back");
            inner.events = previous;
            return Err(err);
        }
        Ok(outcome)
    }

    fn publish(&self, user_id: &str) {
        let _delivery = self.delivery.lock();
        let (snapshot, listeners) = {
            let inner = self.inner.lock();
            (inner.snapshot(user_id), inner.listeners_for(user_id))
        };

        debug!(user_id = %user_id, events = snapshot.len(), listeners = listeners.len(), "Publishing snapshot");
        for on_snapshot in listeners {
            on_snapshot(snapshot.clone());
        }
    }
}

fn unsubscribe(inner: &Weak<Mutex<Inner>>, listener_id: u64) {
    if let Some(inner) = inner.upgrade() {
        inner.lock().listeners.remove(&listener_id);
        debug!(listener_id, "Snapshot listener removed");
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn subscribe(&self, user_id: &str, on_snapshot: SnapshotCallback) -> Result<Subscription> {
        let on_snapshot = Arc::new(on_snapshot);

        let _delivery = self.delivery.lock();
        let (listener_id, snapshot) = {
            let mut inner = self.inner.lock();
            let listener_id = inner.next_listener;
            inner.next_listener += 1;
            inner
                .listeners
                .insert(listener_id, Listener { user_id: user_id.to_string(), on_snapshot: Arc::clone(&on_snapshot) });
            (listener_id, inner.snapshot(user_id))
        };

        info!(user_id = %user_id, listener_id, "Snapshot listener attached");
        on_snapshot(snapshot);

        let inner = Arc::downgrade(&self.inner);
        Ok(Subscription::new(move || unsubscribe(&inner, listener_id)))
    }

    async fn create(&self, user_id: &str, draft: EventDraft) -> Result<String> {
        let id = Uuid::now_v7().to_string();
        let event = CalendarEvent::from_draft(draft, user_id, None);

        let record = StoredEvent::from_event(id.clone(), event);
        self.commit(|events| {
            events.push(record);
            Ok(())
        })?;
        debug!(event_id = %id, user_id = %user_id, "Event created");

        self.publish(user_id);
        Ok(id)
    }

    async fn update(&self, id: &str, update: EventUpdate) -> Result<()> {
        let user_id = self.commit(|events| {
            let index = position(events, id)?;
            let stored = &mut events[index];

            let mut event = stored.to_event();
            update.apply_to(&mut event);
            *stored = StoredEvent::from_event(id.to_string(), event);
            Ok(stored.user_id.clone())
        })?;
        debug!(event_id = %id, "Event updated");

        self.publish(&user_id);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let removed = self.commit(|events| {
            let index = position(events, id)?;
            Ok(events.remove(index))
        })?;
        debug!(event_id = %id, "Event deleted");

        self.publish(&removed.user_id);
        Ok(())
    }
}
