//! Port interfaces for the per-user event store
//!
//! The store is a remote document collection with real-time push: adapters
//! deliver the user's full collection on every change.

use std::fmt;

use async_trait::async_trait;
use daybook_domain::{CalendarEvent, EventDraft, EventUpdate, Result};

/// Receives a full-collection snapshot; each call replaces the previous one.
pub type SnapshotCallback = Box<dyn Fn(Vec<CalendarEvent>) + Send + Sync + 'static>;

/// Handle for a live store subscription.
///
/// Dropping the handle (or calling [`Subscription::cancel`]) stops delivery.
#[must_use = "dropping a subscription immediately unsubscribes"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce() + Send + 'static>>,
}

impl Subscription {
    pub fn new(unsubscribe: impl FnOnce() + Send + 'static) -> Self {
        Self { unsubscribe: Some(Box::new(unsubscribe)) }
    }

    /// A handle with nothing to release.
    pub fn detached() -> Self {
        Self { unsubscribe: None }
    }

    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("active", &self.unsubscribe.is_some()).finish()
    }
}

/// Trait for the remote per-user event collection
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Start streaming `user_id`'s events. The current collection is
    /// delivered as the first snapshot.
    async fn subscribe(&self, user_id: &str, on_snapshot: SnapshotCallback) -> Result<Subscription>;

    /// Persist a new event owned by `user_id` and return its id
    async fn create(&self, user_id: &str, draft: EventDraft) -> Result<String>;

    /// Apply a partial update; `NotFound` if the event no longer exists
    async fn update(&self, id: &str, update: EventUpdate) -> Result<()>;

    /// Remove an event; `NotFound` if the event no longer exists
    async fn delete(&self, id: &str) -> Result<()>;
}
