//! Event service - authoring operations and the live mirror

use std::sync::Arc;

use daybook_domain::{CalendarEvent, DaybookError, EventDraft, EventUpdate, Result, UserSession};
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use super::mirror::EventMirror;
use super::ports::{EventStore, Subscription};

struct ActiveSubscription {
    user_id: String,
    _handle: Subscription,
}

/// Keeps the event mirror in sync with the store for the signed-in user and
/// validates authoring operations before they reach the store.
pub struct EventService {
    store: Arc<dyn EventStore>,
    mirror: EventMirror,
    active: Mutex<Option<ActiveSubscription>>,
}

impl EventService {
    /// Create a new event service
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self { store, mirror: EventMirror::new(), active: Mutex::new(None) }
    }

    pub fn mirror(&self) -> &EventMirror {
        &self.mirror
    }

    /// Current mirrored collection
    pub fn events(&self) -> Arc<Vec<CalendarEvent>> {
        self.mirror.snapshot()
    }

    /// User whose events are currently mirrored
    pub async fn current_user(&self) -> Option<String> {
        self.active.lock().await.as_ref().map(|active| active.user_id.clone())
    }

    /// Start mirroring `session`'s events, replacing any previous
    /// subscription. No-op when already attached to the same user.
    pub async fn attach(&self, session: &UserSession) -> Result<()> {
        let mut active = self.active.lock().await;
        if active.as_ref().is_some_and(|current| current.user_id == session.user_id) {
            return Ok(());
        }

        if let Some(previous) = active.take() {
            debug!(user_id = %previous.user_id, "Releasing previous event subscription");
            drop(previous);
            self.mirror.clear();
        }

        let mirror = self.mirror.clone();
        let handle = self
            .store
            .subscribe(
                &session.user_id,
                Box::new(move |events| {
                    debug!(count = events.len(), "Event snapshot received");
                    mirror.replace(events);
                }),
            )
            .await
            .inspect_err(|err| error!(error = %err, "Failed to subscribe to event store"))?;

        info!(user_id = %session.user_id, "Event subscription started");
        *active = Some(ActiveSubscription { user_id: session.user_id.clone(), _handle: handle });
        Ok(())
    }

    /// Stop mirroring and clear the local collection.
    pub async fn detach(&self) {
        if let Some(previous) = self.active.lock().await.take() {
            info!(user_id = %previous.user_id, "Event subscription stopped");
        }
        self.mirror.clear();
    }

    /// React to a session transition.
    pub async fn handle_session(&self, session: Option<&UserSession>) -> Result<()> {
        match session {
            Some(session) => self.attach(session).await,
            None => {
                self.detach().await;
                Ok(())
            }
        }
    }

    /// Follow `sessions` until the sender is dropped, starting and stopping
    /// the live subscription on every transition.
    pub fn spawn_session_listener(
        self: Arc<Self>,
        mut sessions: watch::Receiver<Option<UserSession>>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                let session = sessions.borrow_and_update().clone();
                if let Err(err) = self.handle_session(session.as_ref()).await {
                    error!(error = %err, "Failed to follow session change");
                }
                if sessions.changed().await.is_err() {
                    debug!("Session channel closed");
                    break;
                }
            }
        })
    }

    /// Validate and persist a new event for the attached user.
    pub async fn create(&self, draft: EventDraft) -> Result<String> {
        let draft = draft.normalized();
        draft.validate()?;

        let user_id = self.require_user().await?;
        let id = self
            .store
            .create(&user_id, draft)
            .await
            .inspect_err(|err| error!(error = %err, "Failed to create event"))?;

        info!(event_id = %id, "Event created");
        Ok(id)
    }

    /// Validate and apply a partial update. Interval checks use the mirrored
    /// copy for the side that is not being changed.
    pub async fn update(&self, id: &str, update: EventUpdate) -> Result<()> {
        let update = update.normalized();
        if update.is_empty() {
            debug!(event_id = %id, "Skipping empty event update");
            return Ok(());
        }
        update.validate(self.mirror.find(id).as_ref())?;

        self.require_user().await?;
        self.store
            .update(id, update)
            .await
            .inspect_err(|err| error!(event_id = %id, error = %err, "Failed to update event"))?;

        info!(event_id = %id, "Event updated");
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.require_user().await?;
        self.store
            .delete(id)
            .await
            .inspect_err(|err| error!(event_id = %id, error = %err, "Failed to delete event"))?;

        info!(event_id = %id, "Event deleted");
        Ok(())
    }

    async fn require_user(&self) -> Result<String> {
        self.current_user().await.ok_or_else(|| DaybookError::Auth("not signed in".to_string()))
    }
}
