//! Video-link provisioner
//!
//! Obtains a join link by creating a throwaway timed event with a conference
//! request, reading the generated video entry point, then deleting the
//! throwaway event. Deletion is best effort: the link outlives the temporary
//! event, so a failed delete is logged and the link is still returned.

use std::sync::Arc;

use chrono::Utc;
use daybook_domain::{ConferenceEventRequest, EventDraft, ProvisionError, ProvisionState};
use tokio::sync::watch;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::ports::ConferenceApi;
use crate::auth::CredentialContext;

/// Linear, retry-free provisioning flow.
///
/// Holds no lock: callers keep at most one attempt in flight per authoring
/// session (see [`ProvisionState::is_in_flight`]).
pub struct VideoLinkProvisioner {
    api: Arc<dyn ConferenceApi>,
    credentials: Arc<CredentialContext>,
    time_zone: String,
    state: watch::Sender<ProvisionState>,
}

impl VideoLinkProvisioner {
    /// `time_zone` is the IANA name sent with the temporary event.
    pub fn new(api: Arc<dyn ConferenceApi>, credentials: Arc<CredentialContext>, time_zone: impl Into<String>) -> Self {
        let (state, _rx) = watch::channel(ProvisionState::Idle);
        Self { api, credentials, time_zone: time_zone.into(), state }
    }

    pub fn state(&self) -> ProvisionState {
        *self.state.borrow()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<ProvisionState> {
        self.state.subscribe()
    }

    /// Run one provisioning attempt and return the join URL.
    pub async fn provision(&self) -> Result<String, ProvisionError> {
        match self.run().await {
            Ok(link) => {
                self.transition(ProvisionState::Done);
                info!("Video link provisioned");
                Ok(link)
            }
            Err(err) => {
                self.transition(ProvisionState::Failed);
                warn!(error = %err, "Video link provisioning failed");
                Err(err)
            }
        }
    }

    /// Provision a link and attach it to `draft`. On failure the draft is
    /// left exactly as it was.
    pub async fn attach_to(&self, draft: &mut EventDraft) -> Result<(), ProvisionError> {
        let link = self.provision().await?;
        draft.video_link = Some(link);
        Ok(())
    }

    async fn run(&self) -> Result<String, ProvisionError> {
        self.transition(ProvisionState::RequestingToken);
        let credential = match self.credentials.get() {
            Ok(Some(credential)) => credential,
            Ok(None) => return Err(ProvisionError::NoCredential),
            Err(err) => {
                warn!(error = %err, "Failed to read delegated credential");
                return Err(ProvisionError::NoCredential);
            }
        };

        self.transition(ProvisionState::CreatingEvent);
        let request =
            ConferenceEventRequest::temporary(Utc::now(), self.time_zone.clone(), format!("meet-{}", Uuid::new_v4()));
        let created = self.api.create_conference_event(&credential, &request).await?;

        self.transition(ProvisionState::ExtractingLink);
        let link = created.video_uri().map(str::to_owned).ok_or(ProvisionError::LinkNotFound)?;

        self.transition(ProvisionState::DeletingTempEvent);
        match created.id.as_deref() {
            Some(event_id) => {
                if let Err(err) = self.api.delete_event(&credential, event_id).await {
                    warn!(event_id, error = %err, "Failed to delete temporary conference event");
                }
            }
            None => warn!("Temporary conference event has no id; skipping delete"),
        }

        Ok(link)
    }

    fn transition(&self, next: ProvisionState) {
        debug!(state = %next, "Provisioning state changed");
        self.state.send_replace(next);
    }
}
