//! Port interface for the calendar capability that mints conference links

use async_trait::async_trait;
use daybook_domain::{ConferenceEvent, ConferenceEventRequest, DelegatedCredential, ProvisionError};

/// Trait for the calendar REST endpoint used by link provisioning
#[async_trait]
pub trait ConferenceApi: Send + Sync {
    /// Create a timed event carrying a conference create request
    async fn create_conference_event(
        &self,
        credential: &DelegatedCredential,
        request: &ConferenceEventRequest,
    ) -> Result<ConferenceEvent, ProvisionError>;

    /// Delete an event by id
    async fn delete_event(&self, credential: &DelegatedCredential, event_id: &str) -> Result<(), ProvisionError>;
}
