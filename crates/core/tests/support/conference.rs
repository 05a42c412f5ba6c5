use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use daybook_core::ConferenceApi;
use daybook_domain::{ConferenceEvent, ConferenceEventRequest, DelegatedCredential, EntryPoint, ProvisionError};

/// Scripted mock for `ConferenceApi`.
///
/// Returns a fixed create result and records every request and delete so
/// tests can assert ordering and absence of network calls.
#[derive(Clone)]
pub struct MockConferenceApi {
    create_result: Result<ConferenceEvent, ProvisionError>,
    delete_result: Result<(), ProvisionError>,
    pub created: Arc<Mutex<Vec<ConferenceEventRequest>>>,
    pub deleted: Arc<Mutex<Vec<String>>>,
    pub tokens: Arc<Mutex<Vec<String>>>,
}

impl MockConferenceApi {
    pub fn returning(create_result: Result<ConferenceEvent, ProvisionError>) -> Self {
        Self {
            create_result,
            delete_result: Ok(()),
            created: Arc::default(),
            deleted: Arc::default(),
            tokens: Arc::default(),
        }
    }

    /// Successful create carrying a video entry point.
    pub fn with_link(link: &str) -> Self {
        Self::returning(Ok(ConferenceEvent {
            id: Some("tmp-event".to_string()),
            entry_points: vec![
                EntryPoint { entry_point_type: "more".to_string(), uri: "https://tel.meet/abc".to_string() },
                EntryPoint { entry_point_type: "video".to_string(), uri: link.to_string() },
            ],
        }))
    }

    pub fn failing_delete(mut self, err: ProvisionError) -> Self {
        self.delete_result = Err(err);
        self
    }

    pub fn call_count(&self) -> usize {
        self.created.lock().unwrap().len() + self.deleted.lock().unwrap().len()
    }
}

#[async_trait]
impl ConferenceApi for MockConferenceApi {
    async fn create_conference_event(
        &self,
        credential: &DelegatedCredential,
        request: &ConferenceEventRequest,
    ) -> Result<ConferenceEvent, ProvisionError> {
        self.tokens.lock().unwrap().push(credential.expose().to_string());
        self.created.lock().unwrap().push(request.clone());
        self.create_result.clone()
    }

    async fn delete_event(&self, _credential: &DelegatedCredential, event_id: &str) -> Result<(), ProvisionError> {
        self.deleted.lock().unwrap().push(event_id.to_string());
        self.delete_result.clone()
    }
}
