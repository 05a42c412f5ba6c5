//! Google Calendar adapter for conference-link provisioning

use async_trait::async_trait;
use daybook_core::ConferenceApi;
use daybook_domain::{ConferenceEvent, ConferenceEventRequest, DaybookError, DelegatedCredential, ProvisionError};
use reqwest::{Method, StatusCode};
use tracing::{debug, error};

use super::types::{GoogleEventInsert, GoogleEventResource};
use crate::http::HttpClient;

/// Calendar v3 REST client scoped to the user's primary calendar
#[derive(Debug, Clone)]
pub struct GoogleConferenceApi {
    http: HttpClient,
    api_base: String,
}

impl GoogleConferenceApi {
    /// `api_base` is the Calendar v3 root, e.g.
    /// `https://www.googleapis.com/calendar/v3`.
    pub fn new(http: HttpClient, api_base: impl Into<String>) -> Self {
        let api_base = api_base.into().trim_end_matches('/').to_string();
        Self { http, api_base }
    }

    fn events_url(&self) -> String {
        format!("{}/calendars/primary/events", self.api_base)
    }
}

#[async_trait]
impl ConferenceApi for GoogleConferenceApi {
    async fn create_conference_event(
        &self,
        credential: &DelegatedCredential,
        request: &ConferenceEventRequest,
    ) -> Result<ConferenceEvent, ProvisionError> {
        let body = GoogleEventInsert::from(request);
        let builder = self
            .http
            .request(Method::POST, self.events_url())
            .query(&[("conferenceDataVersion", "1")])
            .bearer_auth(credential.expose())
            .json(&body);

        let response = self.http.send(builder).await.map_err(transport_error)?;
        let status = response.status();

        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), detail = %detail, "Calendar API rejected conference event insert");
            return Err(provision_error(status));
        }

        let resource: GoogleEventResource = response
            .json()
            .await
            .map_err(|e| ProvisionError::Transport(format!("failed to parse Calendar API response: {e}")))?;

        debug!(event_id = ?resource.id, "Created temporary conference event");
        Ok(resource.into())
    }

    async fn delete_event(&self, credential: &DelegatedCredential, event_id: &str) -> Result<(), ProvisionError> {
        let url = format!("{}/{}", self.events_url(), urlencoding::encode(event_id));
        let builder = self.http.request(Method::DELETE, url).bearer_auth(credential.expose());

        let response = self.http.send(builder).await.map_err(transport_error)?;
        let status = response.status();

        if status.is_success() {
            debug!(event_id = %event_id, "Deleted temporary conference event");
            Ok(())
        } else {
            Err(provision_error(status))
        }
    }
}

fn provision_error(status: StatusCode) -> ProvisionError {
    match status {
        StatusCode::UNAUTHORIZED => ProvisionError::Unauthorized,
        StatusCode::FORBIDDEN => ProvisionError::ApiNotEnabled,
        other => ProvisionError::Provision { status: other.as_u16() },
    }
}

fn transport_error(err: DaybookError) -> ProvisionError {
    match err {
        DaybookError::Transport(message) => ProvisionError::Transport(message),
        other => ProvisionError::Transport(other.to_string()),
    }
}
