//! Google API wire types
//!
//! Only the fields Daybook reads or writes are modelled; everything else in
//! the responses is ignored.

use chrono::SecondsFormat;
use daybook_domain::constants::CONFERENCE_SOLUTION_TYPE;
use daybook_domain::{ConferenceEvent, ConferenceEventRequest, EntryPoint, UserSession};
use serde::{Deserialize, Serialize};

/// Body of `POST /calendars/primary/events?conferenceDataVersion=1`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleEventInsert {
    pub summary: String,
    pub start: GoogleEventTime,
    pub end: GoogleEventTime,
    pub conference_data: GoogleConferenceDataRequest,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleEventTime {
    pub date_time: String,
    pub time_zone: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleConferenceDataRequest {
    pub create_request: GoogleCreateConferenceRequest,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleCreateConferenceRequest {
    pub request_id: String,
    pub conference_solution_key: GoogleConferenceSolutionKey,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoogleConferenceSolutionKey {
    #[serde(rename = "type")]
    pub solution_type: String,
}

impl From<&ConferenceEventRequest> for GoogleEventInsert {
    fn from(request: &ConferenceEventRequest) -> Self {
        let time = |at: chrono::DateTime<chrono::Utc>| GoogleEventTime {
            date_time: at.to_rfc3339_opts(SecondsFormat::Millis, true),
            time_zone: request.time_zone.clone(),
        };

        Self {
            summary: request.summary.clone(),
            start: time(request.start),
            end: time(request.end),
            conference_data: GoogleConferenceDataRequest {
                create_request: GoogleCreateConferenceRequest {
                    request_id: request.request_id.clone(),
                    conference_solution_key: GoogleConferenceSolutionKey {
                        solution_type: CONFERENCE_SOLUTION_TYPE.to_string(),
                    },
                },
            },
        }
    }
}

/// Event resource returned by the insert call
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleEventResource {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub conference_data: Option<GoogleConferenceData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleConferenceData {
    #[serde(default)]
    pub entry_points: Vec<GoogleEntryPoint>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleEntryPoint {
    #[serde(default)]
    pub entry_point_type: String,
    #[serde(default)]
    pub uri: String,
}

impl From<GoogleEventResource> for ConferenceEvent {
    fn from(resource: GoogleEventResource) -> Self {
        let entry_points = resource
            .conference_data
            .map(|data| {
                data.entry_points
                    .into_iter()
                    .map(|entry| EntryPoint { entry_point_type: entry.entry_point_type, uri: entry.uri })
                    .collect()
            })
            .unwrap_or_default();

        ConferenceEvent { id: resource.id.filter(|id| !id.is_empty()), entry_points }
    }
}

/// OpenID Connect userinfo response
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleUserInfo {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl From<GoogleUserInfo> for UserSession {
    fn from(info: GoogleUserInfo) -> Self {
        UserSession { user_id: info.sub, email: info.email, display_name: info.name }
    }
}
