//! Video-conference provisioning types

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{TEMP_MEETING_DURATION_MINUTES, TEMP_MEETING_SUMMARY, VIDEO_ENTRY_POINT_TYPE};
use crate::impl_domain_status_conversions;

/// Throwaway timed event created only to obtain a generated join link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceEventRequest {
    pub summary: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// IANA zone name sent alongside both timestamps.
    pub time_zone: String,
    /// Idempotency key for the conference create request.
    pub request_id: String,
}

impl ConferenceEventRequest {
    /// One-hour temporary meeting starting at `now`.
    pub fn temporary(now: DateTime<Utc>, time_zone: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self {
            summary: TEMP_MEETING_SUMMARY.to_string(),
            start: now,
            end: now + Duration::minutes(TEMP_MEETING_DURATION_MINUTES),
            time_zone: time_zone.into(),
            request_id: request_id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPoint {
    pub entry_point_type: String,
    pub uri: String,
}

/// The created temporary event as far as provisioning cares.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceEvent {
    pub id: Option<String>,
    pub entry_points: Vec<EntryPoint>,
}

impl ConferenceEvent {
    /// Join URI of the first `video` entry point.
    pub fn video_uri(&self) -> Option<&str> {
        self.entry_points
            .iter()
            .find(|entry| entry.entry_point_type == VIDEO_ENTRY_POINT_TYPE && !entry.uri.is_empty())
            .map(|entry| entry.uri.as_str())
    }
}

/// Stage of a video-link provisioning attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvisionState {
    #[default]
    Idle,
    RequestingToken,
    CreatingEvent,
    ExtractingLink,
    DeletingTempEvent,
    Done,
    Failed,
}

impl ProvisionState {
    /// Whether an attempt is outstanding; callers disable re-entrant triggers
    /// while this holds.
    pub fn is_in_flight(self) -> bool {
        !matches!(self, Self::Idle | Self::Done | Self::Failed)
    }
}

impl_domain_status_conversions!(ProvisionState {
    Idle => "idle",
    RequestingToken => "requesting_token",
    CreatingEvent => "creating_event",
    ExtractingLink => "extracting_link",
    DeletingTempEvent => "deleting_temp_event",
    Done => "done",
    Failed => "failed",
});
