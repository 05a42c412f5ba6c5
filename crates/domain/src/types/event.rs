//! Calendar event types
//!
//! Events carry local wall-clock timestamps (`NaiveDateTime`): they are
//! interpreted in the viewer's local zone and only converted to absolute
//! instants at the store boundary.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{DEFAULT_EVENT_END_HOUR, DEFAULT_EVENT_START_HOUR};
use crate::errors::ValidationError;
use crate::impl_domain_status_conversions;

/// Whether an entry is a regular event or a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    #[default]
    Event,
    Task,
}

impl_domain_status_conversions!(EventKind {
    Event => "event",
    Task => "task",
});

/// Fixed color palette offered by the authoring form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EventColor {
    #[default]
    Blue,
    Purple,
    Green,
    Orange,
    Red,
    Teal,
}

impl EventColor {
    /// Palette in display order.
    pub const PALETTE: [Self; 6] =
        [Self::Blue, Self::Purple, Self::Green, Self::Orange, Self::Red, Self::Teal];

    /// CSS hex value stored with the event.
    pub fn hex(self) -> &'static str {
        match self {
            Self::Blue => "#4299e1",
            Self::Purple => "#9f7aea",
            Self::Green => "#48bb78",
            Self::Orange => "#ed8936",
            Self::Red => "#f56565",
            Self::Teal => "#38b2ac",
        }
    }

    /// Human readable palette name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Blue => "Blue",
            Self::Purple => "Purple",
            Self::Green => "Green",
            Self::Orange => "Orange",
            Self::Red => "Red",
            Self::Teal => "Teal",
        }
    }

    /// Look up a palette entry by hex value (case-insensitive).
    pub fn from_hex(hex: &str) -> Option<Self> {
        Self::PALETTE.into_iter().find(|color| color.hex().eq_ignore_ascii_case(hex.trim()))
    }
}

impl TryFrom<String> for EventColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value).ok_or_else(|| format!("color {value} is not in the palette"))
    }
}

impl From<EventColor> for String {
    fn from(value: EventColor) -> Self {
        value.hex().to_string()
    }
}

/// A persisted (or about to be persisted) calendar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    /// Store-assigned identifier; absent until persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<EventColor>,
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_link: Option<String>,
    pub user_id: String,
}

impl CalendarEvent {
    /// Build an event owned by `user_id` from an authoring draft.
    pub fn from_draft(draft: EventDraft, user_id: impl Into<String>, id: Option<String>) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            start_time: draft.start_time,
            end_time: draft.end_time,
            color: draft.color,
            kind: draft.kind,
            video_link: draft.video_link,
            user_id: user_id.into(),
        }
    }

    /// Authoring draft pre-filled from this event (edit form).
    pub fn to_draft(&self) -> EventDraft {
        EventDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            start_time: self.start_time,
            end_time: self.end_time,
            color: Some(self.display_color()),
            kind: self.kind,
            video_link: self.video_link.clone(),
        }
    }

    /// Color to render, falling back to the palette default.
    pub fn display_color(&self) -> EventColor {
        self.color.unwrap_or_default()
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_time.date()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_time.date()
    }

    /// Duration in whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }

    pub fn has_video_link(&self) -> bool {
        self.video_link.as_deref().is_some_and(|link| !link.is_empty())
    }
}

/// Authoring payload: everything about an event except its id and owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    #[serde(default)]
    pub color: Option<EventColor>,
    #[serde(rename = "type", default)]
    pub kind: EventKind,
    #[serde(default)]
    pub video_link: Option<String>,
}

impl EventDraft {
    pub fn new(title: impl Into<String>, start_time: NaiveDateTime, end_time: NaiveDateTime) -> Self {
        Self {
            title: title.into(),
            description: None,
            start_time,
            end_time,
            color: None,
            kind: EventKind::Event,
            video_link: None,
        }
    }

    /// Blank draft for a clicked date: 09:00-10:00, default color.
    pub fn for_date(date: NaiveDate) -> Self {
        let at = |hour| date.and_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN));
        Self {
            color: Some(EventColor::default()),
            ..Self::new("", at(DEFAULT_EVENT_START_HOUR), at(DEFAULT_EVENT_END_HOUR))
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_color(mut self, color: EventColor) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_kind(mut self, kind: EventKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_video_link(mut self, link: impl Into<String>) -> Self {
        self.video_link = Some(link.into());
        self
    }

    /// Check the authoring invariants: non-empty title, end after start.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        check_times(self.start_time, self.end_time)
    }

    /// Trim text fields; blank optional fields become absent.
    pub fn normalized(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            description: non_blank(self.description),
            video_link: non_blank(self.video_link),
            ..self
        }
    }
}

/// Explicit partial update. `None` leaves a field untouched; for optional
/// fields `Some(None)` clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub color: Option<Option<EventColor>>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<EventKind>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub video_link: Option<Option<String>>,
}

impl EventUpdate {
    /// Update replacing every editable field with the draft's values.
    pub fn from_draft(draft: EventDraft) -> Self {
        Self {
            title: Some(draft.title),
            description: Some(draft.description),
            start_time: Some(draft.start_time),
            end_time: Some(draft.end_time),
            color: Some(draft.color),
            kind: Some(draft.kind),
            video_link: Some(draft.video_link),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_times(mut self, start_time: NaiveDateTime, end_time: NaiveDateTime) -> Self {
        self.start_time = Some(start_time);
        self.end_time = Some(end_time);
        self
    }

    pub fn with_kind(mut self, kind: EventKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_color(mut self, color: Option<EventColor>) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_video_link(mut self, link: Option<String>) -> Self {
        self.video_link = Some(link);
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Validate the fields being changed. `current` supplies the stored
    /// start/end when only one side of the interval is updated.
    pub fn validate(&self, current: Option<&CalendarEvent>) -> Result<(), ValidationError> {
        if self.title.as_deref().is_some_and(|title| title.trim().is_empty()) {
            return Err(ValidationError::EmptyTitle);
        }

        let start = self.start_time.or_else(|| current.map(|event| event.start_time));
        let end = self.end_time.or_else(|| current.map(|event| event.end_time));
        match (start, end) {
            (Some(start), Some(end)) => check_times(start, end),
            _ => Ok(()),
        }
    }

    /// Trim text fields the same way drafts are normalised.
    pub fn normalized(self) -> Self {
        Self {
            title: self.title.map(|title| title.trim().to_string()),
            description: self.description.map(non_blank),
            video_link: self.video_link.map(non_blank),
            ..self
        }
    }

    /// Apply the changed fields to `event` in place.
    pub fn apply_to(&self, event: &mut CalendarEvent) {
        if let Some(title) = &self.title {
            event.title.clone_from(title);
        }
        if let Some(description) = &self.description {
            event.description.clone_from(description);
        }
        if let Some(start_time) = self.start_time {
            event.start_time = start_time;
        }
        if let Some(end_time) = self.end_time {
            event.end_time = end_time;
        }
        if let Some(color) = self.color {
            event.color = color;
        }
        if let Some(kind) = self.kind {
            event.kind = kind;
        }
        if let Some(video_link) = &self.video_link {
            event.video_link.clone_from(video_link);
        }
    }
}

fn check_times(start: NaiveDateTime, end: NaiveDateTime) -> Result<(), ValidationError> {
    if end <= start {
        return Err(ValidationError::EndNotAfterStart { start, end });
    }
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Deserialize a present field (including `null`) as `Some(..)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap().and_hms_opt(hour, minute, 0).unwrap()
    }

    fn stored_event() -> CalendarEvent {
        CalendarEvent::from_draft(
            EventDraft::new("Standup", at(1, 9, 0), at(1, 9, 30)),
            "user-1",
            Some("evt-1".into()),
        )
    }

    #[test]
    fn draft_rejects_blank_title() {
        let draft = EventDraft::new("   ", at(1, 9, 0), at(1, 10, 0));
        assert_eq!(draft.validate(), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn draft_rejects_end_equal_to_start() {
        let draft = EventDraft::new("Review", at(1, 9, 0), at(1, 9, 0));
        assert!(matches!(draft.validate(), Err(ValidationError::EndNotAfterStart { .. })));
    }

    #[test]
    fn draft_rejects_end_before_start() {
        let draft = EventDraft::new("Review", at(2, 9, 0), at(1, 9, 0));
        assert!(matches!(draft.validate(), Err(ValidationError::EndNotAfterStart { .. })));
    }

    #[test]
    fn draft_accepts_multi_day_span() {
        let draft = EventDraft::new("Offsite", at(1, 9, 0), at(3, 17, 0));
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn draft_for_date_defaults_to_nine_to_ten() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let draft = EventDraft::for_date(date);
        assert_eq!(draft.start_time, date.and_hms_opt(9, 0, 0).unwrap());
        assert_eq!(draft.end_time, date.and_hms_opt(10, 0, 0).unwrap());
        assert_eq!(draft.kind, EventKind::Event);
        assert_eq!(draft.color, Some(EventColor::Blue));
    }

    #[test]
    fn normalized_draft_trims_and_drops_blank_fields() {
        let draft = EventDraft::new("  Lunch  ", at(1, 12, 0), at(1, 13, 0))
            .with_description("   ")
            .with_video_link("");
        let draft = draft.normalized();
        assert_eq!(draft.title, "Lunch");
        assert_eq!(draft.description, None);
        assert_eq!(draft.video_link, None);
    }

    #[test]
    fn color_serializes_as_hex_and_rejects_unknown_values() {
        let json = serde_json::to_string(&EventColor::Teal).unwrap();
        assert_eq!(json, "\"#38b2ac\"");
        let parsed: EventColor = serde_json::from_str("\"#F56565\"").unwrap();
        assert_eq!(parsed, EventColor::Red);
        assert!(serde_json::from_str::<EventColor>("\"#000000\"").is_err());
    }

    #[test]
    fn event_kind_parses_from_string() {
        assert_eq!(EventKind::from_str("Task").unwrap(), EventKind::Task);
        assert_eq!(EventKind::Event.to_string(), "event");
    }

    #[test]
    fn event_serializes_kind_as_type() {
        let json = serde_json::to_value(stored_event()).unwrap();
        assert_eq!(json["type"], "event");
        assert_eq!(json["userId"], "user-1");
        assert!(json.get("videoLink").is_none());
    }

    #[test]
    fn update_applies_only_changed_fields() {
        let mut event = stored_event();
        let update = EventUpdate::default()
            .with_title("Daily standup")
            .with_video_link(Some("https://meet.google.com/abc-defg-hij".into()));
        update.apply_to(&mut event);

        assert_eq!(event.title, "Daily standup");
        assert_eq!(event.start_time, at(1, 9, 0));
        assert!(event.has_video_link());
    }

    #[test]
    fn update_can_clear_optional_fields() {
        let mut event = stored_event();
        event.video_link = Some("https://meet.google.com/abc-defg-hij".into());
        EventUpdate::default().with_video_link(None).apply_to(&mut event);
        assert_eq!(event.video_link, None);
    }

    #[test]
    fn update_checks_new_end_against_stored_start() {
        let current = stored_event();
        let update = EventUpdate { end_time: Some(at(1, 8, 0)), ..EventUpdate::default() };
        assert!(matches!(
            update.validate(Some(&current)),
            Err(ValidationError::EndNotAfterStart { .. })
        ));
        assert!(update.validate(None).is_ok());
    }

    #[test]
    fn update_rejects_blank_title() {
        let update = EventUpdate::default().with_title(" ");
        assert_eq!(update.validate(None), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn update_distinguishes_null_from_missing() {
        let cleared: EventUpdate = serde_json::from_str(r#"{"videoLink": null}"#).unwrap();
        assert_eq!(cleared.video_link, Some(None));

        let untouched: EventUpdate = serde_json::from_str("{}").unwrap();
        assert_eq!(untouched.video_link, None);
        assert!(untouched.is_empty());
    }

    #[test]
    fn draft_round_trips_through_event() {
        let event = stored_event();
        let draft = event.to_draft();
        assert_eq!(draft.title, event.title);
        assert_eq!(draft.color, Some(EventColor::Blue));
        assert_eq!(event.duration_minutes(), 30);
    }
}
