//! Event authoring commands

use std::time::Instant;

use chrono::NaiveDate;
use daybook_domain::{DaybookError, EventDraft, EventUpdate, Result};
use tracing::info;

use crate::utils::logging::{error_label, log_command_execution};
use crate::AppContext;

/// Blank draft for a date picked in the view (09:00-10:00).
pub fn new_event_draft(date: NaiveDate) -> EventDraft {
    EventDraft::for_date(date)
}

/// Draft pre-filled from a mirrored event, for the edit form.
pub async fn edit_event_draft(ctx: &AppContext, event_id: &str) -> Result<EventDraft> {
    ctx.events
        .mirror()
        .find(event_id)
        .map(|event| event.to_draft())
        .ok_or_else(|| DaybookError::NotFound(format!("event {event_id}")))
}

pub async fn create_event(ctx: &AppContext, draft: EventDraft) -> Result<String> {
    let command_name = "events::create_event";
    let start = Instant::now();

    let result = ctx.events.create(draft).await;
    if let Ok(id) = &result {
        info!(command = command_name, event_id = %id, "Event stored");
    }

    log_command_execution(command_name, start.elapsed(), result.as_ref().err().map(error_label));
    result
}

pub async fn update_event(ctx: &AppContext, event_id: &str, update: EventUpdate) -> Result<()> {
    let command_name = "events::update_event";
    let start = Instant::now();

    let result = ctx.events.update(event_id, update).await;

    log_command_execution(command_name, start.elapsed(), result.as_ref().err().map(error_label));
    result
}

/// Submit the authoring form: create when `event_id` is absent, otherwise
/// overwrite every editable field of the existing event.
pub async fn save_event_draft(ctx: &AppContext, event_id: Option<&str>, draft: EventDraft) -> Result<String> {
    match event_id {
        Some(id) => {
            update_event(ctx, id, EventUpdate::from_draft(draft)).await?;
            Ok(id.to_string())
        }
        None => create_event(ctx, draft).await,
    }
}

pub async fn delete_event(ctx: &AppContext, event_id: &str) -> Result<()> {
    let command_name = "events::delete_event";
    let start = Instant::now();

    let result = ctx.events.delete(event_id).await;

    log_command_execution(command_name, start.elapsed(), result.as_ref().err().map(error_label));
    result
}
