//! Calendar view commands

use std::time::Instant;

use chrono::{Local, NaiveDate};
use daybook_core::{events_for_date, place_events, resolve_range};
use daybook_domain::{CalendarEvent, EventPlacement, RangeDescriptor, Result, ViewMode, ViewState};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::utils::logging::log_command_execution;
use crate::AppContext;

/// Everything the presentation layer needs to draw one view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarView {
    pub title: String,
    pub state: ViewState,
    pub range: RangeDescriptor,
    pub placement: EventPlacement,
}

/// Navigation intents of the view header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "date", rename_all = "camelCase")]
pub enum Navigation {
    Previous,
    Next,
    Today(NaiveDate),
    Mode(ViewMode),
}

/// Resolve the range for `state` and place the mirrored events into it.
/// The cell for the host's current date, if in range, is flagged as today.
pub async fn get_calendar_view(ctx: &AppContext, state: ViewState) -> Result<CalendarView> {
    let command_name = "calendar::get_calendar_view";
    let start = Instant::now();

    let events = ctx.events.events();
    let range = resolve_range(state.reference_date, state.mode).with_today(Local::now().date_naive());
    let placement = place_events(&events, &range);
    debug!(
        command = command_name,
        mode = %state.mode,
        start = %range.start,
        end = %range.end,
        events = events.len(),
        "Calendar view resolved"
    );

    log_command_execution(command_name, start.elapsed(), None);

    Ok(CalendarView { title: state.title(), state, range, placement })
}

/// Apply a header navigation intent to `state`.
pub fn navigate(state: ViewState, navigation: Navigation) -> ViewState {
    match navigation {
        Navigation::Previous => state.previous(),
        Navigation::Next => state.next(),
        Navigation::Today(today) => state.today(today),
        Navigation::Mode(mode) => state.with_mode(mode),
    }
}

/// Events visible on `date`, in mirror order.
pub async fn get_events_for_date(ctx: &AppContext, date: NaiveDate) -> Result<Vec<CalendarEvent>> {
    let command_name = "calendar::get_events_for_date";
    let start = Instant::now();

    let events = ctx.events.events();
    let visible = events_for_date(&events, date).into_iter().cloned().collect();

    log_command_execution(command_name, start.elapsed(), None);
    Ok(visible)
}
