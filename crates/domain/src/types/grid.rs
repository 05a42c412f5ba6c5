//! Resolved calendar ranges and event placements
//!
//! These are computed values handed to the presentation layer; nothing here
//! is persisted.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::event::CalendarEvent;
use super::view::ViewMode;
use crate::constants::DAYS_PER_WEEK;

/// One day of a resolved range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    pub date: NaiveDate,
    /// False for the leading/trailing days that pad a month grid.
    pub in_current_month: bool,
    /// Set by [`RangeDescriptor::with_today`]; false in a freshly resolved range.
    #[serde(default)]
    pub is_today: bool,
}

/// One of the 24 fixed hourly rows of the day and week views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourSlot {
    pub hour: u32,
    pub label: String,
}

impl HourSlot {
    pub fn new(hour: u32) -> Self {
        let label = match hour {
            0 => "12 AM".to_string(),
            1..=11 => format!("{hour} AM"),
            12 => "12 PM".to_string(),
            _ => format!("{} PM", hour - 12),
        };
        Self { hour, label }
    }
}

/// Half-open range `[start, end)` of calendar days for one view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeDescriptor {
    pub mode: ViewMode,
    pub reference_date: NaiveDate,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: Vec<DayCell>,
    /// Empty for the month view.
    pub hour_slots: Vec<HourSlot>,
}

impl RangeDescriptor {
    /// Flag the cell for `today`, clearing any earlier flag. A `today`
    /// outside the range leaves no cell flagged.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        for cell in &mut self.days {
            cell.is_today = cell.date == today;
        }
        self
    }

    pub fn today(&self) -> Option<&DayCell> {
        self.days.iter().find(|cell| cell.is_today)
    }

    pub fn len_days(&self) -> usize {
        self.days.len()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.iter().map(|cell| cell.date)
    }

    /// Rows of seven days, as laid out by the month grid.
    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
        self.days.chunks(DAYS_PER_WEEK)
    }
}

/// Events assigned to one day cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayBucket {
    pub date: NaiveDate,
    /// Displayed events, in source order.
    pub events: Vec<CalendarEvent>,
    /// Visible events left out by month-cell truncation.
    pub hidden_count: usize,
}

impl DayBucket {
    pub fn new(date: NaiveDate) -> Self {
        Self { date, events: Vec::new(), hidden_count: 0 }
    }

    pub fn total(&self) -> usize {
        self.events.len() + self.hidden_count
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// "+N more" when truncation hid anything.
    pub fn more_label(&self) -> Option<String> {
        (self.hidden_count > 0).then(|| format!("+{} more", self.hidden_count))
    }
}

/// An event positioned on the day-view time axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedBlock {
    pub event: CalendarEvent,
    pub offset_px: f64,
    pub height_px: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayTimeline {
    pub date: NaiveDate,
    pub hour_slots: Vec<HourSlot>,
    pub blocks: Vec<TimedBlock>,
}

/// Result of intersecting an event collection with a resolved range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPlacement {
    pub mode: ViewMode,
    /// One bucket per day of the range, keyed by date.
    pub buckets: BTreeMap<NaiveDate, DayBucket>,
    /// Present for the day view only.
    pub timeline: Option<DayTimeline>,
}

impl EventPlacement {
    pub fn bucket(&self, date: NaiveDate) -> Option<&DayBucket> {
        self.buckets.get(&date)
    }

    /// Displayed events for `date`; empty outside the range.
    pub fn events_on(&self, date: NaiveDate) -> &[CalendarEvent] {
        self.buckets.get(&date).map_or(&[], |bucket| bucket.events.as_slice())
    }
}
