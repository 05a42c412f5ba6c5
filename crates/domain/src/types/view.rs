//! Navigation state of the calendar view

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::impl_domain_status_conversions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Month,
    Week,
    Day,
}

impl_domain_status_conversions!(ViewMode {
    Month => "month",
    Week => "week",
    Day => "day",
});

/// Reference date plus view mode. Owned by the presentation layer, never
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub reference_date: NaiveDate,
    pub mode: ViewMode,
}

impl ViewState {
    pub fn new(reference_date: NaiveDate, mode: ViewMode) -> Self {
        Self { reference_date, mode }
    }

    pub fn with_mode(self, mode: ViewMode) -> Self {
        Self { mode, ..self }
    }

    /// Jump back to `today`, keeping the mode.
    pub fn today(self, today: NaiveDate) -> Self {
        Self { reference_date: today, ..self }
    }

    /// Step one period back (month, 7 days or 1 day depending on mode).
    pub fn previous(self) -> Self {
        let date = self.reference_date;
        let reference_date = match self.mode {
            ViewMode::Month => date.checked_sub_months(Months::new(1)),
            ViewMode::Week => date.checked_sub_days(Days::new(7)),
            ViewMode::Day => date.pred_opt(),
        }
        .unwrap_or(date);
        Self { reference_date, ..self }
    }

    /// Step one period forward. Month steps clamp to the target month's
    /// last day (Jan 31 -> Feb 29).
    pub fn next(self) -> Self {
        let date = self.reference_date;
        let reference_date = match self.mode {
            ViewMode::Month => date.checked_add_months(Months::new(1)),
            ViewMode::Week => date.checked_add_days(Days::new(7)),
            ViewMode::Day => date.succ_opt(),
        }
        .unwrap_or(date);
        Self { reference_date, ..self }
    }

    /// Header text: "March 2024", or "Sunday, March 10, 2024" in day view.
    pub fn title(&self) -> String {
        match self.mode {
            ViewMode::Month | ViewMode::Week => self.reference_date.format("%B %Y").to_string(),
            ViewMode::Day => self.reference_date.format("%A, %B %-d, %Y").to_string(),
        }
    }
}
