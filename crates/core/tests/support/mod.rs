//! Shared test helpers for `daybook-core` integration tests.
//!
//! Lightweight in-memory mocks for every core port plus event fixtures, so
//! the tests can focus on behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod conference;
pub mod identity;
pub mod store;

use chrono::{NaiveDate, NaiveDateTime};
use daybook_domain::{CalendarEvent, EventDraft};

/// Local timestamp helper.
pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Persisted-looking event whose id equals its title.
pub fn event(title: &str, start: NaiveDateTime, end: NaiveDateTime) -> CalendarEvent {
    CalendarEvent::from_draft(EventDraft::new(title, start, end), "user-1", Some(title.to_string()))
}
