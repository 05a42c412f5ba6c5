//! Event placement: which events land in which day bucket, and where a
//! timed event sits on the day-view axis.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Timelike};
use daybook_domain::constants::{MINUTES_PER_HOUR, MONTH_CELL_EVENT_LIMIT, PIXELS_PER_MINUTE};
use daybook_domain::{
    CalendarEvent, DayBucket, DayTimeline, EventPlacement, RangeDescriptor, TimedBlock, ViewMode,
};

/// Whether `event` should be shown on `date`.
///
/// Compares calendar days, not timestamps: the event is visible on every day
/// from its start day through its end day inclusive. The start-day identity
/// check is evaluated as well and either one grants visibility, which keeps
/// events whose end precedes their start visible on their start day.
pub fn is_visible_on(event: &CalendarEvent, date: NaiveDate) -> bool {
    let start_day = event.start_time.date();
    let end_day = event.end_time.date();

    let within_span = start_day <= date && date <= end_day;
    let same_day = start_day == date;
    within_span || same_day
}

/// Events visible on `date`, in source order.
pub fn events_for_date(events: &[CalendarEvent], date: NaiveDate) -> Vec<&CalendarEvent> {
    events.iter().filter(|event| is_visible_on(event, date)).collect()
}

/// Position of `event` on the day-view axis.
///
/// Offset is minutes since midnight of the start time, height the duration in
/// minutes, both at [`PIXELS_PER_MINUTE`]. Concurrent events overlap.
///
/// The offset always comes from the event's own start time. An event carried
/// in from an earlier day therefore keeps its earlier-day offset and full
/// duration, and can extend past the bottom of the 24-hour axis; clip it in
/// the view.
pub fn timed_block(event: &CalendarEvent) -> TimedBlock {
    let start = event.start_time.time();
    let minutes_from_midnight = i64::from(start.hour()) * MINUTES_PER_HOUR + i64::from(start.minute());

    TimedBlock {
        event: event.clone(),
        offset_px: minutes_from_midnight as f64 * PIXELS_PER_MINUTE,
        height_px: event.duration_minutes() as f64 * PIXELS_PER_MINUTE,
    }
}

/// Intersect `events` with `range`.
///
/// Every day of the range gets a bucket (possibly empty). Month cells show at
/// most [`MONTH_CELL_EVENT_LIMIT`] events and count the rest as hidden; week
/// and day buckets are never truncated. The day view additionally gets a
/// timeline of positioned blocks.
pub fn place_events(events: &[CalendarEvent], range: &RangeDescriptor) -> EventPlacement {
    let buckets: BTreeMap<NaiveDate, DayBucket> = range
        .dates()
        .map(|date| {
            let visible = events_for_date(events, date);
            let shown = match range.mode {
                ViewMode::Month => visible.len().min(MONTH_CELL_EVENT_LIMIT),
                ViewMode::Week | ViewMode::Day => visible.len(),
            };
            let bucket = DayBucket {
                date,
                events: visible[..shown].iter().map(|event| (*event).clone()).collect(),
                hidden_count: visible.len() - shown,
            };
            (date, bucket)
        })
        .collect();

    let timeline = match range.mode {
        ViewMode::Day => Some(DayTimeline {
            date: range.start,
            hour_slots: range.hour_slots.clone(),
            blocks: buckets
                .get(&range.start)
                .map(|bucket| bucket.events.iter().map(timed_block).collect())
                .unwrap_or_default(),
        }),
        ViewMode::Month | ViewMode::Week => None,
    };

    EventPlacement { mode: range.mode, buckets, timeline }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;
    use daybook_domain::EventDraft;

    use super::*;
    use crate::calendar::range::resolve_range;

    fn at(m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
    }

    fn event(title: &str, start: NaiveDateTime, end: NaiveDateTime) -> CalendarEvent {
        CalendarEvent::from_draft(EventDraft::new(title, start, end), "user-1", Some(title.into()))
    }

    #[test]
    fn event_ending_at_midnight_touches_next_day() {
        let late = event("late", at(3, 10, 22, 0), at(3, 11, 0, 0));
        assert!(is_visible_on(&late, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()));
        assert!(is_visible_on(&late, NaiveDate::from_ymd_opt(2024, 3, 11).unwrap()));
        assert!(!is_visible_on(&late, NaiveDate::from_ymd_opt(2024, 3, 12).unwrap()));
    }

    #[test]
    fn event_ending_before_midnight_stays_on_its_day() {
        let evening = event("evening", at(3, 10, 22, 0), at(3, 10, 23, 59));
        assert!(is_visible_on(&evening, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()));
        assert!(!is_visible_on(&evening, NaiveDate::from_ymd_opt(2024, 3, 11).unwrap()));
    }

    #[test]
    fn inverted_event_remains_visible_on_start_day() {
        let inverted = event("inverted", at(3, 12, 9, 0), at(3, 10, 9, 0));
        assert!(is_visible_on(&inverted, NaiveDate::from_ymd_opt(2024, 3, 12).unwrap()));
        assert!(!is_visible_on(&inverted, NaiveDate::from_ymd_opt(2024, 3, 11).unwrap()));
    }

    #[test]
    fn week_buckets_are_not_truncated() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 13).unwrap();
        let events: Vec<_> =
            (0..5).map(|i| event(&format!("e{i}"), at(3, 13, 8 + i, 0), at(3, 13, 9 + i, 0))).collect();
        let placement = place_events(&events, &resolve_range(day, ViewMode::Week));

        let bucket = placement.bucket(day).unwrap();
        assert_eq!(bucket.events.len(), 5);
        assert_eq!(bucket.hidden_count, 0);
        assert!(placement.timeline.is_none());
    }

    #[test]
    fn buckets_keep_source_order() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 13).unwrap();
        let events = vec![
            event("afternoon", at(3, 13, 15, 0), at(3, 13, 16, 0)),
            event("morning", at(3, 13, 8, 0), at(3, 13, 9, 0)),
        ];
        let placement = place_events(&events, &resolve_range(day, ViewMode::Day));
        let titles: Vec<_> = placement.events_on(day).iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["afternoon", "morning"]);
    }

    #[test]
    fn every_range_day_gets_a_bucket() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 13).unwrap();
        let range = resolve_range(day, ViewMode::Month);
        let placement = place_events(&[], &range);
        assert_eq!(placement.buckets.len(), range.len_days());
        assert!(placement.buckets.values().all(DayBucket::is_empty));
    }

    #[test]
    fn day_timeline_positions_blocks() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let events = vec![event("standup", at(3, 10, 9, 15), at(3, 10, 9, 30))];
        let placement = place_events(&events, &resolve_range(day, ViewMode::Day));

        let timeline = placement.timeline.unwrap();
        assert_eq!(timeline.hour_slots.len(), 24);
        assert_eq!(timeline.blocks.len(), 1);
        assert_eq!(timeline.blocks[0].offset_px, 555.0 * PIXELS_PER_MINUTE);
        assert_eq!(timeline.blocks[0].height_px, 15.0 * PIXELS_PER_MINUTE);
    }
}
