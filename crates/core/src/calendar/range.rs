//! Range resolution for the month, week and day views
//!
//! All functions are total: dates near the representable limits saturate
//! instead of failing.

use chrono::{Datelike, Days, Months, NaiveDate};
use daybook_domain::constants::{DAYS_PER_WEEK, HOURS_PER_DAY, WEEK_START};
use daybook_domain::{DayCell, HourSlot, RangeDescriptor, ViewMode};

/// Week-start day on or before `date`.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    let offset = (date.weekday().num_days_from_sunday() + 7 - WEEK_START.num_days_from_sunday()) % 7;
    date.checked_sub_days(Days::new(u64::from(offset))).unwrap_or(date)
}

/// Last day of the week containing `date`.
pub fn end_of_week(date: NaiveDate) -> NaiveDate {
    let start = start_of_week(date);
    start.checked_add_days(Days::new(DAYS_PER_WEEK as u64 - 1)).unwrap_or(NaiveDate::MAX)
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// The 24 fixed hourly slots of the day and week views.
pub fn hour_slots() -> Vec<HourSlot> {
    (0..HOURS_PER_DAY).map(HourSlot::new).collect()
}

/// Resolve the concrete days a view must render for `reference_date`.
///
/// - month: whole weeks from the week containing the 1st to the week
///   containing the last day of the month
/// - week: the seven days starting on the week-start day
/// - day: the reference day alone, plus hourly slots
///
/// `in_current_month` is relative to the reference date's month.
pub fn resolve_range(reference_date: NaiveDate, mode: ViewMode) -> RangeDescriptor {
    let (first, last) = match mode {
        ViewMode::Month => {
            (start_of_week(first_of_month(reference_date)), end_of_week(last_of_month(reference_date)))
        }
        ViewMode::Week => (start_of_week(reference_date), end_of_week(reference_date)),
        ViewMode::Day => (reference_date, reference_date),
    };

    let days = std::iter::successors(Some(first), |date| date.succ_opt())
        .take_while(|date| *date <= last)
        .map(|date| DayCell {
            date,
            in_current_month: date.year() == reference_date.year()
                && date.month() == reference_date.month(),
            is_today: false,
        })
        .collect();

    let hour_slots = match mode {
        ViewMode::Month => Vec::new(),
        ViewMode::Week | ViewMode::Day => hour_slots(),
    };

    RangeDescriptor {
        mode,
        reference_date,
        start: first,
        end: last.succ_opt().unwrap_or(last),
        days,
        hour_slots,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn start_of_week_is_sunday_on_or_before() {
        assert_eq!(start_of_week(date(2024, 3, 10)), date(2024, 3, 10));
        assert_eq!(start_of_week(date(2024, 3, 13)), date(2024, 3, 10));
        assert_eq!(start_of_week(date(2024, 3, 16)), date(2024, 3, 10));
        assert_eq!(start_of_week(date(2024, 3, 16)).weekday(), Weekday::Sun);
    }

    #[test]
    fn month_grid_for_march_2024_has_six_rows() {
        // 1 March 2024 is a Friday, 31 March a Sunday.
        let range = resolve_range(date(2024, 3, 15), ViewMode::Month);
        assert_eq!(range.start, date(2024, 2, 25));
        assert_eq!(range.end, date(2024, 4, 7));
        assert_eq!(range.len_days(), 42);
        assert_eq!(range.weeks().count(), 6);
        assert!(range.hour_slots.is_empty());
    }

    #[test]
    fn month_grid_for_february_2015_has_four_rows() {
        // 1 Feb 2015 is a Sunday and the month has exactly 28 days.
        let range = resolve_range(date(2015, 2, 10), ViewMode::Month);
        assert_eq!(range.len_days(), 28);
        assert!(range.days.iter().all(|cell| cell.in_current_month));
    }

    #[test]
    fn padding_days_are_flagged_outside_month() {
        let range = resolve_range(date(2024, 3, 1), ViewMode::Month);
        let first = range.days.first().unwrap();
        assert_eq!(first.date, date(2024, 2, 25));
        assert!(!first.in_current_month);
        assert!(range.days.iter().find(|cell| cell.date == date(2024, 3, 1)).unwrap().in_current_month);
    }

    #[test]
    fn today_is_flagged_only_on_request() {
        let range = resolve_range(date(2024, 3, 15), ViewMode::Month);
        assert!(range.today().is_none());

        let range = range.with_today(date(2024, 2, 26));
        assert_eq!(range.today().map(|cell| cell.date), Some(date(2024, 2, 26)));
        assert_eq!(range.days.iter().filter(|cell| cell.is_today).count(), 1);

        let range = range.with_today(date(2025, 1, 1));
        assert!(range.today().is_none());
    }

    #[test]
    fn week_range_spans_seven_days_with_hour_slots() {
        let range = resolve_range(date(2024, 1, 3), ViewMode::Week);
        assert_eq!(range.start, date(2023, 12, 31));
        assert_eq!(range.end, date(2024, 1, 7));
        assert_eq!(range.len_days(), 7);
        assert_eq!(range.hour_slots.len(), 24);
    }

    #[test]
    fn day_range_is_single_day() {
        let range = resolve_range(date(2024, 3, 10), ViewMode::Day);
        assert_eq!(range.dates().collect::<Vec<_>>(), vec![date(2024, 3, 10)]);
        assert_eq!(range.end, date(2024, 3, 11));
        assert_eq!(range.hour_slots.first().unwrap().label, "12 AM");
        assert_eq!(range.hour_slots.last().unwrap().hour, 23);
    }

    #[test]
    fn resolution_is_total_near_limits() {
        for mode in [ViewMode::Month, ViewMode::Week, ViewMode::Day] {
            let low = resolve_range(NaiveDate::MIN, mode);
            let high = resolve_range(NaiveDate::MAX, mode);
            assert!(!low.days.is_empty());
            assert!(!high.days.is_empty());
        }
    }
}
