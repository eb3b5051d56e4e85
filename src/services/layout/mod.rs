//! Overlap-layout engine: day grouping, interval clustering, column
//! assignment, all-day stacking and the pure projection/geometry math.
//!
//! Layout outputs (`column_index`, `max_column_index`) are transient; every
//! entry point here recomputes them from scratch for the days it touches.

pub mod clustering;
pub mod geometry;
pub mod projection;

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::models::event::Event;

pub use clustering::layout_day;

/// Vertical pitch of one all-day row, in pixels (22 px item + 2 px gap).
pub const ALL_DAY_ROW_PITCH: f32 = 24.0;
pub const ALL_DAY_PANEL_MARGIN: f32 = 6.0;
pub const ALL_DAY_PANEL_MIN_HEIGHT: f32 = 30.0;

/// Recompute layout for every day present in the collection.
pub fn relayout_all(events: &mut [Event]) {
    let days: BTreeSet<NaiveDate> = events.iter().map(|e| e.day()).collect();
    relayout_days(events, &days);
}

/// Recompute layout for the given days only.
///
/// Timed events are grouped by start date and run through the cluster
/// sweep; all-day events are stacked per date in title order, with
/// `column_index` as the stack slot. Events on other days keep their
/// current assignments.
pub fn relayout_days(events: &mut [Event], days: &BTreeSet<NaiveDate>) {
    let mut timed: BTreeMap<NaiveDate, Vec<usize>> = BTreeMap::new();
    let mut all_day: BTreeMap<NaiveDate, Vec<usize>> = BTreeMap::new();

    for (idx, event) in events.iter().enumerate() {
        let day = event.day();
        if !days.contains(&day) {
            continue;
        }
        if event.all_day {
            all_day.entry(day).or_default().push(idx);
        } else {
            timed.entry(day).or_default().push(idx);
        }
    }

    for members in timed.values() {
        clustering::layout_day_subset(events, members);
    }

    for members in all_day.values() {
        stack_all_day(events, members);
    }
}

/// All-day events never column-pack: each renders full-width and
/// `column_index` only offsets it vertically within its date's stack,
/// ordered by title (ties input-order-stable).
fn stack_all_day(events: &mut [Event], members: &[usize]) {
    let mut order: Vec<usize> = members.to_vec();
    order.sort_by(|&a, &b| events[a].title.cmp(&events[b].title));

    for (slot, &idx) in order.iter().enumerate() {
        events[idx].column_index = slot;
        events[idx].max_column_index = 0;
    }
}

/// Deepest all-day stack across all dates in the collection.
pub fn all_day_stack_depth(events: &[Event]) -> usize {
    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for event in events.iter().filter(|e| e.all_day) {
        *counts.entry(event.day()).or_default() += 1;
    }
    counts.values().copied().max().unwrap_or(0)
}

/// Height of the all-day ribbon for the given stack depth.
pub fn all_day_panel_height(stack_depth: usize) -> f32 {
    (stack_depth as f32 * ALL_DAY_ROW_PITCH + ALL_DAY_PANEL_MARGIN)
        .max(ALL_DAY_PANEL_MIN_HEIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Local, TimeZone};

    fn at(day: u32, hour: u32, min: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 12, day, hour, min, 0).unwrap()
    }

    fn timed(title: &str, start: DateTime<Local>, end: DateTime<Local>) -> Event {
        Event::new(title, start, end).unwrap()
    }

    fn all_day(title: &str, day: u32) -> Event {
        Event::builder()
            .title(title)
            .start(at(day, 0, 0))
            .end(at(day, 0, 0) + Duration::days(1))
            .all_day(true)
            .build()
            .unwrap()
    }

    #[test]
    fn test_relayout_all_groups_by_day() {
        // Same clock times on different days never cluster together.
        let mut events = vec![
            timed("wed-a", at(4, 9, 0), at(4, 10, 0)),
            timed("thu-a", at(5, 9, 30), at(5, 10, 30)),
            timed("wed-b", at(4, 9, 30), at(4, 10, 30)),
        ];
        relayout_all(&mut events);

        assert_eq!(events[0].max_column_index, 1);
        assert_eq!(events[2].max_column_index, 1);
        assert_eq!(events[1].column_index, 0);
        assert_eq!(events[1].max_column_index, 0);
    }

    #[test]
    fn test_midnight_crossing_event_stays_on_start_day() {
        let mut events = vec![
            timed("late", at(4, 23, 50), at(5, 0, 10)),
            timed("thu-early", at(5, 0, 0), at(5, 1, 0)),
        ];
        relayout_all(&mut events);

        // Different day-groups, so no packing between them.
        assert_eq!(events[0].max_column_index, 0);
        assert_eq!(events[1].max_column_index, 0);
    }

    #[test]
    fn test_all_day_excluded_from_packing() {
        let mut events = vec![
            timed("meeting", at(4, 9, 0), at(4, 10, 0)),
            all_day("offsite", 4),
        ];
        relayout_all(&mut events);

        assert_eq!(events[0].max_column_index, 0);
        assert_eq!(events[1].column_index, 0);
        assert_eq!(events[1].max_column_index, 0);
    }

    #[test]
    fn test_all_day_stacked_by_title() {
        let mut events = vec![
            all_day("zebra", 4),
            all_day("alpha", 4),
            all_day("middle", 4),
        ];
        relayout_all(&mut events);

        assert_eq!(events[1].column_index, 0); // alpha
        assert_eq!(events[2].column_index, 1); // middle
        assert_eq!(events[0].column_index, 2); // zebra
    }

    #[test]
    fn test_relayout_days_only_touches_requested() {
        let mut events = vec![
            timed("wed", at(4, 9, 0), at(4, 10, 0)),
            timed("thu", at(5, 9, 0), at(5, 10, 0)),
        ];
        events[1].column_index = 9;
        events[1].max_column_index = 9;

        let days: BTreeSet<NaiveDate> = [at(4, 0, 0).date_naive()].into_iter().collect();
        relayout_days(&mut events, &days);

        assert_eq!(events[0].column_index, 0);
        assert_eq!(events[1].column_index, 9);
    }

    #[test]
    fn test_stack_depth_is_max_across_dates() {
        let events = vec![
            all_day("a", 4),
            all_day("b", 4),
            all_day("c", 4),
            all_day("d", 5),
        ];
        assert_eq!(all_day_stack_depth(&events), 3);
    }

    #[test]
    fn test_panel_height() {
        assert_eq!(all_day_panel_height(0), ALL_DAY_PANEL_MIN_HEIGHT);
        assert_eq!(all_day_panel_height(1), ALL_DAY_PANEL_MIN_HEIGHT);
        assert_eq!(all_day_panel_height(2), 2.0 * 24.0 + 6.0);
        assert_eq!(all_day_panel_height(4), 4.0 * 24.0 + 6.0);
    }
}
