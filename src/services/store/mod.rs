//! Schedule store: the ordered event collection and its mutation API.
//!
//! Mutations return the set of calendar days whose membership or time
//! bounds changed; the caller then applies `relayout` for exactly those
//! days. There is no implicit change broadcast; recomputation is an
//! explicit, testable step.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::event::Event;
use crate::services::layout;

/// Days whose layout must be recomputed after a mutation.
pub type AffectedDays = BTreeSet<NaiveDate>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no event with id {0}")]
    UnknownEvent(i64),
    #[error("event has no id")]
    MissingId,
}

#[derive(Debug)]
pub struct ScheduleStore {
    events: Vec<Event>,
    next_id: i64,
    all_day_panel_height: f32,
}

impl ScheduleStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            next_id: 1,
            all_day_panel_height: layout::all_day_panel_height(0),
        }
    }

    /// Build a store from loaded events. Missing ids are assigned, and a
    /// full relayout replaces whatever layout values were in the file.
    pub fn from_events(events: Vec<Event>) -> Self {
        let mut store = Self::new();
        for mut event in events {
            if event.id.is_none() {
                event.id = Some(store.next_id);
            }
            store.next_id = store.next_id.max(event.id.unwrap_or(0) + 1);
            store.events.push(event);
        }
        store.relayout_all();
        store
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, id: i64) -> Option<&Event> {
        self.events.iter().find(|e| e.id == Some(id))
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Height of the all-day ribbon, from the deepest stack on record.
    pub fn all_day_panel_height(&self) -> f32 {
        self.all_day_panel_height
    }

    /// Add an event, assigning its id. Degenerate durations are accepted;
    /// the editing UI is responsible for preventing them, and the layout
    /// engine treats them as defined input (they never extend a cluster).
    pub fn add(&mut self, mut event: Event) -> (i64, AffectedDays) {
        if let Err(reason) = event.validate() {
            log::warn!("adding event that fails validation: {}", reason);
        }
        let id = self.next_id;
        self.next_id += 1;
        event.id = Some(id);

        let mut affected = AffectedDays::new();
        affected.insert(event.day());
        self.events.push(event);
        (id, affected)
    }

    /// Replace the event carrying the same id. Both the old and the new
    /// day are affected when the event moved across days.
    pub fn update(&mut self, event: Event) -> Result<AffectedDays, StoreError> {
        let id = event.id.ok_or(StoreError::MissingId)?;
        let slot = self
            .events
            .iter_mut()
            .find(|e| e.id == Some(id))
            .ok_or(StoreError::UnknownEvent(id))?;

        let mut affected = AffectedDays::new();
        affected.insert(slot.day());
        affected.insert(event.day());
        *slot = event;
        Ok(affected)
    }

    pub fn remove(&mut self, id: i64) -> Result<(Event, AffectedDays), StoreError> {
        let pos = self
            .events
            .iter()
            .position(|e| e.id == Some(id))
            .ok_or(StoreError::UnknownEvent(id))?;
        let event = self.events.remove(pos);

        let mut affected = AffectedDays::new();
        affected.insert(event.day());
        Ok((event, affected))
    }

    /// Re-run the layout engine for the given days and refresh the
    /// all-day ribbon height.
    pub fn relayout(&mut self, days: &AffectedDays) {
        layout::relayout_days(&mut self.events, days);
        self.all_day_panel_height =
            layout::all_day_panel_height(layout::all_day_stack_depth(&self.events));
    }

    pub fn relayout_all(&mut self) {
        layout::relayout_all(&mut self.events);
        self.all_day_panel_height =
            layout::all_day_panel_height(layout::all_day_stack_depth(&self.events));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Local, TimeZone};

    fn at(day: u32, hour: u32, min: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 12, day, hour, min, 0).unwrap()
    }

    fn event(title: &str, start: DateTime<Local>, end: DateTime<Local>) -> Event {
        Event::new(title, start, end).unwrap()
    }

    #[test]
    fn test_add_assigns_sequential_ids() {
        let mut store = ScheduleStore::new();
        let (a, _) = store.add(event("A", at(4, 9, 0), at(4, 10, 0)));
        let (b, _) = store.add(event("B", at(4, 11, 0), at(4, 12, 0)));
        assert_eq!(a, 1);
        assert_eq!(b, 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_add_reports_affected_day() {
        let mut store = ScheduleStore::new();
        let (_, affected) = store.add(event("A", at(4, 9, 0), at(4, 10, 0)));
        assert_eq!(affected.len(), 1);
        assert!(affected.contains(&at(4, 0, 0).date_naive()));
    }

    #[test]
    fn test_update_across_days_affects_both() {
        let mut store = ScheduleStore::new();
        let (id, _) = store.add(event("A", at(4, 9, 0), at(4, 10, 0)));

        let mut moved = store.get(id).unwrap().clone();
        moved.start = at(5, 9, 0);
        moved.end = at(5, 10, 0);
        let affected = store.update(moved).unwrap();

        assert!(affected.contains(&at(4, 0, 0).date_naive()));
        assert!(affected.contains(&at(5, 0, 0).date_naive()));
    }

    #[test]
    fn test_update_unknown_id() {
        let mut store = ScheduleStore::new();
        let mut orphan = event("X", at(4, 9, 0), at(4, 10, 0));
        orphan.id = Some(99);
        assert!(matches!(
            store.update(orphan),
            Err(StoreError::UnknownEvent(99))
        ));
    }

    #[test]
    fn test_update_without_id() {
        let mut store = ScheduleStore::new();
        let orphan = event("X", at(4, 9, 0), at(4, 10, 0));
        assert!(matches!(store.update(orphan), Err(StoreError::MissingId)));
    }

    #[test]
    fn test_remove_returns_event_and_day() {
        let mut store = ScheduleStore::new();
        let (id, _) = store.add(event("A", at(4, 9, 0), at(4, 10, 0)));
        let (removed, affected) = store.remove(id).unwrap();
        assert_eq!(removed.title, "A");
        assert!(affected.contains(&at(4, 0, 0).date_naive()));
        assert!(store.is_empty());
    }

    #[test]
    fn test_mutation_then_relayout_packs_columns() {
        let mut store = ScheduleStore::new();
        let (_, d1) = store.add(event("B", at(4, 10, 0), at(4, 11, 0)));
        store.relayout(&d1);
        assert_eq!(store.events()[0].max_column_index, 0);

        let (_, d2) = store.add(event("C", at(4, 10, 30), at(4, 11, 30)));
        store.relayout(&d2);

        let b = store.events().iter().find(|e| e.title == "B").unwrap();
        let c = store.events().iter().find(|e| e.title == "C").unwrap();
        assert_eq!((b.column_index, b.max_column_index), (0, 1));
        assert_eq!((c.column_index, c.max_column_index), (1, 1));
    }

    #[test]
    fn test_remove_then_relayout_collapses_columns() {
        let mut store = ScheduleStore::new();
        let (_, _) = store.add(event("B", at(4, 10, 0), at(4, 11, 0)));
        let (id_c, _) = store.add(event("C", at(4, 10, 30), at(4, 11, 30)));
        store.relayout_all();

        let (_, affected) = store.remove(id_c).unwrap();
        store.relayout(&affected);

        let b = store.events().iter().find(|e| e.title == "B").unwrap();
        assert_eq!((b.column_index, b.max_column_index), (0, 0));
    }

    #[test]
    fn test_from_events_assigns_missing_ids_and_layout() {
        let events = vec![
            event("B", at(4, 10, 0), at(4, 11, 0)),
            event("C", at(4, 10, 30), at(4, 11, 30)),
        ];
        let store = ScheduleStore::from_events(events);
        assert!(store.events().iter().all(|e| e.id.is_some()));
        assert!(store.events().iter().all(|e| e.max_column_index == 1));
    }

    #[test]
    fn test_all_day_panel_height_tracks_depth() {
        let mut store = ScheduleStore::new();
        assert_eq!(store.all_day_panel_height(), 30.0);

        for title in ["a", "b", "c"] {
            let mut e = event(title, at(4, 0, 0), at(4, 23, 0));
            e.all_day = true;
            let (_, affected) = store.add(e);
            store.relayout(&affected);
        }
        assert_eq!(store.all_day_panel_height(), 3.0 * 24.0 + 6.0);
    }
}
