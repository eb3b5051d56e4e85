//! Day/Week navigation state machine.
//!
//! `{Day, Week} × anchor date`, with Next/Previous/Today/SetMode
//! transitions. Transitions never touch events; only projection outputs
//! change when the state does.

use chrono::{Duration, NaiveDate};

use crate::models::settings::ViewMode;
use crate::services::layout::projection::DAYS_PER_WEEK;
use crate::utils::date::week_start;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub mode: ViewMode,
    pub anchor: NaiveDate,
}

impl ViewState {
    pub fn new(mode: ViewMode, anchor: NaiveDate) -> Self {
        Self { mode, anchor }
    }

    fn step(&self) -> Duration {
        match self.mode {
            ViewMode::Day => Duration::days(1),
            ViewMode::Week => Duration::days(DAYS_PER_WEEK),
        }
    }

    pub fn next(&mut self) {
        self.anchor += self.step();
    }

    pub fn previous(&mut self) {
        self.anchor -= self.step();
    }

    pub fn today(&mut self, today: NaiveDate) {
        self.anchor = today;
    }

    /// Switch views in place; the anchor date is kept.
    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    /// The Monday on or before the anchor.
    pub fn week_start(&self) -> NaiveDate {
        week_start(self.anchor)
    }

    /// Dates currently on screen: the anchor alone, or its Monday-based
    /// week.
    pub fn visible_days(&self) -> Vec<NaiveDate> {
        match self.mode {
            ViewMode::Day => vec![self.anchor],
            ViewMode::Week => {
                let start = self.week_start();
                (0..DAYS_PER_WEEK).map(|i| start + Duration::days(i)).collect()
            }
        }
    }

    /// Title-bar heading for the current state.
    pub fn heading(&self) -> String {
        match self.mode {
            ViewMode::Day => self.anchor.format("%A, %B %-d, %Y").to_string(),
            ViewMode::Week => {
                let start = self.week_start();
                let end = start + Duration::days(DAYS_PER_WEEK - 1);
                if start.format("%B").to_string() == end.format("%B").to_string() {
                    format!(
                        "{} - {}",
                        start.format("%B %-d"),
                        end.format("%-d, %Y")
                    )
                } else {
                    format!(
                        "{} - {}",
                        start.format("%B %-d"),
                        end.format("%B %-d, %Y")
                    )
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, day).unwrap()
    }

    #[test]
    fn test_day_mode_steps_one_day() {
        let mut state = ViewState::new(ViewMode::Day, date(4));
        state.next();
        assert_eq!(state.anchor, date(5));
        state.previous();
        state.previous();
        assert_eq!(state.anchor, date(3));
    }

    #[test]
    fn test_week_mode_steps_seven_days() {
        let mut state = ViewState::new(ViewMode::Week, date(4));
        state.next();
        assert_eq!(state.anchor, date(11));
        state.previous();
        assert_eq!(state.anchor, date(4));
    }

    #[test]
    fn test_today_resets_anchor() {
        let mut state = ViewState::new(ViewMode::Week, date(25));
        state.today(date(4));
        assert_eq!(state.anchor, date(4));
        assert_eq!(state.mode, ViewMode::Week);
    }

    #[test]
    fn test_set_mode_keeps_anchor() {
        let mut state = ViewState::new(ViewMode::Day, date(4));
        state.set_mode(ViewMode::Week);
        assert_eq!(state.anchor, date(4));
        assert_eq!(state.mode, ViewMode::Week);
    }

    #[test]
    fn test_visible_days_day_mode() {
        let state = ViewState::new(ViewMode::Day, date(4));
        assert_eq!(state.visible_days(), vec![date(4)]);
    }

    #[test]
    fn test_visible_days_week_mode() {
        // Wednesday Dec 4 -> Mon Dec 2 .. Sun Dec 8
        let state = ViewState::new(ViewMode::Week, date(4));
        let days = state.visible_days();
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], date(2));
        assert_eq!(days[6], date(8));
    }

    #[test]
    fn test_week_start_from_any_weekday() {
        for day in 2..=8 {
            let state = ViewState::new(ViewMode::Week, date(day));
            assert_eq!(state.week_start(), date(2));
        }
    }

    #[test]
    fn test_heading_day_mode() {
        let state = ViewState::new(ViewMode::Day, date(4));
        assert_eq!(state.heading(), "Wednesday, December 4, 2024");
    }

    #[test]
    fn test_heading_week_same_month() {
        let state = ViewState::new(ViewMode::Week, date(4));
        assert_eq!(state.heading(), "December 2 - 8, 2024");
    }

    #[test]
    fn test_heading_week_spanning_months() {
        // Week of Mon Dec 30, 2024 .. Sun Jan 5, 2025
        let state = ViewState::new(ViewMode::Week, date(31));
        assert_eq!(state.heading(), "December 30 - January 5, 2025");
    }
}
