//! Date/view projection: maps an event's date, lane assignment and the
//! current view state to screen visibility and geometry.
//!
//! These are pure functions over a `ViewMode` tag; the UI only converts
//! the resulting spans into paint rectangles.

use chrono::{DateTime, Local, NaiveDate};

use crate::models::event::Event;
use crate::models::settings::ViewMode;
use crate::utils::date::{days_since, time_of_day_hours, week_start};

/// Horizontal sentinel for hidden events. Far off-surface rather than 0 so
/// a stale element can never sit under the pointer.
pub const HIDDEN_OFFSET: f32 = -10_000.0;

/// Default vertical scale of the time grid.
pub const PIXELS_PER_HOUR: f32 = 60.0;

pub const DAYS_PER_WEEK: i64 = 7;

/// Horizontal placement of an event on the schedule surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalSpan {
    pub x: f32,
    pub width: f32,
}

impl HorizontalSpan {
    pub const HIDDEN: Self = Self {
        x: HIDDEN_OFFSET,
        width: 0.0,
    };
}

/// Vertical placement of a timed event within a day column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalSpan {
    pub top: f32,
    pub height: f32,
}

/// Whether an event on `day` shows under the given view state.
pub fn is_visible(day: NaiveDate, mode: ViewMode, anchor: NaiveDate) -> bool {
    match mode {
        ViewMode::Day => day == anchor,
        ViewMode::Week => {
            let start = week_start(anchor);
            let end = start + chrono::Duration::days(DAYS_PER_WEEK);
            day >= start && day < end
        }
    }
}

/// Horizontal span for an event, or the hidden sentinel when it falls
/// outside the visible range.
///
/// All-day events always project full-width (a single column) regardless
/// of their stack slot; their `column_index` is a vertical offset only.
pub fn horizontal_span(
    event: &Event,
    mode: ViewMode,
    anchor: NaiveDate,
    surface_width: f32,
) -> HorizontalSpan {
    let day = event.day();
    if !is_visible(day, mode, anchor) {
        return HorizontalSpan::HIDDEN;
    }

    let (column, total_columns) = if event.all_day {
        (0, 1)
    } else {
        (event.column_index, event.max_column_index + 1)
    };

    match mode {
        ViewMode::Day => {
            let column_width = surface_width / total_columns as f32;
            HorizontalSpan {
                x: column as f32 * column_width,
                width: column_width,
            }
        }
        ViewMode::Week => {
            let day_column_width = surface_width / DAYS_PER_WEEK as f32;
            let day_offset = days_since(week_start(anchor), day) as f32 * day_column_width;
            let item_width = day_column_width / total_columns.max(1) as f32;
            HorizontalSpan {
                x: day_offset + column as f32 * item_width,
                width: item_width,
            }
        }
    }
}

/// Vertical span for a timed event given the visible hour window.
pub fn vertical_span(
    start: DateTime<Local>,
    duration_hours: f64,
    display_start_hour: u8,
    pixels_per_hour: f32,
) -> VerticalSpan {
    let top = (time_of_day_hours(start) - display_start_hour as f64) as f32 * pixels_per_hour;
    VerticalSpan {
        top,
        height: duration_hours as f32 * pixels_per_hour,
    }
}

/// Total height of the time grid for the visible hour window.
pub fn grid_height(display_start_hour: u8, display_end_hour: u8, pixels_per_hour: f32) -> f32 {
    (display_end_hour.saturating_sub(display_start_hour)) as f32 * pixels_per_hour
}

/// Whole-hour gridline labels, inclusive of both window bounds.
pub fn hour_labels(display_start_hour: u8, display_end_hour: u8) -> Vec<String> {
    (display_start_hour..=display_end_hour)
        .map(|h| format!("{}:00", h))
        .collect()
}
