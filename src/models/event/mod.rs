// Event module
// Schedule event model with transient overlap-layout fields

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Color assigned to events created by the live recorder.
pub const RECORDING_COLOR: &str = "#FF8C00";

/// A single scheduled (or recorded) block of time.
///
/// `column_index` and `max_column_index` are outputs of the overlap-layout
/// engine. They are recomputed after every structural change and on load;
/// they are never authoritative and are excluded from the persisted form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    #[serde(default)]
    pub all_day: bool,
    pub color: Option<String>,
    /// Lane within the event's overlap cluster (or stack slot for all-day).
    #[serde(skip)]
    pub column_index: usize,
    /// Highest lane index used in the cluster; uniform across the cluster.
    #[serde(skip)]
    pub max_column_index: usize,
}

impl Event {
    /// Create a new event with required fields
    ///
    /// # Arguments
    /// * `title` - Event title (required, non-empty)
    /// * `start` - Event start time
    /// * `end` - Event end time
    pub fn new(
        title: impl Into<String>,
        start: DateTime<Local>,
        end: DateTime<Local>,
    ) -> Result<Self, String> {
        let title = title.into();

        if title.trim().is_empty() {
            return Err("Event title cannot be empty".to_string());
        }

        if end <= start {
            return Err("Event end time must be after start time".to_string());
        }

        Ok(Self {
            id: None,
            title,
            content: String::new(),
            start,
            end,
            all_day: false,
            color: None,
            column_index: 0,
            max_column_index: 0,
        })
    }

    /// Create a builder for constructing events with optional fields
    pub fn builder() -> EventBuilder {
        EventBuilder::new()
    }

    /// Validate the event
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Event title cannot be empty".to_string());
        }

        if self.end <= self.start {
            return Err("Event end time must be after start time".to_string());
        }

        // Validate color format if present (should be hex color)
        if let Some(ref color) = self.color {
            if !color.starts_with('#') || (color.len() != 7 && color.len() != 4) {
                return Err("Color must be in hex format (#RRGGBB or #RGB)".to_string());
            }
        }

        Ok(())
    }

    /// The calendar date this event belongs to for layout and grouping.
    /// Always the date of `start`; an event crossing midnight is not split.
    pub fn day(&self) -> NaiveDate {
        self.start.date_naive()
    }

    /// Get the duration of the event
    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }

    /// Duration in fractional hours, used by the vertical projection.
    pub fn duration_hours(&self) -> f64 {
        self.duration().num_seconds() as f64 / 3600.0
    }
}

/// Builder for creating events with optional fields
pub struct EventBuilder {
    title: Option<String>,
    content: Option<String>,
    start: Option<DateTime<Local>>,
    end: Option<DateTime<Local>>,
    all_day: bool,
    color: Option<String>,
}

impl EventBuilder {
    pub fn new() -> Self {
        Self {
            title: None,
            content: None,
            start: None,
            end: None,
            all_day: false,
            color: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn start(mut self, start: DateTime<Local>) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: DateTime<Local>) -> Self {
        self.end = Some(end);
        self
    }

    pub fn all_day(mut self, all_day: bool) -> Self {
        self.all_day = all_day;
        self
    }

    /// Set the event color tag (hex format)
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Build the event
    pub fn build(self) -> Result<Event, String> {
        let title = self.title.ok_or("Event title is required")?;
        let start = self.start.ok_or("Event start time is required")?;
        let end = self.end.ok_or("Event end time is required")?;

        let event = Event {
            id: None,
            title,
            content: self.content.unwrap_or_default(),
            start,
            end,
            all_day: self.all_day,
            color: self.color,
            column_index: 0,
            max_column_index: 0,
        };

        event.validate()?;
        Ok(event)
    }
}

impl Default for EventBuilder {
    fn default() -> Self {
        Self::new()
    }
}
