// Settings module
// View preferences persisted as a flat JSON record

use serde::{Deserialize, Serialize};

/// Which projection the schedule surface uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ViewMode {
    #[default]
    Day,
    Week,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub show_side_panel: bool,
    pub edit_mode: bool,
    pub view_mode: ViewMode,
    pub display_start_hour: u8,
    pub display_end_hour: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_side_panel: true,
            edit_mode: true,
            view_mode: ViewMode::Day,
            display_start_hour: 0,
            display_end_hour: 24,
        }
    }
}

impl Settings {
    /// Force the visible time window into `0 <= start < end <= 24`.
    /// Applied on load and after every edit so downstream projection
    /// never sees an empty or inverted window.
    pub fn clamp_display_hours(&mut self) {
        self.display_start_hour = self.display_start_hour.min(23);
        self.display_end_hour = self
            .display_end_hour
            .clamp(self.display_start_hour + 1, 24);
    }

    pub fn set_display_start_hour(&mut self, hour: u8) {
        self.display_start_hour = hour.min(self.display_end_hour.saturating_sub(1));
    }

    pub fn set_display_end_hour(&mut self, hour: u8) {
        self.display_end_hour = hour.clamp(self.display_start_hour + 1, 24);
    }
}
