//! Settings persistence with an explicit commit boundary.
//!
//! Settings load once at startup (clamped) and save through a short
//! debounce rather than on every field twiddle; `flush` runs
//! unconditionally on exit.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::models::settings::Settings;

/// How long edits may sit unsaved before the next tick writes them out.
const SAVE_DEBOUNCE: Duration = Duration::from_secs(1);

pub struct SettingsService {
    path: PathBuf,
    dirty_since: Option<Instant>,
}

impl SettingsService {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            dirty_since: None,
        }
    }

    /// Load settings, clamping the display-hour window. Missing or
    /// malformed files yield defaults.
    pub fn load(&self) -> Settings {
        let mut settings = if self.path.exists() {
            match self.read() {
                Ok(settings) => settings,
                Err(err) => {
                    log::warn!("failed to load settings: {:#}, using defaults", err);
                    Settings::default()
                }
            }
        } else {
            Settings::default()
        };
        settings.clamp_display_hours();
        settings
    }

    fn read(&self) -> Result<Settings> {
        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("failed to deserialize {}", self.path.display()))
    }

    /// Record that settings changed; the actual write happens on the next
    /// debounced flush.
    pub fn mark_dirty(&mut self) {
        if self.dirty_since.is_none() {
            self.dirty_since = Some(Instant::now());
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty_since.is_some()
    }

    /// Write pending changes once they have been stable for the debounce
    /// interval. Returns whether a save happened.
    pub fn flush_if_due(&mut self, settings: &Settings) -> bool {
        match self.dirty_since {
            Some(since) if since.elapsed() >= SAVE_DEBOUNCE => {
                self.flush(settings);
                true
            }
            _ => false,
        }
    }

    /// Write immediately if dirty; failures are logged and swallowed.
    pub fn flush(&mut self, settings: &Settings) {
        if self.dirty_since.take().is_none() {
            return;
        }
        if let Err(err) = self.write(settings) {
            log::error!("failed to save settings: {:#}", err);
        }
    }

    fn write(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create dir {}", parent.display()))?;
        }
        let data = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, data)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::settings::ViewMode;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_file_defaults() {
        let dir = tempdir().unwrap();
        let service = SettingsService::new(dir.path().join(crate::services::persistence::SETTINGS_FILE));
        assert_eq!(service.load(), Settings::default());
    }

    #[test]
    fn test_flush_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut service = SettingsService::new(path.clone());

        let settings = Settings {
            show_side_panel: false,
            edit_mode: false,
            view_mode: ViewMode::Week,
            display_start_hour: 7,
            display_end_hour: 22,
        };
        service.mark_dirty();
        service.flush(&settings);
        assert!(!service.is_dirty());

        let reloaded = SettingsService::new(path).load();
        assert_eq!(reloaded, settings);
    }

    #[test]
    fn test_flush_without_dirty_writes_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut service = SettingsService::new(path.clone());
        service.flush(&Settings::default());
        assert!(!path.exists());
    }

    #[test]
    fn test_flush_if_due_respects_debounce() {
        let dir = tempdir().unwrap();
        let mut service = SettingsService::new(dir.path().join("settings.json"));
        service.mark_dirty();
        // Marked just now, so the debounce window has not elapsed.
        assert!(!service.flush_if_due(&Settings::default()));
        assert!(service.is_dirty());
    }

    #[test]
    fn test_load_clamps_corrupt_hours() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{"show_side_panel":true,"edit_mode":true,"view_mode":"Day","display_start_hour":23,"display_end_hour":5}"#,
        )
        .unwrap();

        let settings = SettingsService::new(path).load();
        assert!(settings.display_start_hour < settings.display_end_hour);
        assert!(settings.display_end_hour <= 24);
    }

    #[test]
    fn test_load_malformed_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json at all").unwrap();
        assert_eq!(SettingsService::new(path).load(), Settings::default());
    }
}
