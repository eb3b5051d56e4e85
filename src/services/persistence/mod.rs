//! JSON file persistence for events and weekly memos.
//!
//! The core never sees malformed input: a missing or unreadable events
//! file falls back to a built-in sample dataset, and all failures here are
//! logged and swallowed by the caller.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Duration, Local, NaiveDate};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::event::Event;

pub const EVENTS_FILE: &str = "schedules.json";
pub const MEMOS_FILE: &str = "memos.json";
pub const SETTINGS_FILE: &str = "settings.json";

/// Free-text memo per week, keyed by the Monday starting that week.
pub type MemoBook = BTreeMap<NaiveDate, String>;

/// Per-user data directory, created on demand. Falls back to the working
/// directory when the platform gives us nothing.
pub fn data_dir() -> PathBuf {
    let dir = ProjectDirs::from("", "", "timelane")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    if let Err(err) = fs::create_dir_all(&dir) {
        log::warn!("failed to create data dir {}: {}", dir.display(), err);
    }
    dir
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("failed to deserialize {}", path.display()))
}

fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create dir {}", parent.display()))?;
    }
    let data = serde_json::to_string_pretty(value)?;
    fs::write(path, data).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Load the persisted events, or the sample dataset when the file is
/// missing or malformed.
pub fn load_events(path: &Path) -> Vec<Event> {
    if !path.exists() {
        log::info!("no events file at {}, using sample data", path.display());
        return sample_events(Local::now().date_naive());
    }
    match load_json(path) {
        Ok(events) => events,
        Err(err) => {
            log::warn!("failed to load events: {:#}, using sample data", err);
            sample_events(Local::now().date_naive())
        }
    }
}

pub fn save_events(path: &Path, events: &[Event]) -> Result<()> {
    save_json(path, &events)
}

/// Load weekly memos; missing or malformed files yield an empty book.
pub fn load_memos(path: &Path) -> MemoBook {
    if !path.exists() {
        return MemoBook::new();
    }
    match load_json(path) {
        Ok(memos) => memos,
        Err(err) => {
            log::warn!("failed to load memos: {:#}", err);
            MemoBook::new()
        }
    }
}

pub fn save_memos(path: &Path, memos: &MemoBook) -> Result<()> {
    save_json(path, memos)
}

/// Built-in starter schedule, anchored to `today` so something is always
/// visible on first launch (including one overlapping pair to exercise
/// the lane layout).
pub fn sample_events(today: NaiveDate) -> Vec<Event> {
    let morning = |date: NaiveDate, h: u32, m: u32| {
        date.and_hms_opt(h, m, 0)
            .unwrap()
            .and_local_timezone(Local)
            .unwrap()
    };
    let yesterday = today - Duration::days(1);
    let tomorrow = today + Duration::days(1);

    let build = |title: &str, content: &str, start, end, color: &str| Event {
        id: None,
        title: title.to_string(),
        content: content.to_string(),
        start,
        end,
        all_day: false,
        color: Some(color.to_string()),
        column_index: 0,
        max_column_index: 0,
    };

    vec![
        build(
            "Morning standup",
            "Daily sync",
            morning(today, 9, 0),
            morning(today, 9, 30),
            "#ADD8E6",
        ),
        build(
            "Weekly review",
            "Progress check",
            morning(tomorrow, 14, 0),
            morning(tomorrow, 15, 30),
            "#90EE90",
        ),
        build(
            "Client visit",
            "Off-site",
            morning(yesterday, 10, 0),
            morning(yesterday, 12, 0),
            "#FFB6C1",
        ),
        build(
            "Overlap meeting A",
            "Overlap demo",
            morning(today, 10, 0),
            morning(today, 11, 0),
            "#FFA500",
        ),
        build(
            "Overlap meeting B",
            "Overlap demo",
            morning(today, 10, 30),
            morning(today, 11, 30),
            "#800080",
        ),
    ]
}
