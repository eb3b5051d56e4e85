//! Live recording: a stopwatch (optionally a countdown) that appends a
//! new event to the schedule when stopped.
//!
//! Driven by the UI's periodic tick on the single layout-owning thread;
//! countdown expiry inside `tick` is equivalent to a manual stop.

use chrono::{DateTime, Duration, Local};

use crate::models::event::{Event, RECORDING_COLOR};

/// Countdown presets offered next to the record button, in minutes.
/// 0 means plain stopwatch.
pub const COUNTDOWN_PRESETS: &[i64] = &[0, 15, 25, 30, 60];

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Recorder {
    #[default]
    Idle,
    Running {
        title: String,
        started: DateTime<Local>,
        countdown: Option<Duration>,
    },
}

impl Recorder {
    pub fn is_recording(&self) -> bool {
        matches!(self, Recorder::Running { .. })
    }

    /// Begin recording. An empty title falls back to `Work log HH:MM`;
    /// `countdown_minutes` of 0 (or None) means an open-ended stopwatch.
    pub fn start(&mut self, title: &str, countdown_minutes: Option<i64>, now: DateTime<Local>) {
        let title = if title.trim().is_empty() {
            default_title(now)
        } else {
            title.trim().to_string()
        };
        let countdown = countdown_minutes
            .filter(|m| *m > 0)
            .map(Duration::minutes);

        log::info!("recording started: {:?} (countdown: {:?})", title, countdown);
        *self = Recorder::Running {
            title,
            started: now,
            countdown,
        };
    }

    pub fn elapsed(&self, now: DateTime<Local>) -> Option<Duration> {
        match self {
            Recorder::Idle => None,
            Recorder::Running { started, .. } => Some(now - *started),
        }
    }

    /// Time left on the countdown, if one is set. Never negative.
    pub fn remaining(&self, now: DateTime<Local>) -> Option<Duration> {
        match self {
            Recorder::Running {
                started,
                countdown: Some(limit),
                ..
            } => {
                let left = *limit - (now - *started);
                Some(left.max(Duration::zero()))
            }
            _ => None,
        }
    }

    /// Periodic tick: stops automatically when a countdown has expired,
    /// returning the recorded event exactly as a manual stop would.
    pub fn tick(&mut self, now: DateTime<Local>) -> Option<Event> {
        if let Recorder::Running {
            started,
            countdown: Some(limit),
            ..
        } = self
        {
            if now - *started >= *limit {
                log::info!("countdown expired, stopping recording");
                return self.stop(now);
            }
        }
        None
    }

    /// Stop recording and build the event for the recorded span.
    /// Returns None when idle.
    pub fn stop(&mut self, now: DateTime<Local>) -> Option<Event> {
        let Recorder::Running { title, started, .. } = std::mem::take(self) else {
            return None;
        };

        let elapsed = now - started;
        let event = Event {
            id: None,
            title,
            content: format!(
                "Recorded: {:02}:{:02}",
                elapsed.num_hours(),
                elapsed.num_minutes() % 60
            ),
            start: started,
            end: now,
            all_day: false,
            color: Some(RECORDING_COLOR.to_string()),
            column_index: 0,
            max_column_index: 0,
        };
        log::info!(
            "recording stopped: {:?} ({} min)",
            event.title,
            elapsed.num_minutes()
        );
        Some(event)
    }
}

fn default_title(now: DateTime<Local>) -> String {
    format!("Work log {}", now.format("%H:%M"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, min: u32, sec: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 12, 4, hour, min, sec).unwrap()
    }

    #[test]
    fn test_starts_idle() {
        let recorder = Recorder::default();
        assert!(!recorder.is_recording());
        assert!(recorder.elapsed(at(9, 0, 0)).is_none());
    }

    #[test]
    fn test_start_and_elapsed() {
        let mut recorder = Recorder::default();
        recorder.start("Deep work", None, at(9, 0, 0));
        assert!(recorder.is_recording());
        assert_eq!(
            recorder.elapsed(at(9, 45, 0)),
            Some(Duration::minutes(45))
        );
        assert!(recorder.remaining(at(9, 45, 0)).is_none());
    }

    #[test]
    fn test_blank_title_gets_default() {
        let mut recorder = Recorder::default();
        recorder.start("   ", None, at(9, 5, 0));
        let event = recorder.stop(at(9, 35, 0)).unwrap();
        assert_eq!(event.title, "Work log 09:05");
    }

    #[test]
    fn test_stop_builds_event() {
        let mut recorder = Recorder::default();
        recorder.start("Focus", None, at(9, 0, 0));
        let event = recorder.stop(at(10, 30, 0)).unwrap();

        assert_eq!(event.title, "Focus");
        assert_eq!(event.start, at(9, 0, 0));
        assert_eq!(event.end, at(10, 30, 0));
        assert_eq!(event.content, "Recorded: 01:30");
        assert_eq!(event.color.as_deref(), Some(RECORDING_COLOR));
        assert!(!recorder.is_recording());
    }

    #[test]
    fn test_stop_when_idle_is_none() {
        let mut recorder = Recorder::default();
        assert!(recorder.stop(at(9, 0, 0)).is_none());
    }

    #[test]
    fn test_countdown_remaining() {
        let mut recorder = Recorder::default();
        recorder.start("Pomodoro", Some(25), at(9, 0, 0));
        assert_eq!(
            recorder.remaining(at(9, 10, 0)),
            Some(Duration::minutes(15))
        );
        // Never reports negative remaining time.
        assert_eq!(recorder.remaining(at(9, 40, 0)), Some(Duration::zero()));
    }

    #[test]
    fn test_zero_countdown_means_stopwatch() {
        let mut recorder = Recorder::default();
        recorder.start("Open", Some(0), at(9, 0, 0));
        assert!(recorder.remaining(at(9, 10, 0)).is_none());
        assert!(recorder.tick(at(23, 0, 0)).is_none());
    }

    #[test]
    fn test_tick_before_expiry_keeps_running() {
        let mut recorder = Recorder::default();
        recorder.start("Pomodoro", Some(25), at(9, 0, 0));
        assert!(recorder.tick(at(9, 24, 59)).is_none());
        assert!(recorder.is_recording());
    }

    #[test]
    fn test_tick_at_expiry_auto_stops() {
        let mut recorder = Recorder::default();
        recorder.start("Pomodoro", Some(25), at(9, 0, 0));
        let event = recorder.tick(at(9, 25, 0)).unwrap();

        assert_eq!(event.end, at(9, 25, 0));
        assert_eq!(event.content, "Recorded: 00:25");
        assert!(!recorder.is_recording());
    }
}
