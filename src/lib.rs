//! Timelane: a personal desktop calendar and time tracker.
//!
//! The schedule surface packs overlapping events into side-by-side lanes
//! per day, projects them through a Day or Week view, and records live
//! work sessions straight into the schedule.

pub mod models;
pub mod services;
pub mod ui;
pub mod utils;
