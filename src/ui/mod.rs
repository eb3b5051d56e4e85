pub mod app;
pub mod event_dialog;
pub mod grid;

pub use app::TimelaneApp;
