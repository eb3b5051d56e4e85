pub mod event;
pub mod settings;
