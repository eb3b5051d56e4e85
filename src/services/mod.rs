pub mod layout;
pub mod navigation;
pub mod persistence;
pub mod recorder;
pub mod settings;
pub mod store;
