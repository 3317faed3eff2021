//! Settings module
//!
//! The list of source/target links and the notification toggle, loaded once
//! at startup and saved after every edit.

mod models;
mod storage;

pub use models::{Link, Settings};
pub use storage::{SettingsError, SettingsStorage, PLUGIN_ID};
