//! Configuration
//!
//! User settings loaded from RON.

pub mod settings;

pub use settings::{Settings, SettingsError, settings_path};
