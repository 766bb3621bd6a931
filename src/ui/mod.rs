//! User Interface module
//!
//! Terminal UI using ratatui.

pub mod app;

pub use app::{App, Focus};
