//! Save/load system
//!
//! Persists the calculator state between sessions.

pub mod state_file;

pub use state_file::{
    SaveData, SaveError,
    load_or_default, save_state_to, load_state_from, state_path,
};
