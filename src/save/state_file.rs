//! Calculator state persistence
//!
//! The UI calls [`save_state_to`] after each accepted edit; nothing in the
//! engine touches the disk.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calc::CalcState;

/// Save file version for compatibility checking
const SAVE_VERSION: u32 = 1;

const STATE_FILE: &str = "state.json";

/// On-disk layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveData {
    pub version: u32,
    #[serde(flatten)]
    pub state: CalcState,
}

/// Save error types
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Save version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

/// Get the save directory path
pub fn save_directory() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("com", "hiyaku", "Hiyaku") {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        // Fallback to current directory
        PathBuf::from("./hiyaku-data")
    }
}

/// Path of the saved calculator state
pub fn state_path() -> PathBuf {
    save_directory().join(STATE_FILE)
}

/// Write the state; called by the UI after each accepted edit
pub fn save_state_to(path: &Path, state: &CalcState) -> Result<(), SaveError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }

    let data = SaveData { version: SAVE_VERSION, state: state.clone() };
    fs::write(path, serde_json::to_string_pretty(&data)?)?;

    log::debug!("State saved to {}", path.display());
    Ok(())
}

/// Read a saved state, checking its version
pub fn load_state_from(path: &Path) -> Result<CalcState, SaveError> {
    let data = fs::read_to_string(path)?;
    let save: SaveData = serde_json::from_str(&data)?;

    if save.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch { expected: SAVE_VERSION, found: save.version });
    }

    log::info!("State loaded from {}", path.display());
    Ok(save.state)
}

/// Load saved state, or the default state if there is none or it is unusable
///
/// Loaded state is recomputed from its source side so a hand-edited file
/// cannot leave the two sides out of sync.
pub fn load_or_default(path: &Path) -> CalcState {
    if !path.exists() {
        return CalcState::default();
    }
    let loaded = match load_state_from(path) {
        Ok(state) => state,
        Err(e) => {
            log::warn!("Failed to load state: {}", e);
            return CalcState::default();
        }
    };
    loaded.refresh().unwrap_or_else(|e| {
        log::warn!("Discarding saved state: {}", e);
        CalcState::default()
    })
}
