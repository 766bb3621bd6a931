//! User settings
//!
//! Loads `settings.ron` from the config directory. A missing file means
//! defaults; a broken one is reported to the caller.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Most fractional digits a percentage can show
const MAX_DECIMALS: u8 = 7;

/// Calculator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fractional digits shown for percentages
    pub percentage_decimals: u8,
    /// Save state after every accepted edit
    pub autosave: bool,
    /// Log filter used when RUST_LOG is unset
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            percentage_decimals: 3,
            autosave: true,
            log_filter: "info".to_string(),
        }
    }
}

/// Get the settings file path
pub fn settings_path() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("com", "hiyaku", "Hiyaku") {
        proj_dirs.config_dir().join("settings.ron")
    } else {
        PathBuf::from("./hiyaku-data/settings.ron")
    }
}

/// Settings load error types
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Io { path: String, source: std::io::Error },
    #[error("failed to parse {path}: {source}")]
    Parse { path: String, source: ron::error::SpannedError },
}

impl Settings {
    /// Load settings from the default location
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(&settings_path())
    }

    /// Load settings from a RON file
    ///
    /// A missing file gives the defaults. A file that cannot be read or parsed
    /// is an error; callers fall back to defaults and report it once logging
    /// is up.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let settings = ron::from_str::<Settings>(&content).map_err(|source| SettingsError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        Ok(settings.sanitized())
    }

    fn sanitized(mut self) -> Self {
        self.percentage_decimals = self.percentage_decimals.min(MAX_DECIMALS);
        self
    }
}
