//! Dashboard settings
//!
//! Optional JSON file next to the dataset. Every field falls back to its
//! default when absent, and a missing file means all defaults.

use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_SETTINGS_PATH: &str = "./dashboard/settings.json";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),
    #[error("Failed to parse settings file {0}: {1}")]
    Parse(PathBuf, #[source] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// Rental CSV with `dteday`, `weathersit` and `cnt` columns
    pub data_path: PathBuf,

    /// Caption shown under the charts
    pub caption: String,

    /// Emit a zero row for each day without records between the first and
    /// last date present in the filtered data
    pub fill_missing_days: bool,

    pub window_width: f32,
    pub window_height: f32,

    /// Pixel size of exported PNG charts
    pub export_width: u32,
    pub export_height: u32,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("./dashboard/data.csv"),
            caption: "By Anas Banta Seutia - for Bangkit :)".to_string(),
            fill_missing_days: false,
            window_width: 1200.0,
            window_height: 900.0,
            export_width: 1600,
            export_height: 800,
        }
    }
}

impl DashboardSettings {
    /// Load settings from `path`, or defaults if the file doesn't exist
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::Io(path.to_path_buf(), e))?;
        let settings: DashboardSettings = serde_json::from_str(&contents)
            .map_err(|e| SettingsError::Parse(path.to_path_buf(), e))?;

        info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}
