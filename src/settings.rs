//! Game settings and preferences
//!
//! Stored as JSON next to the binary (or wherever the host points). Unknown
//! or missing fields fall back to defaults, so old files keep loading.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::MOUSE_SENSITIVITY;
use crate::tuning::Tuning;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings I/O: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Gameplay balance
    pub tuning: Tuning,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Input ===
    /// Radians of turn per unit of horizontal pointer movement
    pub mouse_sensitivity: f32,

    /// Fixed RNG seed for reproducible sessions; random when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tuning: Tuning::default(),
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            mouse_sensitivity: MOUSE_SENSITIVITY,
            seed: None,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from `path`, falling back to defaults when the file is
    /// missing or malformed
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let loaded = fs::read_to_string(path)
            .map_err(SettingsError::from)
            .and_then(|json| Self::from_json(&json));

        match loaded {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
