//! Persisted overlay placement
//!
//! Window position, scale and opacity survive restarts in a small JSON file under the
//! platform configuration directory. Loading never fails: anything unreadable falls back
//! to the defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::{RadarError, Result};

/// Smallest and largest overlay scale
pub const SCALE_RANGE: (f64, f64) = (0.6, 2.0);
/// Smallest and largest overlay opacity
pub const OPACITY_RANGE: (f64, f64) = (0.2, 1.0);
/// Scale change per scroll notch or key press
pub const SCALE_STEP: f64 = 0.05;

const APP_DIR: &str = "Overlap";
const SETTINGS_FILE: &str = "settings.json";

/// Overlay window placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct OverlaySettings {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub opacity: f64,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self { x: 120.0, y: 120.0, scale: 1.0, opacity: 0.85 }
    }
}

impl OverlaySettings {
    /// Scale and opacity bounded to what the overlay can display
    pub fn clamped(self) -> Self {
        Self {
            scale: self.scale.clamp(SCALE_RANGE.0, SCALE_RANGE.1),
            opacity: self.opacity.clamp(OPACITY_RANGE.0, OPACITY_RANGE.1),
            ..self
        }
    }

    /// Change the scale by `steps` increments of [`SCALE_STEP`], staying in range
    pub fn nudge_scale(&mut self, steps: i32) {
        self.scale = (self.scale + steps as f64 * SCALE_STEP).clamp(SCALE_RANGE.0, SCALE_RANGE.1);
    }
}

/// Reads and writes [`OverlaySettings`]
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Store under `root`, or under the platform configuration directory when `None`
    pub fn new(root: Option<PathBuf>) -> Self {
        let root = root.unwrap_or_else(default_root);
        Self { path: root.join(APP_DIR).join(SETTINGS_FILE) }
    }

    /// Location of the settings file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, falling back to defaults on any problem
    pub fn load(&self) -> OverlaySettings {
        match self.try_load() {
            Ok(Some(settings)) => {
                debug!(path = %self.path.display(), "Loaded overlay settings");
                settings
            }
            Ok(None) => {
                debug!(path = %self.path.display(), "No overlay settings yet, using defaults");
                OverlaySettings::default()
            }
            Err(e) => {
                warn!("Ignoring overlay settings: {}", e);
                OverlaySettings::default()
            }
        }
    }

    /// Write settings, creating the directory if needed
    pub fn save(&self, settings: &OverlaySettings) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)
                .map_err(|e| RadarError::settings_error(dir.to_path_buf(), e))?;
        }

        let content = serde_json::to_string_pretty(settings).map_err(|source| {
            RadarError::SettingsFormat { path: self.path.clone(), source }
        })?;
        std::fs::write(&self.path, content)
            .map_err(|e| RadarError::settings_error(self.path.clone(), e))?;

        debug!(path = %self.path.display(), "Saved overlay settings");
        Ok(())
    }

    fn try_load(&self) -> Result<Option<OverlaySettings>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let text = std::fs::read_to_string(&self.path)
            .map_err(|e| RadarError::settings_error(self.path.clone(), e))?;
        let settings = serde_json::from_str(&text)
            .map_err(|source| RadarError::SettingsFormat { path: self.path.clone(), source })?;

        Ok(Some(settings))
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new(None)
    }
}

fn default_root() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}
