//! Game settings and preferences
//!
//! Read once at startup from a JSON file. Every field is optional; anything
//! missing keeps its default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed session seed (random launch angles and bumper colors);
    /// `None` picks one from the clock
    pub seed: Option<u64>,

    // === Window ===
    /// Window size relative to the 800x1000 table
    pub window_scale: f32,

    // === Visual Effects ===
    /// Drop shadows under ball, bumpers and flippers
    pub shadows: bool,
    /// Light bumpers briefly when hit
    pub bumper_flash: bool,

    // === Diagnostics ===
    /// Log frames per second every few seconds
    pub log_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            window_scale: 0.8,
            shadows: true,
            bumper_flash: true,
            log_fps: false,
        }
    }
}

impl Settings {
    /// Environment variable naming an alternate settings file
    pub const PATH_ENV: &'static str = "PINBALL_SETTINGS";
    /// Settings file looked up in the working directory
    pub const DEFAULT_FILE: &'static str = "pinball.json";

    /// Where settings are read from
    pub fn path() -> PathBuf {
        std::env::var_os(Self::PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_FILE))
    }

    /// Load settings, falling back to defaults when the file is missing or bad
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings file at {}, using defaults", path.display());
                return Self::default();
            }
            Err(e) => {
                log::warn!("Could not read {}: {}; using defaults", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&text) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings in {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse settings JSON, clamping out-of-range values
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(text)?;
        settings.window_scale = if settings.window_scale.is_finite() {
            settings.window_scale.clamp(0.25, 2.0)
        } else {
            Self::default().window_scale
        };
        Ok(settings)
    }
}
