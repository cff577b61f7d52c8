//! Runtime settings
//!
//! JSON-encoded. On the web they live in LocalStorage; natively they are read
//! from the file named by `BRICK_BREAKER_SETTINGS`, if set.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Environment variable naming a settings file (native only)
pub const SETTINGS_ENV: &str = "BRICK_BREAKER_SETTINGS";

/// Failure reading a settings file
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Upper bound on a frame's dt, applied by the driver before stepping.
    /// `None` passes wall-clock dt through untouched (a long stall can then
    /// tunnel the ball through bricks or the paddle).
    pub max_frame_dt: Option<f32>,

    /// Let the computer play (native headless runs, web idle mode)
    pub autopilot: bool,

    // === Headless runs ===
    /// Frames to simulate before giving up on reaching game over
    pub headless_frames: u32,
    /// Simulated seconds per headless frame
    pub headless_dt: f32,

    /// Log a state summary every N frames (0 = never)
    pub log_every_frames: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_frame_dt: None,
            autopilot: !cfg!(target_arch = "wasm32"),
            headless_frames: 3600,
            headless_dt: 1.0 / 60.0,
            log_every_frames: 600,
        }
    }
}

impl Settings {
    /// Clamp a frame delta per `max_frame_dt`
    pub fn frame_dt(&self, dt: f32) -> f32 {
        match self.max_frame_dt {
            Some(max) if max > 0.0 => dt.min(max),
            _ => dt,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "brick_breaker_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load from the file named by `BRICK_BREAKER_SETTINGS`, else defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Some(path) = std::env::var_os(SETTINGS_ENV) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::from_path(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", Path::new(&path).display());
                settings
            }
            Err(e) => {
                log::warn!("{} ({}), using defaults", e, Path::new(&path).display());
                Self::default()
            }
        }
    }
}
