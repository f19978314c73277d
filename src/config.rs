//! Configuration persistence for notecrop settings

use serde::{Deserialize, Serialize};

use crate::host::SettingsStore;

/// Plugin preferences persisted between sessions
///
/// Stored fields are merged over the defaults at load time, so payloads
/// written by older versions with fewer fields still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropConfig {
    /// Default width in pixels for rendered crops when none is specified
    pub default_scale: u32,
    /// Show the original image while hovering over a cropped embed
    pub show_preview_on_hover: bool,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            default_scale: 600,
            show_preview_on_hover: false,
        }
    }
}

impl CropConfig {
    /// Load from the store, or return defaults if unavailable
    pub fn load(store: &dyn SettingsStore) -> Self {
        match store.load() {
            Some(payload) => match serde_json::from_str(&payload) {
                Ok(config) => config,
                Err(err) => {
                    log::warn!("Error loading config, using defaults: {err:?}");
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }

    /// Save to the store
    pub fn save(&self, store: &dyn SettingsStore) {
        match serde_json::to_string_pretty(self) {
            Ok(payload) => {
                if let Err(err) = store.save(&payload) {
                    log::error!("Failed to save config: {err:?}");
                }
            }
            Err(err) => log::error!("Failed to serialize config: {err:?}"),
        }
    }

    /// Settings-tab input validation: only a positive integer is accepted
    pub fn set_default_scale(&mut self, value: &str) -> bool {
        match value.trim().parse::<u32>() {
            Ok(parsed) if parsed > 0 => {
                self.default_scale = parsed;
                true
            }
            _ => false,
        }
    }
}
