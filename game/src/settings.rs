//! Startup settings loaded from `settings.ron`.

use bevy::prelude::*;
use engine::registry::DEFAULT_GROUND_HALF_EXTENT;
use serde::Deserialize;

const SETTINGS_PATH: &str = "settings.ron";

#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    /// Half-extent of the targetable ground plane, in world units.
    pub ground_half_extent: f32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            window_title: "Block Sandbox".to_string(),
            window_width: 1280,
            window_height: 720,
            ground_half_extent: DEFAULT_GROUND_HALF_EXTENT,
        }
    }
}

impl GameSettings {
    /// Load settings, falling back to defaults when the file is missing or
    /// malformed.
    pub fn load() -> Self {
        let Ok(text) = std::fs::read_to_string(SETTINGS_PATH) else {
            return Self::default();
        };

        match ron::from_str(&text) {
            Ok(settings) => settings,
            Err(err) => {
                warn!("Failed to parse {SETTINGS_PATH}: {err} - using defaults");
                Self::default()
            }
        }
    }
}
