//! Player preferences
//!
//! Persisted separately from the best score in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::persistence;
use crate::sim::Difficulty;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Difficulty used by the next start
    pub difficulty: Difficulty,

    // === Audio ===
    /// Sound effects on events
    pub sound_enabled: bool,
    /// Background music
    pub music_enabled: bool,

    // === Education ===
    /// Rotate Bitcoin tips during a run
    pub tips_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            sound_enabled: true,
            music_enabled: true,
            tips_enabled: true,
        }
    }
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "snakeSatsSettings";

    pub fn toggle_sound(&mut self) -> bool {
        self.sound_enabled = !self.sound_enabled;
        self.sound_enabled
    }

    pub fn toggle_music(&mut self) -> bool {
        self.music_enabled = !self.music_enabled;
        self.music_enabled
    }

    pub fn load() -> Self {
        match persistence::load_json(Self::STORAGE_KEY) {
            Some(settings) => {
                log::info!("Loaded settings");
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self) {
        persistence::save_json(Self::STORAGE_KEY, self);
        log::info!("Settings saved");
    }
}
