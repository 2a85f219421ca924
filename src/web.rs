//! Browser bindings
//!
//! The page owns the fixed-delay timer, input and drawing: it calls `tick()`
//! every `speed_ms()` milliseconds, redraws from `snapshot_json()` and reacts
//! to the returned events (sounds, messages).

use wasm_bindgen::prelude::*;

use crate::Settings;
use crate::sim::{Difficulty, Direction, Engine, GridConfig};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialised".into());
    }
    log::info!("Snake Sats (web) starting...");
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub struct WebGame {
    engine: Engine,
    settings: Settings,
}

#[wasm_bindgen]
impl WebGame {
    /// Grid size comes from the page's responsive layout
    #[wasm_bindgen(constructor)]
    pub fn new(width: i32, height: i32, cell_size: u32) -> Result<WebGame, JsValue> {
        let grid = GridConfig::new(width, height, cell_size).map_err(js_error)?;
        let settings = Settings::load();
        let mut engine = Engine::with_random_seed(grid)
            .map_err(js_error)?
            .with_difficulty(settings.difficulty);
        engine.set_tips_enabled(settings.tips_enabled);
        Ok(WebGame { engine, settings })
    }

    /// Start with the named difficulty ("normal" or "legendary"), which is
    /// remembered for next time
    pub fn start(&mut self, difficulty: &str) -> Result<(), JsValue> {
        let difficulty: Difficulty = difficulty.parse().map_err(js_error)?;
        if self.settings.difficulty != difficulty {
            self.settings.difficulty = difficulty;
            self.settings.save();
        }
        self.engine.start(difficulty);
        Ok(())
    }

    pub fn restart(&mut self) {
        self.engine.restart();
    }

    /// Returns whether the game is now paused
    pub fn toggle_pause(&mut self) -> bool {
        self.engine.toggle_pause()
    }

    /// Unit vector from the keyboard/touch layer; anything else is ignored
    pub fn set_direction(&mut self, dx: i32, dy: i32) {
        match Direction::from_delta(glam::IVec2::new(dx, dy)) {
            Some(dir) => self.engine.set_direction(dir),
            None => log::warn!("Ignoring direction ({}, {})", dx, dy),
        }
    }

    /// Advance one tick; returns the tick report as JSON
    pub fn tick(&mut self) -> Result<String, JsValue> {
        let report = self.engine.tick();
        serde_json::to_string(&report).map_err(js_error)
    }

    /// Delay before the next `tick()`
    pub fn speed_ms(&self) -> u32 {
        u32::try_from(self.engine.current_speed_ms()).unwrap_or(u32::MAX)
    }

    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }

    pub fn is_paused(&self) -> bool {
        self.engine.is_paused()
    }

    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.engine.snapshot()).map_err(js_error)
    }

    pub fn difficulty(&self) -> String {
        self.settings.difficulty.to_string()
    }

    pub fn toggle_sound(&mut self) -> bool {
        let on = self.settings.toggle_sound();
        self.settings.save();
        on
    }

    pub fn toggle_music(&mut self) -> bool {
        let on = self.settings.toggle_music();
        self.settings.save();
        on
    }

    pub fn sound_enabled(&self) -> bool {
        self.settings.sound_enabled
    }

    pub fn music_enabled(&self) -> bool {
        self.settings.music_enabled
    }

    pub fn set_tips_enabled(&mut self, enabled: bool) {
        self.settings.tips_enabled = enabled;
        self.settings.save();
        self.engine.set_tips_enabled(enabled);
    }
}
