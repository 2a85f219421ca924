//! Snake Sats - A Bitcoin-themed educational Snake game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collectibles, speed progression)
//! - `scheduler`: Fixed-delay tick scheduling on top of a cancellable timer
//! - `persistence`: Key/value storage (LocalStorage on web)
//! - `best_score`: Persisted best score
//! - `settings`: Player preferences

pub mod best_score;
pub mod error;
pub mod persistence;
pub mod scheduler;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use best_score::BestScore;
pub use error::EngineError;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Health cap, and health at the start of a run
    pub const MAX_HEALTH: i32 = 100;

    /// Score for collecting a sat
    pub const SAT_SCORE: u64 = 10;
    /// Score for collecting a "do" (best practice)
    pub const DO_SCORE: u64 = 20;

    /// Score needed per level (level N -> N+1 at N * 100)
    pub const LEVEL_SCORE_STEP: u64 = 100;
    /// Minimum health required to level up
    pub const LEVEL_UP_MIN_HEALTH: i32 = 50;

    /// Speed level cap (21 million bitcoin)
    pub const MAX_SPEED_LEVEL: u32 = 21;
    /// Fastest possible tick period
    pub const MIN_SPEED_MS: u64 = 30;
    /// Sats needed per speed level (2 * level within the current level)
    pub const SATS_PER_SPEED_LEVEL: u32 = 2;
    /// Backup trigger: time since last speed change
    pub const SPEED_TIME_TRIGGER_MS: u64 = 10_000;
    /// Countdown shown before a speed increase lands
    pub const SPEED_COUNTDOWN_MS: u64 = 5_000;

    /// Placement attempts before a spawn is given up
    pub const SPAWN_ATTEMPTS: u32 = 50;

    /// Desktop layout: 600px canvas split into 20x20 cells
    pub const DEFAULT_GRID_CELLS: i32 = 20;
    pub const DEFAULT_CELL_SIZE: u32 = 30;
}
