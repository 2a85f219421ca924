//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Simulated clock only (advanced by ticks)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod difficulty;
pub mod engine;
pub mod progression;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod tips;

pub use difficulty::{Difficulty, DifficultySettings};
pub use engine::Engine;
pub use progression::{CountdownState, SpeedProgression};
pub use state::{
    CollectibleKind, Collectibles, Direction, GameEvent, GameOverReason, GamePhase, GameState,
    GridConfig, GridPos, RunStats, Snapshot,
};
pub use tick::{TickOutcome, TickReport, tick};
