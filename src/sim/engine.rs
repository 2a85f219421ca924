//! Owned game engine
//!
//! Wraps a run's `GameState` with its RNG, the grid it was built for and the
//! persisted best score, and exposes the player commands.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::difficulty::Difficulty;
use super::state::{Direction, GameEvent, GamePhase, GameState, GridConfig, Snapshot};
use super::tick::{TickReport, tick};
use crate::best_score::BestScore;
use crate::error::EngineError;

pub struct Engine {
    grid: GridConfig,
    seed: u64,
    rng: Pcg32,
    state: GameState,
    best_score: BestScore,
    tips_enabled: bool,
}

impl Engine {
    /// Create an engine with a fixed seed; the best score is loaded from storage
    pub fn new(grid: GridConfig, seed: u64) -> Result<Self, EngineError> {
        grid.validate()?;
        Ok(Self {
            grid,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            state: GameState::ready(Difficulty::default(), grid),
            best_score: BestScore::load(),
            tips_enabled: true,
        })
    }

    /// Create an engine seeded from OS entropy
    pub fn with_random_seed(grid: GridConfig) -> Result<Self, EngineError> {
        Self::new(grid, rand::random())
    }

    /// Difficulty used by `restart()` before any run has started
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.state = GameState::ready(difficulty, self.grid);
        self.state.tips.enabled = self.tips_enabled;
        self
    }

    /// Replace the loaded best score
    pub fn with_best_score(mut self, best_score: BestScore) -> Self {
        self.best_score = best_score;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn grid(&self) -> GridConfig {
        self.grid
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn best_score(&self) -> u64 {
        self.best_score.score
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn is_paused(&self) -> bool {
        self.state.is_paused()
    }

    /// Tick period the scheduler should wait before the next tick
    pub fn current_speed_ms(&self) -> u64 {
        self.state.speed_ms()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot(self.best_score.score)
    }

    pub fn set_tips_enabled(&mut self, enabled: bool) {
        self.tips_enabled = enabled;
        self.state.tips.enabled = enabled;
    }

    /// Begin a fresh run. A run still in progress is ended first and its
    /// score checked against the best.
    pub fn start(&mut self, difficulty: Difficulty) -> &GameState {
        self.record_best_score();
        let mut state = GameState::new(difficulty, self.grid);
        state.tips.enabled = self.tips_enabled;
        self.state = state;
        log::info!(
            "Run started: difficulty {}, grid {}x{}, seed {}",
            difficulty,
            self.grid.width,
            self.grid.height,
            self.seed
        );
        &self.state
    }

    /// Begin a fresh run from a difficulty name
    pub fn start_named(&mut self, difficulty: &str) -> Result<&GameState, EngineError> {
        let difficulty = difficulty.parse::<Difficulty>()?;
        Ok(self.start(difficulty))
    }

    /// End the current run (keeping its best score) and start over with the
    /// same difficulty
    pub fn restart(&mut self) -> &GameState {
        let difficulty = self.state.difficulty;
        self.start(difficulty)
    }

    fn record_best_score(&mut self) {
        if self.best_score.record(self.state.score) {
            self.best_score.save();
        }
    }

    /// Request a heading for the next tick. Reversals and requests outside a
    /// running, unpaused run are ignored.
    pub fn set_direction(&mut self, requested: Direction) {
        if self.state.phase != GamePhase::Running || requested == Direction::Idle {
            return;
        }
        if self.state.direction.is_opposite(requested) {
            return;
        }
        self.state.pending_direction = Some(requested);
    }

    /// Flip pause; returns whether the run is now paused
    pub fn toggle_pause(&mut self) -> bool {
        self.state.phase = match self.state.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
            other => other,
        };
        self.state.is_paused()
    }

    /// Advance one step of `current_speed_ms()` simulated time
    pub fn tick(&mut self) -> TickReport {
        let dt_ms = self.current_speed_ms();
        self.tick_elapsed(dt_ms)
    }

    /// Advance one step, with an explicit amount of elapsed time
    pub fn tick_elapsed(&mut self, dt_ms: u64) -> TickReport {
        let mut report = tick(&mut self.state, &mut self.rng, dt_ms);
        if report.is_game_over() && self.best_score.record(self.state.score) {
            self.best_score.save();
            report.events.push(GameEvent::NewBestScore {
                score: self.best_score.score,
            });
        }
        report
    }
}
