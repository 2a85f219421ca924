//! Game state and core simulation types
//!
//! Everything a run mutates lives in `GameState`; the renderer only ever
//! sees a `Snapshot`.

use std::collections::VecDeque;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use super::progression::SpeedProgression;
use super::spawn::SpawnTimers;
use super::tips::TipRotator;
use crate::consts::*;
use crate::error::EngineError;

/// A cell on the grid: x = column, y = row
pub type GridPos = IVec2;

/// Heading of the snake. `Idle` is the zero vector used before a run starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Idle,
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The four moving headings
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step for this heading (screen coordinates, y grows downward)
    pub fn delta(&self) -> IVec2 {
        match self {
            Direction::Idle => IVec2::ZERO,
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Idle => Direction::Idle,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// True if turning from `self` to `other` would be a 180 degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        *self != Direction::Idle && self.opposite() == other
    }

    /// Map a unit vector back to a heading
    pub fn from_delta(delta: IVec2) -> Option<Direction> {
        match (delta.x, delta.y) {
            (0, 0) => Some(Direction::Idle),
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Grid extent and cell size, fixed for the lifetime of an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Columns
    pub width: i32,
    /// Rows
    pub height: i32,
    /// Pixel size of one cell (for the renderer)
    pub cell_size: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_CELLS,
            height: DEFAULT_GRID_CELLS,
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

impl GridConfig {
    pub fn new(width: i32, height: i32, cell_size: u32) -> Result<Self, EngineError> {
        let grid = Self {
            width,
            height,
            cell_size,
        };
        grid.validate()?;
        Ok(grid)
    }

    /// Square grid sized for a small (mobile) viewport
    pub fn fit_viewport(viewport_width: u32, viewport_height: u32) -> Result<Self, EngineError> {
        let side = viewport_width
            .saturating_sub(40)
            .min(viewport_height.saturating_sub(200));
        let cell_size = side / DEFAULT_GRID_CELLS as u32;
        if cell_size == 0 {
            return Err(EngineError::InvalidConfiguration(format!(
                "viewport {viewport_width}x{viewport_height} is too small for the grid"
            )));
        }
        let cells = (side / cell_size) as i32;
        Self::new(cells, cells, cell_size)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.width < 1 || self.height < 1 {
            return Err(EngineError::InvalidConfiguration(format!(
                "grid must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if self.cell_size == 0 {
            return Err(EngineError::InvalidConfiguration(
                "cell size must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn contains(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    pub fn center(&self) -> GridPos {
        IVec2::new(self.width / 2, self.height / 2)
    }

    pub fn cell_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }
}

/// Collectible types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectibleKind {
    /// Satoshi: score and health
    Sat,
    /// Fiat money: damages health
    Fiat,
    /// Best practice: bonus score
    Do,
}

impl CollectibleKind {
    pub const ALL: [CollectibleKind; 3] =
        [CollectibleKind::Sat, CollectibleKind::Fiat, CollectibleKind::Do];

    /// Most instances the spawn timer keeps on the field
    pub fn cap(&self) -> usize {
        match self {
            CollectibleKind::Sat => 3,
            CollectibleKind::Fiat => 2,
            CollectibleKind::Do => 1,
        }
    }

    /// Range the next spawn interval is drawn from (ms)
    pub fn interval_range(&self) -> std::ops::Range<u64> {
        match self {
            CollectibleKind::Sat => 2_000..6_000,
            CollectibleKind::Fiat => 3_000..8_000,
            CollectibleKind::Do => 5_000..12_000,
        }
    }

    /// Interval before the second spawn of a run
    pub fn initial_interval_ms(&self) -> u64 {
        match self {
            CollectibleKind::Sat => 3_000,
            CollectibleKind::Fiat => 4_000,
            CollectibleKind::Do => 8_000,
        }
    }
}

/// The three collectible sets. Pairwise disjoint, and disjoint from the snake
/// at spawn time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collectibles {
    pub sats: Vec<GridPos>,
    pub fiats: Vec<GridPos>,
    pub dos: Vec<GridPos>,
}

impl Collectibles {
    pub fn of(&self, kind: CollectibleKind) -> &Vec<GridPos> {
        match kind {
            CollectibleKind::Sat => &self.sats,
            CollectibleKind::Fiat => &self.fiats,
            CollectibleKind::Do => &self.dos,
        }
    }

    pub fn of_mut(&mut self, kind: CollectibleKind) -> &mut Vec<GridPos> {
        match kind {
            CollectibleKind::Sat => &mut self.sats,
            CollectibleKind::Fiat => &mut self.fiats,
            CollectibleKind::Do => &mut self.dos,
        }
    }

    pub fn contains(&self, pos: GridPos) -> bool {
        self.kind_at(pos).is_some()
    }

    /// Which set (if any) holds `pos`, checked in sat, fiat, do order
    pub fn kind_at(&self, pos: GridPos) -> Option<CollectibleKind> {
        CollectibleKind::ALL
            .into_iter()
            .find(|kind| self.of(*kind).contains(&pos))
    }

    /// Remove the collectible of `kind` at `pos`; false if there was none
    pub fn take(&mut self, kind: CollectibleKind, pos: GridPos) -> bool {
        let set = self.of_mut(kind);
        match set.iter().position(|p| *p == pos) {
            Some(index) => {
                set.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.sats.len() + self.fiats.len() + self.dos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.sats.clear();
        self.fiats.clear();
        self.dos.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &GridPos> {
        self.sats.iter().chain(self.fiats.iter()).chain(self.dos.iter())
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    WallCollision,
    SelfCollision,
    HealthDepleted,
}

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Engine created, no run started yet
    Ready,
    /// Active gameplay
    Running,
    /// Run suspended by the player
    Paused,
    /// Run ended
    GameOver(GameOverReason),
}

/// Discrete events for audio/UI collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum GameEvent {
    SatCollected,
    FiatHit,
    DoCollected,
    LevelUp { level: u32 },
    CountdownStarted { speed_level: u32 },
    SpeedIncreased { speed_level: u32, speed_ms: u64 },
    TipRotated { index: usize },
    GameOver { reason: GameOverReason },
    NewBestScore { score: u64 },
}

impl GameEvent {
    /// Stable event name, as subscribed to by the page
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::SatCollected => "sat-collected",
            GameEvent::FiatHit => "fiat-hit",
            GameEvent::DoCollected => "do-collected",
            GameEvent::LevelUp { .. } => "level-up",
            GameEvent::CountdownStarted { .. } => "countdown-started",
            GameEvent::SpeedIncreased { .. } => "speed-increased",
            GameEvent::TipRotated { .. } => "tip-rotated",
            GameEvent::GameOver { .. } => "game-over",
            GameEvent::NewBestScore { .. } => "new-best-score",
        }
    }
}

/// Per-run counters shown in the stats panel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub sats_collected: u32,
    pub good_practices: u32,
    pub fiat_hits: u32,
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    pub difficulty: Difficulty,
    pub grid: GridConfig,
    /// Body, head first
    pub snake: VecDeque<GridPos>,
    /// Heading applied on the last tick
    pub direction: Direction,
    /// Heading requested since the last tick
    pub pending_direction: Option<Direction>,
    pub collectibles: Collectibles,
    pub score: u64,
    /// May dip below zero on the tick that ends the run
    pub health: i32,
    pub level: u32,
    pub phase: GamePhase,
    pub stats: RunStats,
    pub speed: SpeedProgression,
    pub spawn_timers: SpawnTimers,
    pub tips: TipRotator,
    /// Simulated milliseconds since the run started
    pub elapsed_ms: u64,
    /// Ticks since the run started
    pub time_ticks: u64,
}

impl GameState {
    /// Fresh run: single segment at the grid center, heading right
    pub fn new(difficulty: Difficulty, grid: GridConfig) -> Self {
        let mut snake = VecDeque::with_capacity(grid.cell_count().min(256));
        snake.push_back(grid.center());

        Self {
            difficulty,
            grid,
            snake,
            direction: Direction::Right,
            pending_direction: None,
            collectibles: Collectibles::default(),
            score: 0,
            health: MAX_HEALTH,
            level: 1,
            phase: GamePhase::Running,
            stats: RunStats::default(),
            speed: SpeedProgression::new(difficulty),
            spawn_timers: SpawnTimers::new(),
            tips: TipRotator::new(true),
            elapsed_ms: 0,
            time_ticks: 0,
        }
    }

    /// Placeholder state before the first run: idle snake at the center
    pub fn ready(difficulty: Difficulty, grid: GridConfig) -> Self {
        let mut state = Self::new(difficulty, grid);
        state.direction = Direction::Idle;
        state.phase = GamePhase::Ready;
        state
    }

    pub fn head(&self) -> GridPos {
        self.snake.front().copied().unwrap_or_else(|| self.grid.center())
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, GamePhase::Running | GamePhase::Paused)
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        match self.phase {
            GamePhase::GameOver(reason) => Some(reason),
            _ => None,
        }
    }

    /// True if the snake or any collectible sits on `pos`
    pub fn is_occupied(&self, pos: GridPos) -> bool {
        self.snake.contains(&pos) || self.collectibles.contains(pos)
    }

    /// Current tick period
    pub fn speed_ms(&self) -> u64 {
        self.speed.speed_ms
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self, best_score: u64) -> Snapshot {
        Snapshot {
            grid: self.grid,
            snake: self.snake.iter().copied().collect(),
            sats: self.collectibles.sats.clone(),
            fiats: self.collectibles.fiats.clone(),
            dos: self.collectibles.dos.clone(),
            score: self.score,
            best_score: best_score.max(self.score),
            health: self.health.clamp(0, MAX_HEALTH),
            max_health: MAX_HEALTH,
            level: self.level,
            speed_level: self.speed.speed_level,
            speed_ms: self.speed.speed_ms,
            countdown_seconds: self.speed.countdown_seconds(),
            difficulty: self.difficulty,
            running: self.is_running(),
            paused: self.is_paused(),
            game_over: self.game_over_reason(),
            stats: self.stats,
            tip: self.tips.current().to_string(),
        }
    }
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub grid: GridConfig,
    pub snake: Vec<GridPos>,
    pub sats: Vec<GridPos>,
    pub fiats: Vec<GridPos>,
    pub dos: Vec<GridPos>,
    pub score: u64,
    pub best_score: u64,
    pub health: i32,
    pub max_health: i32,
    pub level: u32,
    pub speed_level: u32,
    pub speed_ms: u64,
    pub countdown_seconds: Option<u64>,
    pub difficulty: Difficulty,
    pub running: bool,
    pub paused: bool,
    pub game_over: Option<GameOverReason>,
    pub stats: RunStats,
    pub tip: String,
}
