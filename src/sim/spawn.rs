//! Collectible placement and respawn timers

use glam::IVec2;
use rand::Rng;

use super::state::{CollectibleKind, GameState, GridPos};
use crate::consts::SPAWN_ATTEMPTS;

/// Uniformly sample a free cell, rejecting anything occupied by the snake or a
/// collectible. Gives up after `SPAWN_ATTEMPTS` misses (the grid may be full).
pub fn random_free_cell<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> Option<GridPos> {
    for _ in 0..SPAWN_ATTEMPTS {
        let pos = IVec2::new(
            rng.random_range(0..state.grid.width),
            rng.random_range(0..state.grid.height),
        );
        if !state.is_occupied(pos) {
            return Some(pos);
        }
    }
    None
}

/// Place one collectible of `kind`. Returns where it landed, or `None` when
/// placement gave up.
pub fn spawn_collectible<R: Rng + ?Sized>(
    state: &mut GameState,
    kind: CollectibleKind,
    rng: &mut R,
) -> Option<GridPos> {
    match random_free_cell(state, rng) {
        Some(pos) => {
            state.collectibles.of_mut(kind).push(pos);
            Some(pos)
        }
        None => {
            log::debug!("No free cell for {:?} after {} attempts", kind, SPAWN_ATTEMPTS);
            None
        }
    }
}

/// Interval timer for one collectible kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnTimer {
    pub kind: CollectibleKind,
    /// Clock time of the last timed spawn (`None` until the first)
    pub last_spawn_ms: Option<u64>,
    /// Wait after `last_spawn_ms` before the next spawn
    pub interval_ms: u64,
}

impl SpawnTimer {
    pub fn new(kind: CollectibleKind) -> Self {
        Self {
            kind,
            last_spawn_ms: None,
            interval_ms: kind.initial_interval_ms(),
        }
    }

    pub fn is_due(&self, now_ms: u64) -> bool {
        match self.last_spawn_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) > self.interval_ms,
        }
    }

    /// Record a spawn at `now_ms` and draw the next interval
    pub fn rearm<R: Rng + ?Sized>(&mut self, now_ms: u64, rng: &mut R) {
        self.last_spawn_ms = Some(now_ms);
        self.interval_ms = rng.random_range(self.kind.interval_range());
    }
}

/// One timer per collectible kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnTimers {
    pub timers: [SpawnTimer; 3],
}

impl Default for SpawnTimers {
    fn default() -> Self {
        Self::new()
    }
}

impl SpawnTimers {
    pub fn new() -> Self {
        Self {
            timers: CollectibleKind::ALL.map(SpawnTimer::new),
        }
    }

    pub fn get(&self, kind: CollectibleKind) -> &SpawnTimer {
        &self.timers[kind as usize]
    }

    pub fn get_mut(&mut self, kind: CollectibleKind) -> &mut SpawnTimer {
        &mut self.timers[kind as usize]
    }
}

/// Fire every due timer whose set is below its cap. A fired timer rearms even
/// when placement gives up.
pub fn run_spawn_timers<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) -> usize {
    let now = state.elapsed_ms;
    let mut spawned = 0;

    for kind in CollectibleKind::ALL {
        let timer = *state.spawn_timers.get(kind);
        if !timer.is_due(now) || state.collectibles.of(kind).len() >= kind.cap() {
            continue;
        }
        if spawn_collectible(state, kind, rng).is_some() {
            spawned += 1;
        }
        state.spawn_timers.get_mut(kind).rearm(now, rng);
    }

    spawned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::difficulty::Difficulty;
    use crate::sim::state::GridConfig;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_avoids_occupied_cells() {
        let grid = GridConfig::new(3, 1, 10).unwrap();
        let mut state = GameState::new(Difficulty::Normal, grid);
        // snake at (1, 0); leave only (2, 0) free
        state.collectibles.fiats.push(IVec2::new(0, 0));
        let mut rng = Pcg32::seed_from_u64(7);

        let pos = spawn_collectible(&mut state, CollectibleKind::Sat, &mut rng);
        assert_eq!(pos, Some(IVec2::new(2, 0)));
        assert_eq!(state.collectibles.sats, vec![IVec2::new(2, 0)]);
    }

    #[test]
    fn test_spawn_soft_fails_on_full_grid() {
        let grid = GridConfig::new(2, 1, 10).unwrap();
        let mut state = GameState::new(Difficulty::Normal, grid);
        state.collectibles.dos.push(IVec2::new(0, 0));
        let mut rng = Pcg32::seed_from_u64(7);

        assert_eq!(spawn_collectible(&mut state, CollectibleKind::Sat, &mut rng), None);
        assert!(state.collectibles.sats.is_empty());
    }

    #[test]
    fn test_timer_due_and_rearm() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut timer = SpawnTimer::new(CollectibleKind::Fiat);
        assert!(timer.is_due(0));

        timer.rearm(1_000, &mut rng);
        assert!((3_000..8_000).contains(&timer.interval_ms));
        assert!(!timer.is_due(1_000 + timer.interval_ms));
        assert!(timer.is_due(1_001 + timer.interval_ms));
    }

    #[test]
    fn test_timers_respect_caps() {
        let mut state = GameState::new(Difficulty::Normal, GridConfig::default());
        let mut rng = Pcg32::seed_from_u64(3);

        // First tick of a run: everything is due
        assert_eq!(run_spawn_timers(&mut state, &mut rng), 3);
        assert_eq!(state.collectibles.sats.len(), 1);
        assert_eq!(state.collectibles.fiats.len(), 1);
        assert_eq!(state.collectibles.dos.len(), 1);

        // Far in the future, only sats and fiats have room
        state.elapsed_ms = 1_000_000;
        assert_eq!(run_spawn_timers(&mut state, &mut rng), 2);
        assert_eq!(state.collectibles.dos.len(), 1);

        let do_timer = *state.spawn_timers.get(CollectibleKind::Do);
        assert_eq!(do_timer.last_spawn_ms, Some(0));
    }
}
