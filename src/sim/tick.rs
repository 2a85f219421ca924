//! Discrete simulation step
//!
//! One call advances the run by one move of the snake plus `dt_ms` of
//! simulated time for the spawn, speed and tip timers.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::progression::SpeedChange;
use super::spawn::{run_spawn_timers, spawn_collectible};
use super::state::{CollectibleKind, GameEvent, GameOverReason, GamePhase, GameState};
use crate::consts::*;

/// What a tick did to the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickOutcome {
    /// Not running or paused; nothing advanced
    Idle,
    Continuing,
    LeveledUp,
    GameOver(GameOverReason),
}

/// Outcome plus the events raised during the tick, in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    pub outcome: TickOutcome,
    pub events: Vec<GameEvent>,
}

impl TickReport {
    fn idle() -> Self {
        Self {
            outcome: TickOutcome::Idle,
            events: Vec::new(),
        }
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.outcome, TickOutcome::GameOver(_))
    }
}

/// Advance the run by one step, with `dt_ms` of simulated time
pub fn tick<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R, dt_ms: u64) -> TickReport {
    if state.phase != GamePhase::Running {
        return TickReport::idle();
    }

    let mut events = Vec::new();
    state.time_ticks += 1;
    state.elapsed_ms = state.elapsed_ms.saturating_add(dt_ms);

    // Apply the heading requested since the last tick
    if let Some(requested) = state.pending_direction.take()
        && !state.direction.is_opposite(requested)
    {
        state.direction = requested;
    }

    let new_head = state.head() + state.direction.delta();

    if !state.grid.contains(new_head) {
        return end_run(state, GameOverReason::WallCollision, events);
    }
    if state.snake.contains(&new_head) {
        return end_run(state, GameOverReason::SelfCollision, events);
    }

    state.snake.push_front(new_head);

    // Sets are disjoint, so at most one kind matches
    let settings = state.difficulty.settings();
    let eaten = state.collectibles.kind_at(new_head);
    match eaten {
        Some(CollectibleKind::Sat) => {
            state.collectibles.take(CollectibleKind::Sat, new_head);
            state.score += SAT_SCORE;
            state.health = (state.health + settings.health_gain_on_sat).min(MAX_HEALTH);
            state.stats.sats_collected += 1;
            state.speed.record_sat();
            events.push(GameEvent::SatCollected);
            spawn_collectible(state, CollectibleKind::Sat, rng);
            log::debug!(
                "Sat collected! Total: {}, speed level {} ({}ms)",
                state.stats.sats_collected,
                state.speed.speed_level,
                state.speed.speed_ms
            );
        }
        Some(CollectibleKind::Fiat) => {
            state.collectibles.take(CollectibleKind::Fiat, new_head);
            state.health -= settings.fiat_damage;
            state.stats.fiat_hits += 1;
            events.push(GameEvent::FiatHit);
            spawn_collectible(state, CollectibleKind::Fiat, rng);
        }
        Some(CollectibleKind::Do) => {
            state.collectibles.take(CollectibleKind::Do, new_head);
            state.score += DO_SCORE;
            state.stats.good_practices += 1;
            events.push(GameEvent::DoCollected);
            spawn_collectible(state, CollectibleKind::Do, rng);
        }
        None => {
            state.snake.pop_back();
        }
    }

    run_spawn_timers(state, rng);

    let mut leveled_up = false;
    if state.score >= u64::from(state.level) * LEVEL_SCORE_STEP
        && state.health >= LEVEL_UP_MIN_HEALTH
    {
        state.level += 1;
        leveled_up = true;
        events.push(GameEvent::LevelUp { level: state.level });
        log::info!("Level {}! Score {}", state.level, state.score);
    }

    if state.health <= 0 {
        return end_run(state, GameOverReason::HealthDepleted, events);
    }

    match state.speed.advance(dt_ms) {
        Some(SpeedChange::CountdownStarted { speed_level }) => {
            events.push(GameEvent::CountdownStarted { speed_level });
        }
        Some(SpeedChange::SpeedIncreased {
            speed_level,
            speed_ms,
        }) => {
            log::info!("Speed increased to {}ms (level {}/{})", speed_ms, speed_level, MAX_SPEED_LEVEL);
            events.push(GameEvent::SpeedIncreased {
                speed_level,
                speed_ms,
            });
        }
        None => {}
    }

    if let Some(index) = state.tips.advance(dt_ms) {
        events.push(GameEvent::TipRotated { index });
    }

    TickReport {
        outcome: if leveled_up {
            TickOutcome::LeveledUp
        } else {
            TickOutcome::Continuing
        },
        events,
    }
}

fn end_run(state: &mut GameState, reason: GameOverReason, mut events: Vec<GameEvent>) -> TickReport {
    state.phase = GamePhase::GameOver(reason);
    events.push(GameEvent::GameOver { reason });
    log::info!("Game over ({:?}) with score {}", reason, state.score);
    TickReport {
        outcome: TickOutcome::GameOver(reason),
        events,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use glam::IVec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use super::*;
    use crate::sim::difficulty::Difficulty;
    use crate::sim::state::{Direction, GridConfig};

    /// Running state with spawn timers parked so only collisions spawn
    fn quiet_state(difficulty: Difficulty) -> GameState {
        let mut state = GameState::new(difficulty, GridConfig::default());
        for timer in state.spawn_timers.timers.iter_mut() {
            timer.last_spawn_ms = Some(0);
            timer.interval_ms = u64::MAX;
        }
        state
    }

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(12345)
    }

    #[test]
    fn test_normal_movement_keeps_length() {
        let mut state = quiet_state(Difficulty::Normal);
        state.snake = VecDeque::from([IVec2::new(5, 5), IVec2::new(4, 5)]);

        let report = tick(&mut state, &mut rng(), 300);
        assert_eq!(report.outcome, TickOutcome::Continuing);
        assert_eq!(
            state.snake,
            VecDeque::from([IVec2::new(6, 5), IVec2::new(5, 5)])
        );
        assert_eq!(state.elapsed_ms, 300);
    }

    #[test]
    fn test_sat_collection() {
        let mut state = quiet_state(Difficulty::Normal);
        state.snake = VecDeque::from([IVec2::new(5, 5)]);
        state.collectibles.sats.push(IVec2::new(6, 5));
        let sats_before = state.collectibles.sats.len();
        let len_before = state.snake.len();

        let report = tick(&mut state, &mut rng(), 300);

        assert_eq!(report.outcome, TickOutcome::Continuing);
        assert_eq!(report.events, vec![GameEvent::SatCollected]);
        assert_eq!(state.score, 10);
        assert_eq!(state.health, MAX_HEALTH); // min(100, 100 + 8)
        assert_eq!(state.head(), IVec2::new(6, 5));
        // grew: tail kept
        assert_eq!(state.snake.len(), len_before + 1);
        assert_eq!(state.collectibles.sats.len(), sats_before);
        assert!(!state.collectibles.sats.contains(&IVec2::new(6, 5)));
        assert_eq!(state.stats.sats_collected, 1);
        assert_eq!(state.speed.sats_this_level(), 1);
    }

    #[test]
    fn test_sat_heals_up_to_cap() {
        let mut state = quiet_state(Difficulty::Legendary);
        state.health = 60;
        state.collectibles.sats.push(state.head() + IVec2::X);
        tick(&mut state, &mut rng(), 200);
        assert_eq!(state.health, 65);
    }

    #[test]
    fn test_fiat_damage_ends_run() {
        let mut state = quiet_state(Difficulty::Normal);
        state.snake = VecDeque::from([IVec2::new(5, 5)]);
        state.health = 20;
        state.collectibles.fiats.push(IVec2::new(6, 5));

        let report = tick(&mut state, &mut rng(), 300);

        assert_eq!(state.health, -5);
        assert_eq!(
            report.outcome,
            TickOutcome::GameOver(GameOverReason::HealthDepleted)
        );
        assert_eq!(
            report.events,
            vec![
                GameEvent::FiatHit,
                GameEvent::GameOver {
                    reason: GameOverReason::HealthDepleted
                }
            ]
        );
        assert_eq!(
            state.phase,
            GamePhase::GameOver(GameOverReason::HealthDepleted)
        );
    }

    #[test]
    fn test_fiat_hit_survivable() {
        let mut state = quiet_state(Difficulty::Normal);
        state.collectibles.fiats.push(state.head() + IVec2::X);

        let report = tick(&mut state, &mut rng(), 300);
        assert_eq!(report.outcome, TickOutcome::Continuing);
        assert_eq!(state.health, 75);
        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.collectibles.fiats.len(), 1);
        assert_eq!(state.stats.fiat_hits, 1);
    }

    #[test]
    fn test_do_collection() {
        let mut state = quiet_state(Difficulty::Normal);
        state.health = 40;
        state.collectibles.dos.push(state.head() + IVec2::X);

        let report = tick(&mut state, &mut rng(), 300);
        assert_eq!(report.events, vec![GameEvent::DoCollected]);
        assert_eq!(state.score, 20);
        assert_eq!(state.health, 40);
        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.stats.good_practices, 1);
    }

    #[test]
    fn test_wall_collisions() {
        let grid = GridConfig::default();
        let cases = [
            (IVec2::new(0, 5), Direction::Left),
            (IVec2::new(grid.width - 1, 5), Direction::Right),
            (IVec2::new(5, 0), Direction::Up),
            (IVec2::new(5, grid.height - 1), Direction::Down),
        ];
        for (start, direction) in cases {
            let mut state = quiet_state(Difficulty::Normal);
            state.snake = VecDeque::from([start]);
            state.direction = direction;

            let report = tick(&mut state, &mut rng(), 300);
            assert_eq!(
                report.outcome,
                TickOutcome::GameOver(GameOverReason::WallCollision),
                "moving {:?} from {:?}",
                direction,
                start
            );
            // body untouched
            assert_eq!(state.snake, VecDeque::from([start]));
        }
    }

    #[test]
    fn test_self_collision_after_u_turn() {
        let mut state = quiet_state(Difficulty::Normal);
        state.snake = VecDeque::from([
            IVec2::new(5, 5),
            IVec2::new(4, 5),
            IVec2::new(3, 5),
            IVec2::new(2, 5),
        ]);
        state.direction = Direction::Right;
        let mut rng = rng();

        tick(&mut state, &mut rng, 300);
        state.pending_direction = Some(Direction::Down);
        tick(&mut state, &mut rng, 300);
        state.pending_direction = Some(Direction::Left);
        tick(&mut state, &mut rng, 300);
        state.pending_direction = Some(Direction::Up);
        let report = tick(&mut state, &mut rng, 300);

        assert_eq!(
            report.outcome,
            TickOutcome::GameOver(GameOverReason::SelfCollision)
        );
    }

    #[test]
    fn test_reverse_request_ignored() {
        let mut state = quiet_state(Difficulty::Normal);
        state.snake = VecDeque::from([IVec2::new(5, 5), IVec2::new(4, 5)]);
        state.pending_direction = Some(Direction::Left);

        let report = tick(&mut state, &mut rng(), 300);
        assert_eq!(report.outcome, TickOutcome::Continuing);
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.head(), IVec2::new(6, 5));
    }

    #[test]
    fn test_level_up_needs_health() {
        let mut state = quiet_state(Difficulty::Normal);
        state.score = 90;
        state.health = 40;
        state.collectibles.sats.push(state.head() + IVec2::X);

        // 100 points but health 48 < 50
        let report = tick(&mut state, &mut rng(), 300);
        assert_eq!(report.outcome, TickOutcome::Continuing);
        assert_eq!(state.level, 1);

        state.health = 50;
        let report = tick(&mut state, &mut rng(), 300);
        assert_eq!(report.outcome, TickOutcome::LeveledUp);
        assert_eq!(state.level, 2);
        assert!(report.events.contains(&GameEvent::LevelUp { level: 2 }));
    }

    #[test]
    fn test_first_tick_spawns_everything() {
        let mut state = GameState::new(Difficulty::Normal, GridConfig::default());
        tick(&mut state, &mut rng(), 300);
        assert_eq!(state.collectibles.sats.len(), 1);
        assert_eq!(state.collectibles.fiats.len(), 1);
        assert_eq!(state.collectibles.dos.len(), 1);
    }

    #[test]
    fn test_speed_progression_through_ticks() {
        let mut state = quiet_state(Difficulty::Normal);
        state.snake = VecDeque::from([IVec2::new(2, 5)]);
        state.collectibles.sats.push(IVec2::new(3, 5));
        state.collectibles.sats.push(IVec2::new(4, 5));
        let mut rng = rng();

        tick(&mut state, &mut rng, 300);
        let report = tick(&mut state, &mut rng, 300);
        assert!(report
            .events
            .contains(&GameEvent::CountdownStarted { speed_level: 1 }));

        // Circle a 2x2 block until the countdown lands; nothing left to eat
        state.collectibles.clear();
        let mut increased = false;
        for i in 0..40 {
            state.pending_direction = Some(match i % 4 {
                0 => Direction::Down,
                1 => Direction::Left,
                2 => Direction::Up,
                _ => Direction::Right,
            });
            let report = tick(&mut state, &mut rng, 300);
            if report.is_game_over() {
                break;
            }
            if report.events.iter().any(|e| {
                matches!(
                    e,
                    GameEvent::SpeedIncreased {
                        speed_level: 2,
                        speed_ms: 275
                    }
                )
            }) {
                increased = true;
                break;
            }
        }
        assert!(increased);
        assert_eq!(state.speed_ms(), 275);
    }

    #[test]
    fn test_paused_and_finished_runs_do_not_advance() {
        let mut state = quiet_state(Difficulty::Normal);
        state.phase = GamePhase::Paused;
        let head = state.head();
        assert_eq!(tick(&mut state, &mut rng(), 300).outcome, TickOutcome::Idle);
        assert_eq!(state.head(), head);
        assert_eq!(state.time_ticks, 0);

        state.phase = GamePhase::GameOver(GameOverReason::WallCollision);
        assert_eq!(tick(&mut state, &mut rng(), 300).outcome, TickOutcome::Idle);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(Difficulty::Normal, GridConfig::default());
        let mut state2 = GameState::new(Difficulty::Normal, GridConfig::default());
        let mut rng1 = Pcg32::seed_from_u64(99999);
        let mut rng2 = Pcg32::seed_from_u64(99999);

        let turns = [Direction::Up, Direction::Left, Direction::Down, Direction::Left];
        for turn in turns {
            state1.pending_direction = Some(turn);
            state2.pending_direction = Some(turn);
            tick(&mut state1, &mut rng1, 300);
            tick(&mut state2, &mut rng2, 300);
        }

        assert_eq!(state1.snake, state2.snake);
        assert_eq!(state1.collectibles, state2.collectibles);
        assert_eq!(state1.phase, state2.phase);
    }
}
