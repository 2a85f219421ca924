//! Demo mode - a greedy bot that plays the game
//!
//! Heads for the nearest sat or do, never steps into a wall, its own body or
//! a fiat unless nothing else is left.

use super::state::{Direction, GameState, GridPos};

/// Pick the heading for the next tick, `None` when the run isn't moving
pub fn choose_direction(state: &GameState) -> Option<Direction> {
    if !state.is_running() || state.direction == Direction::Idle {
        return None;
    }

    let head = state.head();
    let target = nearest_goal(state, head);

    let candidates = Direction::ALL
        .into_iter()
        .filter(|dir| !state.direction.is_opposite(*dir));

    let mut best: Option<(Direction, i32)> = None;
    let mut fallback: Option<Direction> = None;

    for dir in candidates {
        let next = head + dir.delta();
        if !state.grid.contains(next) || state.snake.contains(&next) {
            continue;
        }
        if state.collectibles.fiats.contains(&next) {
            fallback.get_or_insert(dir);
            continue;
        }

        let mut cost = target.map_or(0, |t| manhattan(next, t));
        // Slight preference for keeping the current heading
        if dir != state.direction {
            cost += 1;
        }
        // Avoid cells with no way out
        if free_neighbours(state, next) == 0 {
            cost += 1_000;
        }

        if best.is_none_or(|(_, best_cost)| cost < best_cost) {
            best = Some((dir, cost));
        }
    }

    best.map(|(dir, _)| dir).or(fallback).or(Some(state.direction))
}

fn nearest_goal(state: &GameState, from: GridPos) -> Option<GridPos> {
    state
        .collectibles
        .sats
        .iter()
        .chain(state.collectibles.dos.iter())
        .copied()
        .min_by_key(|pos| manhattan(from, *pos))
}

fn free_neighbours(state: &GameState, pos: GridPos) -> usize {
    Direction::ALL
        .iter()
        .map(|dir| pos + dir.delta())
        .filter(|n| state.grid.contains(*n) && !state.snake.contains(n))
        .count()
}

#[inline]
fn manhattan(a: GridPos, b: GridPos) -> i32 {
    let d = (a - b).abs();
    d.x + d.y
}
