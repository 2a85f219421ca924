//! Speed progression state machine
//!
//! Idle -> CountingDown when enough sats were collected in the current speed
//! level, or when `SPEED_TIME_TRIGGER_MS` passed since the last change.
//! CountingDown -> Idle after `SPEED_COUNTDOWN_MS`, bumping the speed level.
//! Capped at `MAX_SPEED_LEVEL`.

use serde::{Deserialize, Serialize};

use super::difficulty::{Difficulty, DifficultySettings};
use crate::consts::*;

/// Countdown gating the next speed level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountdownState {
    Idle,
    CountingDown { remaining_ms: u64 },
}

/// Transition reported by `SpeedProgression::advance`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedChange {
    CountdownStarted { speed_level: u32 },
    SpeedIncreased { speed_level: u32, speed_ms: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeedProgression {
    /// 1..=MAX_SPEED_LEVEL
    pub speed_level: u32,
    /// Current tick period
    pub speed_ms: u64,
    pub countdown: CountdownState,
    settings: DifficultySettings,
    /// Sats collected since this speed level began
    sats_this_level: u32,
    /// Time since the last speed change (or countdown start)
    since_change_ms: u64,
}

impl SpeedProgression {
    pub fn new(difficulty: Difficulty) -> Self {
        let settings = difficulty.settings();
        Self {
            speed_level: 1,
            speed_ms: settings.initial_speed_ms,
            countdown: CountdownState::Idle,
            settings,
            sats_this_level: 0,
            since_change_ms: 0,
        }
    }

    pub fn record_sat(&mut self) {
        self.sats_this_level += 1;
    }

    pub fn sats_this_level(&self) -> u32 {
        self.sats_this_level
    }

    pub fn is_capped(&self) -> bool {
        self.speed_level >= MAX_SPEED_LEVEL
    }

    pub fn is_counting_down(&self) -> bool {
        matches!(self.countdown, CountdownState::CountingDown { .. })
    }

    /// Whole seconds left on the countdown, rounded up
    pub fn countdown_seconds(&self) -> Option<u64> {
        match self.countdown {
            CountdownState::Idle => None,
            CountdownState::CountingDown { remaining_ms } => Some(remaining_ms.div_ceil(1000)),
        }
    }

    /// Advance by `dt_ms` of simulated time
    pub fn advance(&mut self, dt_ms: u64) -> Option<SpeedChange> {
        self.since_change_ms = self.since_change_ms.saturating_add(dt_ms);

        match self.countdown {
            CountdownState::Idle => {
                if self.is_capped() {
                    return None;
                }
                let sat_target = SATS_PER_SPEED_LEVEL * self.speed_level;
                if self.sats_this_level >= sat_target
                    || self.since_change_ms >= SPEED_TIME_TRIGGER_MS
                {
                    self.countdown = CountdownState::CountingDown {
                        remaining_ms: SPEED_COUNTDOWN_MS,
                    };
                    self.since_change_ms = 0;
                    return Some(SpeedChange::CountdownStarted {
                        speed_level: self.speed_level,
                    });
                }
                None
            }
            CountdownState::CountingDown { remaining_ms } => {
                let remaining_ms = remaining_ms.saturating_sub(dt_ms);
                if remaining_ms > 0 {
                    self.countdown = CountdownState::CountingDown { remaining_ms };
                    return None;
                }
                self.increase_speed();
                Some(SpeedChange::SpeedIncreased {
                    speed_level: self.speed_level,
                    speed_ms: self.speed_ms,
                })
            }
        }
    }

    fn increase_speed(&mut self) {
        self.speed_level = (self.speed_level + 1).min(MAX_SPEED_LEVEL);
        self.speed_ms = self.settings.speed_ms_for_level(self.speed_level);
        self.countdown = CountdownState::Idle;
        self.sats_this_level = 0;
        self.since_change_ms = 0;
    }
}
