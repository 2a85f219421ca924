//! Fixed-delay tick scheduling
//!
//! The engine never sleeps; a `TickScheduler` owns the one pending timer and
//! re-reads the engine's tick period before every reschedule, so speed
//! changes take effect on the next tick. Pausing cancels the pending timer,
//! resuming schedules immediately.

use crate::sim::{Difficulty, Engine, TickReport};

/// Identifies one scheduled callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u64);

/// A cancellable one-shot timer
pub trait Timer {
    fn schedule(&mut self, delay_ms: u64) -> TimerHandle;
    fn cancel(&mut self, handle: TimerHandle);
}

/// Deterministic timer on a virtual timeline. Time only moves when a timer
/// fires.
#[derive(Debug, Default)]
pub struct VirtualTimer {
    now_ms: u64,
    next_id: u64,
    pending: Vec<(TimerHandle, u64)>,
}

impl VirtualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Deadline of the earliest pending timer
    pub fn next_deadline(&self) -> Option<u64> {
        self.pending.iter().map(|(_, deadline)| *deadline).min()
    }

    /// Jump to the earliest deadline and return the timer that fired
    pub fn fire_next(&mut self) -> Option<TimerHandle> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .min_by_key(|(_, (handle, deadline))| (*deadline, handle.0))
            .map(|(i, _)| i)?;
        let (handle, deadline) = self.pending.remove(index);
        self.now_ms = self.now_ms.max(deadline);
        Some(handle)
    }
}

impl Timer for VirtualTimer {
    fn schedule(&mut self, delay_ms: u64) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.pending.push((handle, self.now_ms.saturating_add(delay_ms)));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.pending.retain(|(h, _)| *h != handle);
    }
}

/// Drives an `Engine` from a `Timer`
pub struct TickScheduler<T: Timer> {
    timer: T,
    pending: Option<TimerHandle>,
}

impl<T: Timer> TickScheduler<T> {
    pub fn new(timer: T) -> Self {
        Self {
            timer,
            pending: None,
        }
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    /// True while a tick is scheduled
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Start a run and tick immediately
    pub fn start(&mut self, engine: &mut Engine, difficulty: Difficulty) {
        self.cancel();
        engine.start(difficulty);
        self.schedule(0);
    }

    /// Restart the run, dropping any pending tick
    pub fn restart(&mut self, engine: &mut Engine) {
        self.cancel();
        engine.restart();
        self.schedule(0);
    }

    /// Pause cancels the pending tick; resume ticks immediately.
    /// Returns whether the run is now paused.
    pub fn toggle_pause(&mut self, engine: &mut Engine) -> bool {
        let paused = engine.toggle_pause();
        if paused {
            self.cancel();
        } else if engine.is_running() {
            self.schedule(0);
        }
        paused
    }

    /// Handle a fired timer. Stale handles (cancelled or superseded) are
    /// ignored and return `None`.
    pub fn on_timer(&mut self, handle: TimerHandle, engine: &mut Engine) -> Option<TickReport> {
        if self.pending != Some(handle) {
            log::debug!("Ignoring stale timer {:?}", handle);
            return None;
        }
        self.pending = None;

        let report = engine.tick();
        if engine.is_running() && !engine.is_paused() {
            self.schedule(engine.current_speed_ms());
        }
        Some(report)
    }

    /// Drop the pending tick, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.timer.cancel(handle);
        }
    }

    fn schedule(&mut self, delay_ms: u64) {
        self.cancel();
        self.pending = Some(self.timer.schedule(delay_ms));
    }
}
