//! Cooperative timers driven by the UI event loop.
//!
//! Nothing here blocks or spawns threads; the app polls both timers once per
//! frame and schedules the next repaint for the earliest pending deadline.

use std::time::{Duration, Instant};

/// Debounce window applied to scrub-slider movement.
pub const SCRUB_DEBOUNCE: Duration = Duration::from_millis(500);

/// Repeating slideshow timer.
#[derive(Debug, Clone)]
pub struct PlaybackTimer {
    delay: Duration,
    next_tick: Option<Instant>,
}

impl PlaybackTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            next_tick: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.next_tick.is_some()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arm the timer; the first tick fires one full period from `now`.
    pub fn start(&mut self, now: Instant) {
        self.next_tick = Some(now + self.delay);
    }

    pub fn stop(&mut self) {
        self.next_tick = None;
    }

    /// Change the period. A running timer restarts with the new interval.
    pub fn set_delay(&mut self, delay: Duration, now: Instant) {
        self.delay = delay;
        if self.next_tick.is_some() {
            self.next_tick = Some(now + delay);
        }
    }

    /// Return true once per elapsed period, re-arming for the next one.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.next_tick {
            Some(deadline) if now >= deadline => {
                self.next_tick = Some(now + self.delay);
                true
            }
            _ => false,
        }
    }

    /// Time until the next tick, for repaint scheduling.
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.next_tick
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}

/// One-shot debounce that coalesces rapid scrub updates.
#[derive(Debug, Clone, Default)]
pub struct ScrubDebounce {
    deadline: Option<Instant>,
}

impl ScrubDebounce {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-arm the debounce window; called on every slider movement.
    pub fn touch(&mut self, now: Instant) {
        self.deadline = Some(now + SCRUB_DEBOUNCE);
    }

    /// Disarm and report whether an update was pending; used on drag release.
    pub fn fire_now(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Return true once the debounce window has settled.
    pub fn expired(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Time until the pending update, for repaint scheduling.
    pub fn time_until_fire(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}
