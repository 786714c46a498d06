//! Single-window debouncing
//!
//! Editors and build tools emit several writes per logical save. The first
//! write arms a deadline `DEBOUNCE_WINDOW` in the future, every further write
//! pushes it back by the same window, and only a deadline that elapses
//! without an intervening write produces a restart.
//!
//! The state machine is clock-agnostic: callers pass `now` in, which keeps it
//! deterministic under test and lets the control loop drive the timer.

use crate::EventKind;
use gomon_core::DEBOUNCE_WINDOW;
use std::time::Duration;
use tokio::time::Instant;

/// Debounce state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DebounceState {
    /// Resting state, no write pending
    #[default]
    Idle,
    /// A write was seen; restart once `deadline` passes quietly
    Pending { deadline: Instant },
}

/// Effect of feeding one event to the debouncer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observed {
    /// Not write-like, state unchanged
    Ignored,
    /// First write of a burst, deadline armed
    Armed,
    /// Write during a burst, deadline pushed back
    Extended,
}

/// A confirmed change: one restart is due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Restart;

/// Debouncer over write-like events
#[derive(Debug)]
pub struct Debouncer {
    state: DebounceState,
    window: Duration,
}

impl Debouncer {
    pub fn new() -> Self {
        Self {
            state: DebounceState::Idle,
            window: DEBOUNCE_WINDOW,
        }
    }

    /// Feed a raw event observed at `now`
    pub fn on_event(&mut self, kind: EventKind, now: Instant) -> Observed {
        if !kind.is_write_like() {
            return Observed::Ignored;
        }

        let deadline = now + self.window;
        match self.state {
            DebounceState::Idle => {
                self.state = DebounceState::Pending { deadline };
                Observed::Armed
            }
            DebounceState::Pending { .. } => {
                self.state = DebounceState::Pending { deadline };
                Observed::Extended
            }
        }
    }

    /// Timer expiry observed at `now`
    ///
    /// Fires at most once per burst. A timer that fires while idle, or
    /// before the (extended) deadline, is stale and does nothing.
    pub fn on_timer(&mut self, now: Instant) -> Option<Restart> {
        match self.state {
            DebounceState::Pending { deadline } if now >= deadline => {
                self.state = DebounceState::Idle;
                Some(Restart)
            }
            _ => None,
        }
    }

    /// Deadline the caller should sleep until, if a burst is pending
    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            DebounceState::Pending { deadline } => Some(deadline),
            DebounceState::Idle => None,
        }
    }

    pub fn state(&self) -> DebounceState {
        self.state
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}
