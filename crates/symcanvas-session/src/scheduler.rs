//! Debounced redraw scheduling.
//!
//! Pointer moves can arrive every few milliseconds; redrawing for each one
//! is wasted work. The scheduler collapses any number of requests into one
//! redraw per interval: the first request while idle arms a deadline, later
//! requests are absorbed until it fires.

use crate::clock::Millis;

/// Default debounce interval.
pub const DEFAULT_INTERVAL_MS: Millis = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// No redraw pending.
    Idle,
    /// A redraw will run once the clock reaches `deadline`.
    Armed { deadline: Millis },
}

#[derive(Debug, Clone)]
pub struct RedrawScheduler {
    interval: Millis,
    state: SchedulerState,
}

impl Default for RedrawScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL_MS)
    }
}

impl RedrawScheduler {
    pub fn new(interval: Millis) -> Self {
        Self {
            interval,
            state: SchedulerState::Idle,
        }
    }

    pub fn interval(&self) -> Millis {
        self.interval
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.state, SchedulerState::Armed { .. })
    }

    pub fn deadline(&self) -> Option<Millis> {
        match self.state {
            SchedulerState::Armed { deadline } => Some(deadline),
            SchedulerState::Idle => None,
        }
    }

    /// Ask for a redraw. Returns `true` if this call armed the timer,
    /// `false` if one was already pending.
    pub fn request_redraw(&mut self, now: Millis) -> bool {
        match self.state {
            SchedulerState::Armed { deadline } => {
                log::trace!("Redraw already pending (due at {})", deadline);
                false
            }
            SchedulerState::Idle => {
                let deadline = now.saturating_add(self.interval);
                log::debug!("Redraw armed at {} (due at {})", now, deadline);
                self.state = SchedulerState::Armed { deadline };
                true
            }
        }
    }

    /// If a redraw is due at `now`, go back to idle and run `body`.
    ///
    /// The state is idle while `body` runs, so a `request_redraw` from
    /// inside it schedules exactly one more redraw. Returns whether `body`
    /// ran.
    pub fn run_due<F>(&mut self, now: Millis, body: F) -> bool
    where
        F: FnOnce(&mut Self),
    {
        match self.state {
            SchedulerState::Armed { deadline } if now >= deadline => {
                self.state = SchedulerState::Idle;
                body(self);
                true
            }
            _ => false,
        }
    }
}
