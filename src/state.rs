//! View state for the quote control and the transitions that drive it.
//!
//! [`ViewState`] is a plain value: every change goes through
//! [`ViewState::apply`], which takes the event and the instant it happened.
//! The reveal flag is derived from the state and a clock reading, so the
//! request flow never waits on animation timing.

use std::time::{Duration, Instant};

use crate::consts::ERROR_MESSAGE;

/// Where the control is in its request cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Success,
    Failure,
}

/// Inputs to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The user pressed the control.
    TriggerRequested,
    /// The outstanding request settled with a usable quote.
    RequestSucceeded(String),
    /// The outstanding request settled without one.
    RequestFailed,
}

/// Everything the renderer needs. Created empty, dropped with the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    phase: Phase,
    quote: String,
    error: Option<&'static str>,
    succeeded_at: Option<Instant>,
}

impl ViewState {
    /// Apply an event observed at `now`. Returns `false` when the event does
    /// not fit the current phase; the state is then left untouched.
    pub fn apply(&mut self, event: Event, now: Instant) -> bool {
        match (self.phase, event) {
            (Phase::Loading, Event::TriggerRequested) => false,
            (_, Event::TriggerRequested) => {
                self.phase = Phase::Loading;
                self.error = None;
                self.succeeded_at = None;
                true
            }
            (Phase::Loading, Event::RequestSucceeded(quote)) => {
                self.phase = Phase::Success;
                self.quote = quote;
                self.succeeded_at = Some(now);
                true
            }
            (Phase::Loading, Event::RequestFailed) => {
                self.phase = Phase::Failure;
                self.error = Some(ERROR_MESSAGE);
                true
            }
            _ => false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Last successfully fetched quote, empty if none yet.
    pub fn quote(&self) -> &str {
        &self.quote
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// Whether the quote should be visible at `now`, given the reveal delay.
    pub fn is_revealed(&self, now: Instant, delay: Duration) -> bool {
        self.reveal_remaining(now, delay) == Some(Duration::ZERO)
    }

    /// Time left until the quote is revealed, or `None` if it never will be
    /// in the current phase.
    pub fn reveal_remaining(&self, now: Instant, delay: Duration) -> Option<Duration> {
        if self.phase != Phase::Success || self.quote.is_empty() || self.error.is_some() {
            return None;
        }
        let elapsed = now.saturating_duration_since(self.succeeded_at?);
        Some(delay.saturating_sub(elapsed))
    }
}
