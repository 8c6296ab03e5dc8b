//! Maps view state to what the terminal shows.
//!
//! [`frame`] is pure: the same state and clock reading always produce the
//! same [`Frame`]. The REPL prints frames; tests inspect them.

use std::fmt;
use std::time::{Duration, Instant};

use crate::consts::{ERROR_HINT, GET_LABEL, LOADING_LABEL, PLACEHOLDER};
use crate::state::ViewState;

/// The trigger control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Ready,
    /// Request outstanding; the control is disabled.
    Busy,
}

impl Button {
    pub fn label(self) -> &'static str {
        match self {
            Button::Ready => GET_LABEL,
            Button::Busy => LOADING_LABEL,
        }
    }

    pub fn is_enabled(self) -> bool {
        self == Button::Ready
    }
}

/// The output region below the control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Placeholder,
    Error { message: &'static str },
    /// `revealed == false` keeps the line blank until the reveal delay passes.
    Quote { text: String, revealed: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub button: Button,
    pub body: Body,
}

/// Render `state` as seen at `now`.
pub fn frame(state: &ViewState, now: Instant, reveal_delay: Duration) -> Frame {
    let button = if state.is_loading() {
        Button::Busy
    } else {
        Button::Ready
    };

    let body = if let Some(message) = state.error() {
        Body::Error { message }
    } else if !state.quote().is_empty() {
        Body::Quote {
            text: state.quote().to_string(),
            revealed: state.is_revealed(now, reveal_delay),
        }
    } else {
        Body::Placeholder
    };

    Frame { button, body }
}

impl Frame {
    /// The quote as displayed, if one is visible.
    pub fn visible_quote(&self) -> Option<&str> {
        match &self.body {
            Body::Quote {
                text,
                revealed: true,
            } => Some(text.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.button {
            Button::Ready => writeln!(f, "  [ {} ]", self.button.label())?,
            Button::Busy => writeln!(f, "  [ {} ] (disabled)", self.button.label())?,
        }
        writeln!(f)?;
        match &self.body {
            Body::Placeholder => writeln!(f, "  💭 {PLACEHOLDER}"),
            Body::Error { message } => {
                writeln!(f, "  ❌ {message}")?;
                writeln!(f, "  {ERROR_HINT}")
            }
            Body::Quote {
                text,
                revealed: true,
            } => writeln!(f, "  \"{text}\""),
            Body::Quote { revealed: false, .. } => writeln!(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::ERROR_MESSAGE;
    use crate::state::Event;

    const DELAY: Duration = Duration::from_millis(100);

    fn state_after(events: Vec<Event>) -> (ViewState, Instant) {
        let now = Instant::now();
        let mut state = ViewState::default();
        for event in events {
            state.apply(event, now);
        }
        (state, now)
    }

    #[test]
    fn idle_shows_placeholder() {
        let (state, now) = state_after(vec![]);
        let frame = frame(&state, now, DELAY);
        assert_eq!(frame.button, Button::Ready);
        assert_eq!(frame.body, Body::Placeholder);
        assert!(frame.to_string().contains(PLACEHOLDER));
        assert!(frame.to_string().contains(GET_LABEL));
    }

    #[test]
    fn loading_disables_button() {
        let (state, now) = state_after(vec![Event::TriggerRequested]);
        let frame = frame(&state, now, DELAY);
        assert_eq!(frame.button, Button::Busy);
        assert!(!frame.button.is_enabled());
        assert!(frame.to_string().contains(LOADING_LABEL));
    }

    #[test]
    fn success_hides_then_reveals() {
        let (state, at) = state_after(vec![
            Event::TriggerRequested,
            Event::RequestSucceeded("Be bold.".to_string()),
        ]);

        let early = frame(&state, at, DELAY);
        assert_eq!(early.visible_quote(), None);
        assert!(!early.to_string().contains("Be bold."));

        let late = frame(&state, at + DELAY, DELAY);
        assert_eq!(late.visible_quote(), Some("Be bold."));
        assert!(late.to_string().contains("\"Be bold.\""));
        assert!(late.button.is_enabled());
    }

    #[test]
    fn failure_shows_error_not_stale_quote() {
        let (state, at) = state_after(vec![
            Event::TriggerRequested,
            Event::RequestSucceeded("Stale.".to_string()),
            Event::TriggerRequested,
            Event::RequestFailed,
        ]);
        let frame = frame(&state, at + DELAY, DELAY);
        assert_eq!(
            frame.body,
            Body::Error {
                message: ERROR_MESSAGE
            }
        );
        let text = frame.to_string();
        assert!(text.contains(ERROR_MESSAGE));
        assert!(text.contains(ERROR_HINT));
        assert!(!text.contains("Stale."));
    }

    #[test]
    fn reloading_keeps_old_quote_hidden() {
        let (state, at) = state_after(vec![
            Event::TriggerRequested,
            Event::RequestSucceeded("Old.".to_string()),
            Event::TriggerRequested,
        ]);
        let frame = frame(&state, at + DELAY, DELAY);
        assert_eq!(frame.visible_quote(), None);
        assert_eq!(frame.button, Button::Busy);
    }
}
