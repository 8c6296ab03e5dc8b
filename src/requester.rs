//! The quote control: one trigger, at most one request in flight.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::watch;
use tracing::{debug, info};

use crate::source::QuoteSource;
use crate::state::{Event, Phase, ViewState};

/// What happened to a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// A request was issued and settled in this phase.
    Settled(Phase),
    /// A request was already outstanding; nothing was sent.
    Ignored,
}

/// Owns the view state and the source it is fed from.
///
/// State is published through a [`watch`] channel so renderers (the
/// spinner, the REPL) observe it without touching it. Only
/// [`request_quote`](Self::request_quote) mutates it.
pub struct QuoteRequester {
    source: Arc<dyn QuoteSource>,
    state: watch::Sender<ViewState>,
}

impl QuoteRequester {
    pub fn new(source: Arc<dyn QuoteSource>) -> Self {
        let (state, _) = watch::channel(ViewState::default());
        Self { source, state }
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    /// Snapshot of the current view state.
    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Issue one request and fold its outcome into the view state.
    ///
    /// While a request is outstanding this returns [`Trigger::Ignored`]
    /// without calling the source. The loading check and transition happen
    /// under the channel's lock, so concurrent callers cannot both get in.
    pub async fn request_quote(&self) -> Trigger {
        let accepted = self
            .state
            .send_if_modified(|state| state.apply(Event::TriggerRequested, Instant::now()));
        if !accepted {
            debug!("request already outstanding, trigger ignored");
            return Trigger::Ignored;
        }

        let event = match self.source.fetch().await {
            Ok(quote) => {
                info!(chars = quote.chars().count(), "quote received");
                Event::RequestSucceeded(quote)
            }
            Err(err) => {
                debug!(error = %err, "quote request failed");
                Event::RequestFailed
            }
        };

        self.state
            .send_if_modified(|state| state.apply(event, Instant::now()));
        let phase = self.state.borrow().phase();
        Trigger::Settled(phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::ERROR_MESSAGE;
    use crate::source::mock::{MockReply, MockSource};
    use reqwest::StatusCode;

    #[tokio::test]
    async fn success_settles_with_quote() {
        let source = Arc::new(MockSource::new(vec![MockReply::body(
            r#"{"quote":"Onward."}"#,
        )]));
        let requester = QuoteRequester::new(source.clone());

        assert_eq!(requester.request_quote().await, Trigger::Settled(Phase::Success));
        let state = requester.state();
        assert_eq!(state.quote(), "Onward.");
        assert!(!state.is_loading());
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn failure_settles_with_fixed_message() {
        let source = Arc::new(MockSource::new(vec![MockReply::Status(
            StatusCode::NOT_FOUND,
        )]));
        let requester = QuoteRequester::new(source);

        assert_eq!(requester.request_quote().await, Trigger::Settled(Phase::Failure));
        assert_eq!(requester.state().error(), Some(ERROR_MESSAGE));
    }

    #[tokio::test]
    async fn subscribers_see_settled_state() {
        let source = Arc::new(MockSource::new(vec![MockReply::body("Seen.")]));
        let requester = QuoteRequester::new(source);
        let mut rx = requester.subscribe();

        requester.request_quote().await;
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().quote(), "Seen.");
    }

    #[tokio::test]
    async fn can_trigger_again_after_settling() {
        let source = Arc::new(MockSource::new(vec![
            MockReply::Status(StatusCode::SERVICE_UNAVAILABLE),
            MockReply::body("Second time lucky."),
        ]));
        let requester = QuoteRequester::new(source.clone());

        requester.request_quote().await;
        assert_eq!(requester.request_quote().await, Trigger::Settled(Phase::Success));
        assert_eq!(requester.state().quote(), "Second time lucky.");
        assert_eq!(source.calls(), 2);
    }
}
