use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use reqwest::StatusCode;
use tokio::sync::Notify;

use super::{QuoteSource, extract_quote};
use crate::error::FetchError;

/// A scripted endpoint response.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// 2xx with this body; goes through [`extract_quote`] like a real one.
    Body(String),
    /// Non-2xx status.
    Status(StatusCode),
}

impl MockReply {
    pub fn body(body: impl Into<String>) -> Self {
        Self::Body(body.into())
    }
}

/// A scripted source for tests. Replies in order, then keeps repeating the
/// last reply; with no replies at all it answers an empty quote. Counts
/// every call.
pub struct MockSource {
    replies: Vec<MockReply>,
    calls: AtomicUsize,
    gate: Option<Arc<Notify>>,
}

impl MockSource {
    pub fn new(replies: Vec<MockReply>) -> Self {
        Self {
            replies,
            calls: AtomicUsize::new(0),
            gate: None,
        }
    }

    /// Hold every request open until `gate` is notified once per call.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Number of requests issued so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuoteSource for MockSource {
    async fn fetch(&self) -> Result<String, FetchError> {
        let i = self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match self.replies.get(i).or_else(|| self.replies.last()) {
            Some(MockReply::Body(body)) => Ok(extract_quote(body)),
            Some(MockReply::Status(status)) => Err(FetchError::Status(*status)),
            None => Ok(String::new()),
        }
    }
}
