use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use super::{QuoteSource, extract_quote};
use crate::config::Endpoint;
use crate::consts::USER_AGENT;
use crate::error::FetchError;

/// Fetches quotes with `GET {base}/quote`.
pub struct HttpSource {
    client: Client,
    url: Url,
    timeout: Option<Duration>,
}

impl HttpSource {
    pub fn new(endpoint: &Endpoint) -> Result<Self, FetchError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            url: endpoint.quote_url().clone(),
            timeout: None,
        })
    }

    /// Bound each request (headers and body). `None` waits indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    async fn get(&self) -> Result<String, FetchError> {
        let response = self.client.get(self.url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.text().await?;
        debug!(bytes = body.len(), "quote response received");
        Ok(extract_quote(&body))
    }
}

#[async_trait]
impl QuoteSource for HttpSource {
    async fn fetch(&self) -> Result<String, FetchError> {
        debug!(url = %self.url, "requesting quote");
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.get())
                .await
                .map_err(|_| FetchError::Timeout(limit))?,
            None => self.get().await,
        }
    }
}
