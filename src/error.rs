//! Error types for the quote request path and endpoint configuration.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/// Why a quote request did not settle with a quote.
///
/// Every variant collapses into the same user-facing failure; the detail
/// only ever reaches the debug log.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("endpoint answered {0}")]
    Status(StatusCode),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("no response within {0:?}")]
    Timeout(Duration),
}

/// Problems with the configured endpoint, reported at startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no quote endpoint configured: pass --base-url, set {}, or run `muse config set <URL>`", crate::consts::ENV_BASE_URL)]
    MissingBaseUrl,

    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
