//! Endpoint configuration.
//!
//! The base URL is resolved once at startup and injected into the HTTP
//! source. Resolution order: explicit value (flag or `MUSE_API_URL`), then
//! the persisted [`Settings`](store::Settings) store, which is only consulted
//! when there is no explicit value.

pub mod store;

use std::fmt;

use reqwest::Url;

use crate::consts::QUOTE_PATH;
use crate::error::ConfigError;

/// A validated quote endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base: Url,
    quote_url: Url,
}

impl Endpoint {
    /// Validate a base URL. Only absolute http(s) URLs with a host pass.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidBaseUrl {
            url: raw.to_string(),
            reason,
        };

        let base = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {:?}", base.scheme())));
        }
        if base.host_str().is_none() {
            return Err(invalid("missing host".to_string()));
        }

        // Append to the path so a query string on the base stays a query.
        let mut quote_url = base.clone();
        quote_url
            .path_segments_mut()
            .map_err(|()| invalid("URL cannot be a base".to_string()))?
            .pop_if_empty()
            .push(QUOTE_PATH);
        quote_url.set_fragment(None);

        Ok(Self { base, quote_url })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// The URL every request goes to: `{base}/quote`.
    pub fn quote_url(&self) -> &Url {
        &self.quote_url
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.quote_url)
    }
}

/// Pick the first non-blank candidate and validate it.
///
/// `stored` is only called when `explicit` is missing or blank, so a caller
/// can defer opening the settings store until it is actually needed.
pub fn resolve<E>(
    explicit: Option<&str>,
    stored: impl FnOnce() -> Result<Option<String>, E>,
) -> Result<Endpoint, E>
where
    E: From<ConfigError>,
{
    if let Some(raw) = explicit.filter(|v| !v.trim().is_empty()) {
        return Ok(Endpoint::parse(raw)?);
    }
    match stored()? {
        Some(raw) if !raw.trim().is_empty() => Ok(Endpoint::parse(&raw)?),
        _ => Err(ConfigError::MissingBaseUrl.into()),
    }
}
