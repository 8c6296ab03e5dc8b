//! Where quotes come from.
//!
//! A [`QuoteSource`] performs exactly one outbound request per call and
//! hands back the quote text. [`extract_quote`] turns a response body into
//! that text.

pub mod http;
pub mod mock;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::FetchError;

/// Object fields checked for the quote, in priority order.
const QUOTE_FIELDS: &[&str] = &["quote", "text"];

/// One request, one quote. No retries, no caching.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn fetch(&self) -> Result<String, FetchError>;
}

/// Pull the quote out of a response body.
///
/// JSON bodies yield the `quote` field, else the `text` field, else the
/// payload itself. Fields holding `null`, `false`, `0` or `""` are skipped.
/// Bodies that are not JSON are used as trimmed raw text. The result is not
/// validated: an empty quote is still a quote.
pub fn extract_quote(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => from_json(&value),
        Err(_) => body.trim().to_string(),
    }
}

fn from_json(value: &Value) -> String {
    if let Value::Object(map) = value
        && let Some(field) = QUOTE_FIELDS
            .iter()
            .filter_map(|key| map.get(*key))
            .find(|v| is_truthy(v))
    {
        return display(field);
    }
    display(value)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
