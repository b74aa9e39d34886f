//! Shared HTTP transport for the Moltbook API
//!
//! One request per method call, no retries, no queuing. The transport owns
//! the base URL, the optional bearer key, and the advisory rate-limit
//! snapshot taken from response headers.

use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{MoltbookError, Result};
use crate::types::RateLimitInfo;

/// Default API base. The `www` host matters: redirects from the bare domain
/// have been observed stripping the auth header.
pub const DEFAULT_BASE_URL: &str = "https://www.moltbook.com/api/v1";

/// Default request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub(crate) struct Transport {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    rate_limit: Mutex<Option<RateLimitInfo>>,
}

impl Transport {
    pub(crate) fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| MoltbookError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key,
            rate_limit: Mutex::new(None),
        })
    }

    pub(crate) fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// Most recent rate-limit snapshot, refreshed on every response.
    pub(crate) fn rate_limit(&self) -> Option<RateLimitInfo> {
        *self.rate_limit.lock().unwrap()
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<Value> {
        let url = self.url(path);
        debug!(%method, %url, "moltbook request");

        let mut builder = self.http.request(method, &url);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }
        if let Some(body) = &body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| MoltbookError::Network(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        // Every response refreshes the snapshot, even error responses.
        // Last write wins; this is advisory telemetry only.
        *self.rate_limit.lock().unwrap() = RateLimitInfo::from_headers(response.headers());

        let text = response
            .text()
            .await
            .map_err(|e| MoltbookError::Network(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "moltbook request failed");
            return Err(error_from_response(status, &text));
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text)
            .map_err(|e| MoltbookError::Network(format!("error decoding response body: {e}")))
    }

    pub(crate) async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        self.send(Method::GET, path, query, None).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<Value> {
        self.send(Method::DELETE, path, &[], None).await
    }

    pub(crate) async fn post(&self, path: &str, body: Option<Value>) -> Result<Value> {
        self.send(Method::POST, path, &[], body).await
    }

    pub(crate) async fn patch(&self, path: &str, body: Value) -> Result<Value> {
        self.send(Method::PATCH, path, &[], Some(body)).await
    }
}

/// Percent-encodes a caller-supplied identifier for use as a path segment.
pub(crate) fn path_segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

/// Serializes a request body, surfacing the (unlikely) failure as a typed
/// error instead of a panic.
pub(crate) fn to_body<T: serde::Serialize>(request: &T) -> Result<Value> {
    serde_json::to_value(request)
        .map_err(|e| MoltbookError::InvalidInput(format!("unserializable request body: {e}")))
}

/// Translates a non-2xx response into the error taxonomy.
///
/// The body is parsed as JSON when possible (`error` or `message` field);
/// otherwise the HTTP status text stands in for the message. The JSON parse
/// failure itself is never propagated.
fn error_from_response(status: StatusCode, body: &str) -> MoltbookError {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let message = parsed
        .as_ref()
        .and_then(|v| {
            v.get("error")
                .or_else(|| v.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });

    match status.as_u16() {
        401 => MoltbookError::Auth(message),
        404 => MoltbookError::NotFound(message),
        429 => {
            let retry_after = parsed.as_ref().and_then(|v| {
                v.get("retryAfter")
                    .or_else(|| v.get("retry_after"))
                    .and_then(Value::as_u64)
            });
            MoltbookError::RateLimited {
                message,
                retry_after,
            }
        }
        s => MoltbookError::Api { status: s, message },
    }
}
