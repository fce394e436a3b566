//! HTTP transport shared by every API call.
//!
//! DESIGN
//! ======
//! Endpoint wrappers only describe a [`Request`]; sending it is the job of a
//! [`Transport`]. `HttpTransport` is the reqwest-backed implementation used in
//! production. Tests swap in a recording mock.
//!
//! ERROR HANDLING
//! ==============
//! Network failures, non-2xx statuses, and undecodable bodies all surface as
//! [`ApiError`]. Callers propagate them unchanged.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ClientConfig;

/// Opaque key-value request body.
pub type Payload = serde_json::Map<String, Value>;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced while sending a request to the backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The request never produced a response (connect, timeout, I/O).
    #[error("request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success HTTP status.
    #[error("backend returned status {status}")]
    Status { status: u16, body: String },

    /// The response body was not the JSON shape the caller expected.
    #[error("response decode failed: {0}")]
    Decode(String),
}

// =============================================================================
// REQUEST
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single backend call: endpoint path, method, and body.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub url: String,
    pub method: Method,
    pub data: Payload,
}

impl Request {
    #[must_use]
    pub fn post(url: impl Into<String>, data: Payload) -> Self {
        Self { url: url.into(), method: Method::Post, data }
    }
}

/// Anything that can deliver a [`Request`] and hand back the response body.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` and return the decoded JSON body.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on network failure, non-2xx status, or a body
    /// that is not JSON.
    async fn send(&self, request: Request) -> Result<Value, ApiError>;
}

// =============================================================================
// HTTP TRANSPORT
// =============================================================================

pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Build a transport for `config.base_url` with the configured timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::HttpClientBuild`] if reqwest rejects the settings.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url.clone() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> Result<Value, ApiError> {
        let url = endpoint_url(&self.base_url, &request.url);
        tracing::debug!(method = %request.method, %url, "sending request");

        let builder = match request.method {
            Method::Get => self.http.get(&url).query(&request.data),
            Method::Post => self.http.post(&url).json(&request.data),
        };
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        tracing::debug!(%url, status, "response received");

        if !(200..300).contains(&status) {
            tracing::warn!(%url, status, "backend returned error status");
            return Err(ApiError::Status { status, body: text });
        }
        parse_body(&text)
    }
}

/// Serialize a typed request body into a [`Payload`].
///
/// # Errors
///
/// Returns [`ApiError::Decode`] if `body` does not serialize to a JSON object.
pub fn to_payload<B: Serialize>(body: &B) -> Result<Payload, ApiError> {
    match serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))? {
        Value::Object(map) => Ok(map),
        other => Err(ApiError::Decode(format!("request body is not an object: {other}"))),
    }
}

/// Decode a response body into a typed shape.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] if `body` does not match `T`.
pub fn decode<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Join the configured base URL and an endpoint path.
fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Decode a response body. An empty body decodes as JSON `null`.
fn parse_body(text: &str) -> Result<Value, ApiError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}
