//! Read-only HTTP seam.
//!
//! Everything the dashboard asks of the network is a `GET` that returns a
//! small JSON document, so responses are fully buffered.

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Header name to value. Response header names are lower-cased.
pub type Headers = HashMap<String, String>;

#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub headers: Headers,
    pub body: Bytes,
}

impl Response {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self::with_headers(status, Headers::new(), body)
    }

    pub fn with_headers(status: u16, headers: Headers, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// A response carrying `value` as its JSON body.
    pub fn json_body(status: u16, value: &Value) -> Self {
        let headers = Headers::from([("content-type".to_string(), "application/json".to_string())]);
        Self::with_headers(status, headers, value.to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("content-type").map(String::as_str)
    }

    pub fn text(&self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.to_vec())
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// The request never produced a response.
///
/// Non-2xx statuses are not errors here; the backend client decides what
/// they mean.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("request cancelled")]
    Cancelled,

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("transport error: {0}")]
    Other(String),
}

/// `GET` against the device backend.
///
/// ```ignore
/// use fleetdash::traits::{Headers, HttpClient};
///
/// async fn backend_up(http: &dyn HttpClient) -> bool {
///     http.get("http://localhost:3000/iot-status/", &Headers::new())
///         .await
///         .is_ok_and(|r| r.is_success())
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError>;
}
