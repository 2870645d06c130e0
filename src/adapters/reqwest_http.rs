//! [`HttpClient`] over reqwest.

use async_trait::async_trait;
use std::time::Duration;

use crate::cli::VERSION;
use crate::traits::{Headers, HttpClient, HttpError, Response};

fn user_agent() -> String {
    format!("fleetdash/{}", VERSION)
}

/// Production HTTP adapter.
///
/// No request timeout by default: a hung request only delays its own poll
/// cycle while the scheduler keeps ticking.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(user_agent())
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Falling back to default HTTP client: {}", e);
                reqwest::Client::new()
            });
        Self { client }
    }

    /// Client whose requests give up after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent())
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    /// Wrap a preconfigured reqwest client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl From<reqwest::Error> for HttpError {
    fn from(err: reqwest::Error) -> Self {
        let message = err.to_string();
        if err.is_timeout() {
            HttpError::Timeout(message)
        } else if err.is_connect() {
            HttpError::ConnectionFailed(message)
        } else if err.is_builder() {
            HttpError::InvalidUrl(message)
        } else {
            HttpError::Other(message)
        }
    }
}

fn lowercase_headers(map: &reqwest::header::HeaderMap) -> Headers {
    map.iter()
        .filter_map(|(name, value)| Some((name.as_str().to_string(), value.to_str().ok()?.to_string())))
        .collect()
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        let request = headers
            .iter()
            .fold(self.client.get(url), |req, (name, value)| req.header(name, value));

        let response = request.send().await?;
        let status = response.status().as_u16();
        let response_headers = lowercase_headers(response.headers());
        let body = response.bytes().await?;

        tracing::trace!("GET {} -> {} ({} bytes)", url, status, body.len());
        Ok(Response::with_headers(status, response_headers, body))
    }
}
