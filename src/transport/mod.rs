//! HTTP transport used by the provider adapters.
//!
//! Adapters only need one operation: an authenticated GET returning the status
//! code and the raw body. Keeping that behind [`HttpTransport`] lets the
//! adapters be exercised against a mock server or a mock transport.

use std::time::Duration;

use async_trait::async_trait;
use http::{HeaderMap, StatusCode};
use reqwest::Client;
use url::Url;

use crate::error::GatewayError;

/// `User-Agent` sent with every provider request. GitHub rejects requests
/// without one.
pub const USER_AGENT: &str = concat!("repobridge/", env!("CARGO_PKG_VERSION"));

/// Default upper bound on a single provider request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// An outbound GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Absolute endpoint URL.
    pub url: Url,
    /// Request headers, including authentication.
    pub headers: HeaderMap,
    /// Query parameters, appended in order.
    pub query: Vec<(String, String)>,
}

/// A provider response with its body read to text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Response status.
    pub status: StatusCode,
    /// Response body text.
    pub body: String,
}

/// Transport that can perform a GET request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Performs the request and returns the status and body.
    ///
    /// Non-success statuses are returned as `Ok`; only transport failures are
    /// errors.
    async fn get(&self, request: &HttpRequest) -> Result<HttpResponse, GatewayError>;
}

/// reqwest-backed transport sharing one connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Builds a transport whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Configuration`] when the HTTP client cannot be
    /// constructed (for example when no TLS backend is available).
    pub fn new(timeout: Duration) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|error| GatewayError::Configuration {
                message: format!("failed to configure HTTP client: {error}"),
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, request: &HttpRequest) -> Result<HttpResponse, GatewayError> {
        tracing::debug!(url = %request.url, query = ?request.query, "sending provider request");

        let response = self
            .client
            .get(request.url.clone())
            .headers(request.headers.clone())
            .query(&request.query)
            .send()
            .await
            .map_err(|error| GatewayError::Network {
                message: format!("GET {} failed: {error}", request.url),
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|error| GatewayError::Network {
                message: format!("reading response from {} failed: {error}", request.url),
            })?;

        Ok(HttpResponse { status, body })
    }
}
