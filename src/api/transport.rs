// src/api/transport.rs
//! HTTP transport seam used by the search client

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use std::time::Duration;
use url::Url;

use super::error::{BoxError, SearchError};

/// Default request timeout for the bundled transport
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Status and raw body of a completed GET
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Anything that can perform an HTTP GET
///
/// Implementations must be safe to share between concurrent searches.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issue a GET for `url` with the given headers and read the full body
    async fn get(&self, url: Url, headers: HeaderMap) -> Result<HttpResponse, BoxError>;
}

/// reqwest-backed transport
///
/// `reqwest::Client` pools connections internally and is cheap to clone.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http_client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport with the given request timeout
    pub fn new(timeout: Duration) -> Result<Self, SearchError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .gzip(true)
            .build()
            .map_err(|e| SearchError::RequestConstruction(format!("HTTP client: {}", e)))?;

        Ok(Self { http_client })
    }

    /// Wrap an already configured reqwest client (proxies, custom TLS, ...)
    pub fn from_client(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }
}

impl From<reqwest::Client> for ReqwestTransport {
    fn from(http_client: reqwest::Client) -> Self {
        Self::from_client(http_client)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: Url, headers: HeaderMap) -> Result<HttpResponse, BoxError> {
        let response = self.http_client.get(url).headers(headers).send().await?;
        let status = response.status();
        let body = response.text().await?;

        Ok(HttpResponse { status, body })
    }
}
