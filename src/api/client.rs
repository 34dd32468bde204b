// src/api/client.rs
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT as USER_AGENT_HEADER};
use std::borrow::Cow;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

use super::error::SearchError;
use super::transport::{DEFAULT_TIMEOUT, HttpTransport, ReqwestTransport};
use super::types::{CertificateRecord, SearchOptions};

/// Public crt.sh endpoint
pub const BASE_URL: &str = "https://crt.sh";

/// User-Agent sent with every request
pub const USER_AGENT: &str = concat!("crtsh-rs/", env!("CARGO_PKG_VERSION"));

/// Client for the crt.sh certificate search API
///
/// Holds no per-call state, so a single instance can serve concurrent
/// searches. Clones share the same transport.
#[derive(Clone)]
pub struct CrtShClient {
    base_url: String,
    transport: Arc<dyn HttpTransport>,
}

impl CrtShClient {
    /// Create a client backed by reqwest with a 30 second timeout
    pub fn new() -> Result<Self, SearchError> {
        let transport = ReqwestTransport::new(DEFAULT_TIMEOUT)?;
        Ok(Self::with_transport(transport))
    }

    /// Create a client with a caller-supplied transport
    pub fn with_transport<T>(transport: T) -> Self
    where
        T: HttpTransport + 'static,
    {
        Self {
            base_url: BASE_URL.to_string(),
            transport: Arc::new(transport),
        }
    }

    /// Point the client at another endpoint (mirror, local stub)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search certificates for `domain`
    ///
    /// `None` options mean defaults: expired certificates excluded, exact
    /// match. Performs exactly one request. Returns [`SearchError::Cancelled`]
    /// if `cancel` fires before the response body has been read.
    pub async fn search(
        &self,
        cancel: &CancellationToken,
        domain: &str,
        options: Option<&SearchOptions>,
    ) -> Result<Vec<CertificateRecord>, SearchError> {
        validate_domain(domain)?;

        let options = options.copied().unwrap_or_default();
        let term = search_term(domain, &options);
        let url = build_url(&self.base_url, &term, &options)?;

        if cancel.is_cancelled() {
            return Err(SearchError::Cancelled);
        }

        debug!("Querying crt.sh: {}", url);

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Search for {} cancelled", domain);
                return Err(SearchError::Cancelled);
            }
            result = self.transport.get(url, request_headers()) => {
                result.map_err(SearchError::Transport)?
            }
        };

        if !response.status.is_success() {
            warn!("crt.sh returned {} for {}", response.status, term);
            return Err(SearchError::Service {
                status: response.status,
                body: response.body,
            });
        }

        let records = decode_records(&response.body)?;

        debug!("Received {} records for {}", records.len(), term);

        Ok(records)
    }

    /// Search with default options
    pub async fn basic_search(
        &self,
        cancel: &CancellationToken,
        domain: &str,
    ) -> Result<Vec<CertificateRecord>, SearchError> {
        self.search(cancel, domain, None).await
    }

    /// Search the domain and all of its subdomains
    pub async fn search_with_wildcard(
        &self,
        cancel: &CancellationToken,
        domain: &str,
        include_expired: bool,
    ) -> Result<Vec<CertificateRecord>, SearchError> {
        let options = SearchOptions {
            include_expired,
            wildcard: true,
        };
        self.search(cancel, domain, Some(&options)).await
    }
}

/// Reject domains crt.sh cannot meaningfully match
pub fn validate_domain(domain: &str) -> Result<(), SearchError> {
    if domain.is_empty() {
        return Err(SearchError::InvalidInput(
            "domain cannot be empty".to_string(),
        ));
    }

    if domain.chars().any(char::is_whitespace)
        || domain.starts_with('.')
        || domain.ends_with('.')
    {
        return Err(SearchError::InvalidInput(format!(
            "invalid domain format: {:?}",
            domain
        )));
    }

    Ok(())
}

/// A domain without a `%` or `*.` marker gets `%.` in wildcard mode
pub fn needs_wildcard_prefix(domain: &str) -> bool {
    !domain.contains('%') && !domain.starts_with("*.")
}

/// Value sent as `q`
pub fn search_term<'a>(domain: &'a str, options: &SearchOptions) -> Cow<'a, str> {
    if options.wildcard && needs_wildcard_prefix(domain) {
        Cow::Owned(format!("%.{}", domain))
    } else {
        Cow::Borrowed(domain)
    }
}

/// Build the query URL; parameters are appended in key order
pub fn build_url(base_url: &str, term: &str, options: &SearchOptions) -> Result<Url, SearchError> {
    let mut url = Url::parse(base_url).map_err(|e| {
        SearchError::RequestConstruction(format!("invalid base URL {:?}: {}", base_url, e))
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(SearchError::RequestConstruction(format!(
            "unsupported base URL scheme: {}",
            url.scheme()
        )));
    }

    {
        let mut query = url.query_pairs_mut();
        query.clear();
        if !options.include_expired {
            query.append_pair("exclude", "expired");
        }
        query.append_pair("output", "json");
        query.append_pair("q", term);
    }

    Ok(url)
}

fn request_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT_HEADER, HeaderValue::from_static(USER_AGENT));
    headers
}

/// crt.sh answers no-match queries with an empty body or `[]`
fn decode_records(body: &str) -> Result<Vec<CertificateRecord>, SearchError> {
    if body.is_empty() || body == "[]" {
        return Ok(Vec::new());
    }

    Ok(serde_json::from_str(body)?)
}
