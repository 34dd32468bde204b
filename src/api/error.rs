// src/api/error.rs
//! Error classification for crt.sh searches

use reqwest::StatusCode;
use thiserror::Error;

/// Boxed error produced by a transport implementation
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by [`CrtShClient`](super::CrtShClient) searches
#[derive(Error, Debug)]
pub enum SearchError {
    /// The domain failed local validation; nothing was sent
    #[error("invalid domain: {0}")]
    InvalidInput(String),

    /// The request URL or HTTP client could not be built
    #[error("failed to build request: {0}")]
    RequestConstruction(String),

    /// The network call itself failed (DNS, connect, TLS, timeout)
    #[error("failed to execute request: {0}")]
    Transport(#[source] BoxError),

    /// The caller's cancellation token fired before the response arrived
    #[error("search cancelled")]
    Cancelled,

    /// The service answered with a non-success status
    #[error("API request failed with status {status}: {body}")]
    Service { status: StatusCode, body: String },

    /// The response body was not a JSON array of certificate records
    #[error("failed to parse JSON response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SearchError {
    /// The input needs fixing; retrying the same call cannot succeed
    pub fn is_input_error(&self) -> bool {
        matches!(self, SearchError::InvalidInput(_))
    }

    /// Failures that may go away on a later attempt
    ///
    /// The client never retries on its own.
    pub fn is_transient(&self) -> bool {
        match self {
            SearchError::Transport(_) => true,
            SearchError::Service { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            _ => false,
        }
    }

    /// HTTP status for service errors
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            SearchError::Service { status, .. } => Some(*status),
            _ => None,
        }
    }
}
