// src/api/mod.rs
pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::{BASE_URL, CrtShClient, USER_AGENT, build_url, needs_wildcard_prefix, search_term, validate_domain};
pub use error::{BoxError, SearchError};
pub use transport::{DEFAULT_TIMEOUT, HttpResponse, HttpTransport, ReqwestTransport};
pub use types::{CertificateRecord, SearchOptions};
