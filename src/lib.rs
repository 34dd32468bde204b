// src/lib.rs
// Library interface for crtsh
pub mod api;
pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

pub use api::{CertificateRecord, CrtShClient, SearchError, SearchOptions};
