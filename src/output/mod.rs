// src/output/mod.rs
//! Output handling for search results
//!
//! Each handler renders certificate records in one format to stdout or a
//! file. Handlers are driven record by record, then flushed once.

use crate::api::{CertificateRecord, SearchOptions, needs_wildcard_prefix};
use crate::cli::OutputFormat;
use async_trait::async_trait;
use std::io::{self, Write};

pub mod count;
pub mod csv;
pub mod human;
pub mod json;

/// Trait for output handlers that render certificate records
#[async_trait]
pub trait OutputHandler: Send + Sync {
    /// Emit a single record
    async fn emit_record(&self, record: &CertificateRecord) -> anyhow::Result<()>;

    /// Emit a one-line summary after all records; ignored by machine formats
    async fn emit_summary(&self, _summary: &str) -> anyhow::Result<()> {
        Ok(())
    }

    /// Flush any buffered output
    async fn flush(&self) -> anyhow::Result<()>;
}

/// Emit every record in service order, then the summary, then flush
pub async fn emit_all(
    handler: &dyn OutputHandler,
    records: &[CertificateRecord],
    summary: &str,
) -> anyhow::Result<()> {
    for record in records {
        handler.emit_record(record).await?;
    }
    handler.emit_summary(summary).await?;
    handler.flush().await
}

/// Build the handler for `format`, writing to `file` when given
pub fn handler_for(
    format: OutputFormat,
    file: Option<std::fs::File>,
) -> Box<dyn OutputHandler> {
    match (format, file) {
        (OutputFormat::Human, Some(file)) => Box::new(human::HumanOutput::to_file(file)),
        (OutputFormat::Human, None) => Box::new(human::HumanOutput::new()),
        (OutputFormat::Json, Some(file)) => Box::new(json::JsonOutput::to_file(file)),
        (OutputFormat::Json, None) => Box::new(json::JsonOutput::new()),
        (OutputFormat::Csv, Some(file)) => Box::new(csv::CsvOutput::to_file(file)),
        (OutputFormat::Csv, None) => Box::new(csv::CsvOutput::new()),
        (OutputFormat::Count, Some(file)) => Box::new(count::CountOutput::to_file(file)),
        (OutputFormat::Count, None) => Box::new(count::CountOutput::new()),
    }
}

/// Summary printed after human output, e.g. `Found 33 certificates for example.com`
pub fn summary_line(domain: &str, options: &SearchOptions, count: usize) -> String {
    let target = if options.wildcard && needs_wildcard_prefix(domain) {
        format!("*.{}", domain)
    } else {
        domain.to_string()
    };

    let mut line = format!("Found {} certificates for {}", count, target);
    if options.include_expired {
        line.push_str(" (including expired)");
    }
    line
}

pub(crate) fn stdout_writer() -> Box<dyn Write + Send> {
    Box::new(io::stdout())
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::api::CertificateRecord;
    use std::io::Read;
    use tempfile::NamedTempFile;

    pub fn sample_record(id: i64) -> CertificateRecord {
        CertificateRecord {
            issuer_ca_id: 183267,
            issuer_name: "C=US, O=Let's Encrypt, CN=R3".to_string(),
            common_name: "example.com".to_string(),
            name_value: "example.com\nwww.example.com".to_string(),
            id,
            entry_timestamp: "2024-05-01T10:00:00.123".to_string(),
            not_before: "2024-05-01T09:00:00".to_string(),
            not_after: "2024-07-30T09:00:00".to_string(),
            serial_number: "04a1b2c3".to_string(),
            result_count: 2,
        }
    }

    pub fn read_back(temp: &NamedTempFile) -> String {
        let mut contents = String::new();
        temp.reopen().unwrap().read_to_string(&mut contents).unwrap();
        contents
    }
}
