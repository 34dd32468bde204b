// src/output/csv.rs
//! CSV output handler

use crate::api::CertificateRecord;
use crate::output::{OutputHandler, stdout_writer};
use anyhow::anyhow;
use async_trait::async_trait;
use std::io::Write;
use std::sync::Mutex;

/// CSV output handler
///
/// The header row comes from the record's field names and is written
/// with the first record. Multi-name `name_value` cells are quoted by the
/// csv writer.
pub struct CsvOutput {
    writer: Mutex<csv::Writer<Box<dyn Write + Send>>>,
}

impl CsvOutput {
    /// Create a new CsvOutput that writes to stdout
    pub fn new() -> Self {
        Self::from_writer(stdout_writer())
    }

    /// Create a new CsvOutput that writes to a file
    pub fn to_file(file: std::fs::File) -> Self {
        Self::from_writer(Box::new(file))
    }

    fn from_writer(inner: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(csv::Writer::from_writer(inner)),
        }
    }
}

impl Default for CsvOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OutputHandler for CsvOutput {
    async fn emit_record(&self, record: &CertificateRecord) -> anyhow::Result<()> {
        let mut writer = self.writer.lock().map_err(|_| anyhow!("output writer poisoned"))?;
        writer.serialize(record)?;
        Ok(())
    }

    async fn flush(&self) -> anyhow::Result<()> {
        let mut writer = self.writer.lock().map_err(|_| anyhow!("output writer poisoned"))?;
        writer.flush()?;
        Ok(())
    }
}
