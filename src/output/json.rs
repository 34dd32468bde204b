// src/output/json.rs
//! JSON Lines (JSONL) output handler

use crate::api::CertificateRecord;
use crate::output::{OutputHandler, stdout_writer};
use anyhow::anyhow;
use async_trait::async_trait;
use std::io::Write;
use std::sync::Mutex;

/// JSON Lines output handler
///
/// Outputs one record per line using the same keys crt.sh returns
pub struct JsonOutput {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonOutput {
    /// Create a new JsonOutput that writes to stdout
    pub fn new() -> Self {
        Self {
            writer: Mutex::new(stdout_writer()),
        }
    }

    /// Create a new JsonOutput that writes to a file
    pub fn to_file(file: std::fs::File) -> Self {
        Self {
            writer: Mutex::new(Box::new(file)),
        }
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OutputHandler for JsonOutput {
    async fn emit_record(&self, record: &CertificateRecord) -> anyhow::Result<()> {
        let mut writer = self.writer.lock().map_err(|_| anyhow!("output writer poisoned"))?;

        let json = serde_json::to_string(record)?;
        writeln!(writer, "{}", json)?;

        Ok(())
    }

    async fn flush(&self) -> anyhow::Result<()> {
        let mut writer = self.writer.lock().map_err(|_| anyhow!("output writer poisoned"))?;
        writer.flush()?;
        Ok(())
    }
}
