// src/output/count.rs
//! Count-only output handler

use crate::api::CertificateRecord;
use crate::output::{OutputHandler, stdout_writer};
use anyhow::anyhow;
use async_trait::async_trait;
use std::io::Write;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Prints the number of records on flush, nothing else
pub struct CountOutput {
    writer: Mutex<Box<dyn Write + Send>>,
    count: AtomicUsize,
}

impl CountOutput {
    /// Create a new CountOutput that writes to stdout
    pub fn new() -> Self {
        Self {
            writer: Mutex::new(stdout_writer()),
            count: AtomicUsize::new(0),
        }
    }

    /// Create a new CountOutput that writes to a file
    pub fn to_file(file: std::fs::File) -> Self {
        Self {
            writer: Mutex::new(Box::new(file)),
            count: AtomicUsize::new(0),
        }
    }
}

impl Default for CountOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OutputHandler for CountOutput {
    async fn emit_record(&self, _record: &CertificateRecord) -> anyhow::Result<()> {
        self.count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    async fn flush(&self) -> anyhow::Result<()> {
        let mut writer = self.writer.lock().map_err(|_| anyhow!("output writer poisoned"))?;
        writeln!(writer, "{}", self.count.load(Ordering::Relaxed))?;
        writer.flush()?;
        Ok(())
    }
}
