// src/output/human.rs
//! Human-readable colored terminal output

use crate::api::CertificateRecord;
use crate::output::{OutputHandler, stdout_writer};
use anyhow::anyhow;
use async_trait::async_trait;
use colored::Colorize;
use std::io::Write;
use std::sync::Mutex;

/// Human-readable output handler with colored terminal output
pub struct HumanOutput {
    writer: Mutex<Box<dyn Write + Send>>,
    use_colors: bool,
}

impl HumanOutput {
    /// Create a new HumanOutput that writes to stdout
    pub fn new() -> Self {
        Self {
            writer: Mutex::new(stdout_writer()),
            use_colors: is_terminal::is_terminal(std::io::stdout()),
        }
    }

    /// Create a new HumanOutput that writes to a file
    pub fn to_file(file: std::fs::File) -> Self {
        Self {
            writer: Mutex::new(Box::new(file)),
            use_colors: false, // No colors when writing to file
        }
    }

    /// crt.sh timestamps look like `2024-05-01T09:00:00`; show them with a space
    fn format_timestamp(ts: &str) -> String {
        if ts.is_empty() {
            "-".to_string()
        } else {
            ts.replacen('T', " ", 1)
        }
    }
}

impl Default for HumanOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OutputHandler for HumanOutput {
    async fn emit_record(&self, record: &CertificateRecord) -> anyhow::Result<()> {
        let mut writer = self.writer.lock().map_err(|_| anyhow!("output writer poisoned"))?;

        let validity = format!(
            "{} -> {}",
            Self::format_timestamp(&record.not_before),
            Self::format_timestamp(&record.not_after)
        );
        let names = record.names().collect::<Vec<_>>().join(", ");

        if self.use_colors {
            writeln!(
                writer,
                "{} {}",
                format!("[{}]", record.id).dimmed(),
                record.common_name.cyan().bold()
            )?;
            writeln!(writer, "    {} {}", "Issuer:".dimmed(), record.issuer_name.yellow())?;
            writeln!(writer, "    {} {}", "Valid:".dimmed(), validity)?;
            if !names.is_empty() {
                writeln!(writer, "    {} {}", "Names:".dimmed(), names)?;
            }
        } else {
            writeln!(writer, "[{}] {}", record.id, record.common_name)?;
            writeln!(writer, "    Issuer: {}", record.issuer_name)?;
            writeln!(writer, "    Valid: {}", validity)?;
            if !names.is_empty() {
                writeln!(writer, "    Names: {}", names)?;
            }
        }

        Ok(())
    }

    async fn emit_summary(&self, summary: &str) -> anyhow::Result<()> {
        let mut writer = self.writer.lock().map_err(|_| anyhow!("output writer poisoned"))?;

        if self.use_colors {
            writeln!(writer, "{}", summary.green().bold())?;
        } else {
            writeln!(writer, "{}", summary)?;
        }

        Ok(())
    }

    async fn flush(&self) -> anyhow::Result<()> {
        let mut writer = self.writer.lock().map_err(|_| anyhow!("output writer poisoned"))?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::{read_back, sample_record};
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_human_output() {
        let temp = NamedTempFile::new().unwrap();
        let handler = HumanOutput::to_file(temp.reopen().unwrap());

        handler.emit_record(&sample_record(123)).await.unwrap();
        handler
            .emit_summary("Found 1 certificates for example.com")
            .await
            .unwrap();
        handler.flush().await.unwrap();

        let contents = read_back(&temp);
        assert!(contents.starts_with("[123] example.com\n"));
        assert!(contents.contains("    Issuer: C=US, O=Let's Encrypt, CN=R3\n"));
        assert!(contents.contains("    Valid: 2024-05-01 09:00:00 -> 2024-07-30 09:00:00\n"));
        assert!(contents.contains("    Names: example.com, www.example.com\n"));
        assert!(contents.ends_with("Found 1 certificates for example.com\n"));
    }

    #[tokio::test]
    async fn test_human_output_sparse_record() {
        let temp = NamedTempFile::new().unwrap();
        let handler = HumanOutput::to_file(temp.reopen().unwrap());

        let record = CertificateRecord {
            id: 9,
            ..Default::default()
        };
        handler.emit_record(&record).await.unwrap();
        handler.flush().await.unwrap();

        let contents = read_back(&temp);
        assert!(contents.contains("Valid: - -> -"));
        assert!(!contents.contains("Names:"));
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(
            HumanOutput::format_timestamp("2024-01-30T19:22:50.288"),
            "2024-01-30 19:22:50.288"
        );
        assert_eq!(HumanOutput::format_timestamp(""), "-");
    }
}
