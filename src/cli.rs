// src/cli.rs
use clap::Parser;

/// Default config file, silently skipped when absent
pub const DEFAULT_CONFIG_PATH: &str = "crtsh.toml";

/// crtsh: Certificate Transparency search
///
/// Query crt.sh for certificates issued to a domain.
#[derive(Parser, Debug, Clone)]
#[command(name = "crtsh")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Domain to search, e.g. example.com, %.example.com or *.example.com
    pub domain: String,

    // ===== Search =====
    /// Match the domain and all of its subdomains
    #[arg(short = 'w', long = "wildcard")]
    pub wildcard: bool,

    /// Include expired certificates
    #[arg(short = 'e', long = "expired")]
    pub expired: bool,

    // ===== Input & Configuration =====
    /// Path to TOML config file
    #[arg(short = 'c', long = "config")]
    pub config: Option<String>,

    /// Override the crt.sh endpoint
    #[arg(long = "base-url")]
    pub base_url: Option<String>,

    /// Override the request timeout in seconds
    #[arg(long = "timeout")]
    pub timeout: Option<u64>,

    // ===== Output Format =====
    /// Output records in JSONL format
    #[arg(short = 'j', long = "json")]
    pub json: bool,

    /// Output records in CSV format
    #[arg(long = "csv")]
    pub csv: bool,

    /// Print only the number of records found
    #[arg(long = "count")]
    pub count: bool,

    /// Write output to file instead of stdout
    #[arg(short = 'o', long = "output")]
    pub output: Option<String>,

    // ===== Display =====
    /// Disable progress indicator
    #[arg(long = "no-progress")]
    pub no_progress: bool,

    // ===== Logging =====
    /// Verbose logging (set log level to debug)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Quiet logging (set log level to warn)
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

impl Cli {
    /// Validate flag combinations and return errors for invalid usage
    pub fn validate(&self) -> anyhow::Result<()> {
        let format_count = [self.json, self.csv, self.count]
            .iter()
            .filter(|&&x| x)
            .count();

        if format_count > 1 {
            anyhow::bail!(
                "Cannot specify multiple output formats. \
                Choose one of: --json, --csv, or --count"
            );
        }

        if self.verbose && self.quiet {
            anyhow::bail!("Cannot specify both --verbose and --quiet");
        }

        if self.timeout == Some(0) {
            anyhow::bail!("--timeout must be greater than 0");
        }

        Ok(())
    }

    /// Determine the output format based on flags
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else if self.csv {
            OutputFormat::Csv
        } else if self.count {
            OutputFormat::Count
        } else {
            OutputFormat::Human
        }
    }

    /// Spinner only makes sense for human output on stdout
    pub fn should_show_progress(&self) -> bool {
        !self.no_progress && self.output_format() == OutputFormat::Human && self.output.is_none()
    }

    /// Log level forced by flags, if any
    pub fn log_level(&self) -> Option<&str> {
        if self.verbose {
            Some("debug")
        } else if self.quiet {
            Some("warn")
        } else {
            None
        }
    }

    /// Config file path and whether it was given explicitly
    pub fn config_path(&self) -> (&str, bool) {
        match self.config {
            Some(ref path) => (path.as_str(), true),
            None => (DEFAULT_CONFIG_PATH, false),
        }
    }
}

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable colored text output (default)
    Human,
    /// JSON Lines format (one record per line)
    Json,
    /// CSV format
    Csv,
    /// Record count only
    Count,
}
