// src/progress.rs
//! Spinner on stderr while a crt.sh query is in flight

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::api::{SearchOptions, search_term};

/// Spinner tied to a single search
///
/// Disabled instances do nothing, so callers never branch on output mode.
pub struct SearchProgress {
    spinner: Option<ProgressBar>,
}

impl SearchProgress {
    /// Start spinning for `domain`, showing the query term actually sent
    pub fn start(enabled: bool, domain: &str, options: &SearchOptions) -> Self {
        if !enabled {
            return Self { spinner: None };
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg} [{elapsed}]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "),
        );
        spinner.set_message(Self::describe(domain, options));
        spinner.enable_steady_tick(Duration::from_millis(120));

        Self {
            spinner: Some(spinner),
        }
    }

    /// `Querying crt.sh for %.example.com (including expired)`
    pub fn describe(domain: &str, options: &SearchOptions) -> String {
        let mut msg = format!("Querying crt.sh for {}", search_term(domain, options));
        if options.include_expired {
            msg.push_str(" (including expired)");
        }
        msg
    }

    /// Clear the spinner once the response is in; `records` is logged at debug
    pub fn finish(&self, records: Option<usize>) {
        if let Some(ref spinner) = self.spinner {
            if let Some(count) = records {
                tracing::debug!("Query finished after {:?} with {} records", spinner.elapsed(), count);
            }
            spinner.finish_and_clear();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.spinner.is_some()
    }
}

impl Drop for SearchProgress {
    fn drop(&mut self) {
        if let Some(ref spinner) = self.spinner {
            spinner.finish_and_clear();
        }
    }
}
