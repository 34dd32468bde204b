// src/main.rs
use anyhow::Context;
use clap::Parser;
use crtsh::api::{CrtShClient, ReqwestTransport};
use crtsh::cli::Cli;
use crtsh::config::Config;
use crtsh::output;
use crtsh::progress::SearchProgress;
use std::path::Path;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Validate arguments
    cli.validate()?;

    // Load config file; the implicit default path may be absent
    let (config_path, explicit) = cli.config_path();
    let mut config = if explicit {
        Config::from_file(Path::new(config_path))?
    } else {
        Config::from_file_or_default(Path::new(config_path))?
    };

    // Apply CLI overrides
    if let Some(ref url) = cli.base_url {
        config.client.base_url = url.clone();
    }

    if let Some(timeout) = cli.timeout {
        config.client.timeout_secs = timeout;
    }

    if cli.expired {
        config.search.include_expired = true;
    }

    if cli.wildcard {
        config.search.wildcard = true;
    }

    config.validate()?;

    // Initialize logging on stderr so stdout only carries results
    let log_level = cli.log_level().unwrap_or(&config.logging.level);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(
        "Using endpoint {} (timeout {}s)",
        config.client.base_url,
        config.client.timeout_secs
    );

    let transport = ReqwestTransport::new(Duration::from_secs(config.client.timeout_secs))?;
    let client = CrtShClient::with_transport(transport).with_base_url(config.client.base_url.clone());

    // Ctrl-C cancels the in-flight search
    let cancel = CancellationToken::new();
    let ctrl_c_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, cancelling search");
            ctrl_c_token.cancel();
        }
    });

    let progress = SearchProgress::start(
        cli.should_show_progress() && is_terminal::is_terminal(std::io::stderr()),
        &cli.domain,
        &config.search,
    );

    let result = client
        .search(&cancel, &cli.domain, Some(&config.search))
        .await;
    progress.finish(result.as_ref().ok().map(Vec::len));

    let records = result.with_context(|| format!("Search for {} failed", cli.domain))?;
    tracing::info!("Found {} records for {}", records.len(), cli.domain);

    // Create output handler
    let file = cli
        .output
        .as_ref()
        .map(|path| {
            std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file {}", path))
        })
        .transpose()?;

    if let Some(ref path) = cli.output {
        tracing::info!("Writing output to: {}", path);
    }

    let handler = output::handler_for(cli.output_format(), file);

    let summary = output::summary_line(&cli.domain, &config.search, records.len());
    output::emit_all(handler.as_ref(), &records, &summary).await?;

    Ok(())
}
