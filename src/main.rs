//! Shelfwatch main entry point
//!
//! This is the command-line interface for the Shelfwatch price watcher.

use anyhow::Context;
use clap::Parser;
use shelfwatch::api::{ScrapeRequest, ScrapeService};
use shelfwatch::config::{load_config_with_hash, Config, NotificationConfig, NotificationSink};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Shelfwatch: a product-listing price watcher
///
/// Shelfwatch walks a shop's listing pages, extracts every product, records
/// which prices changed since the last run, and stores the dataset when
/// anything changed.
#[derive(Parser, Debug)]
#[command(name = "shelfwatch")]
#[command(version)]
#[command(about = "A product-listing price watcher", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Number of listing pages to scrape, starting at page 1
    #[arg(short, long, required_unless_present = "dry_run")]
    pages: Option<u32>,

    /// Access token; must match the configured token
    #[arg(short, long, required_unless_present = "dry_run")]
    token: Option<String>,

    /// Outbound proxy for this run (overrides the configured proxy)
    #[arg(long)]
    proxy: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show the resolved settings without scraping
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if !cli.dry_run && keep_stdout_for_response(&mut config.notification) {
        tracing::debug!("Console notifications routed to the log; stdout carries the response");
    }

    let service = ScrapeService::from_config(&config).context("failed to open backends")?;

    if cli.dry_run {
        return handle_dry_run(&config, &service);
    }

    let (Some(pages), Some(token)) = (cli.pages, cli.token) else {
        anyhow::bail!("--pages and --token are required");
    };

    let mut request = ScrapeRequest::new(pages);
    if let Some(proxy) = cli.proxy {
        request = request.with_proxy(proxy);
    }

    let response = service
        .start_scrape(&token, request)
        .await
        .context("scrape failed")?;

    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}

/// Sets up the tracing subscriber
///
/// `RUST_LOG` wins when set; otherwise the level follows `-v`/`--quiet`.
/// Logs go to stderr so stdout carries only the run result.
fn setup_logging(verbose: u8, quiet: bool) {
    let directives = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "shelfwatch=info,warn",
        (false, 1) => "shelfwatch=debug,info",
        (false, 2) => "shelfwatch=trace,debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Moves console notifications to the log sink
///
/// The binary prints the JSON response on stdout, and the console sink would
/// print the same summary there first. Returns true when the sink changed.
fn keep_stdout_for_response(notification: &mut NotificationConfig) -> bool {
    if notification.sink == NotificationSink::Console {
        notification.sink = NotificationSink::Log;
        true
    } else {
        false
    }
}

/// Handles the --dry-run mode: shows resolved settings and backend state
fn handle_dry_run(config: &Config, service: &ScrapeService) -> anyhow::Result<()> {
    println!("=== Shelfwatch Dry Run ===\n");

    println!("Scraper:");
    println!("  Base URL: {}", config.scraper.base_url);
    println!("  Timeout: {}s", config.scraper.timeout_secs);
    println!(
        "  Retries: {} attempts, {}s apart",
        config.scraper.max_attempts, config.scraper.retry_delay_secs
    );
    println!(
        "  Concurrent pages: {}",
        config.scraper.max_concurrent_pages
    );
    println!(
        "  Proxy: {}",
        config.scraper.proxy.as_deref().unwrap_or("none")
    );

    let stored = service.coordinator().storage().load()?;
    println!("\nStorage ({:?}):", config.storage.backend);
    if let Some(path) = &config.storage.path {
        println!("  Path: {}", path);
    }
    println!("  Stored records: {}", stored.len());

    let cached = service.coordinator().cache().entry_count()?;
    println!("\nPrice cache ({:?}):", config.cache.backend);
    if let Some(path) = &config.cache.path {
        println!("  Path: {}", path);
    }
    println!("  Cached prices: {}", cached);

    println!("\nNotification sink: {:?}", config.notification.sink);

    println!("\n✓ Configuration is valid");
    Ok(())
}
