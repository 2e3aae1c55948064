//! Portal-Import main entry point
//!
//! This is the command-line interface for the portal's news and events
//! importer.

use anyhow::Context;
use clap::Parser;
use portal_import::config::{load_config_with_hash, Config};
use portal_import::fetch::PageFetcher;
use portal_import::import::{ImportOptions, Importer};
use portal_import::storage::SqliteStore;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Portal-Import: pull news and events from the university site
///
/// Scrapes the configured source's news and events listings, extracts a
/// bounded body and a date from each detail page, and inserts the records
/// into the portal's database. Records are keyed by title: re-running the
/// importer never duplicates or overwrites existing entries.
#[derive(Parser, Debug)]
#[command(name = "portal-import")]
#[command(version = "1.0.0")]
#[command(about = "News and events importer for the student portal", long_about = None)]
struct Cli {
    /// Maximum news records to import (config default: 10)
    #[arg(long, value_name = "COUNT")]
    news: Option<usize>,

    /// Maximum event records to import (config default: 10)
    #[arg(long, value_name = "COUNT")]
    events: Option<usize>,

    /// Purge previously imported records before importing
    #[arg(long)]
    clear: bool,

    /// Path to TOML configuration file (built-in defaults if omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No config file given, using built-in rea.ru defaults");
            Config::default()
        }
    };

    let opts = ImportOptions {
        news_limit: cli.news.unwrap_or(config.import.default_news_limit),
        events_limit: cli.events.unwrap_or(config.import.default_events_limit),
        clear: cli.clear,
    };

    tracing::info!(
        "Importing up to {} news and {} events from {}",
        opts.news_limit,
        opts.events_limit,
        config.source.base_url
    );

    let fetcher = PageFetcher::new(&config.http).context("failed to build HTTP client")?;
    let mut store = SqliteStore::new(Path::new(&config.output.database_path))
        .with_context(|| format!("failed to open {}", config.output.database_path))?;

    let mut importer = Importer::new(&config, &fetcher, &mut store);
    let summary = importer.run(&opts).await.context("import run failed")?;

    println!(
        "Import finished: {} news added, {} events added.",
        summary.news_created, summary.events_created
    );

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("portal_import=info,warn"),
            1 => EnvFilter::new("portal_import=debug,info"),
            2 => EnvFilter::new("portal_import=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
