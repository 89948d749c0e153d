//! Listing-Harvest main entry point
//!
//! This is the command-line interface for the Listing-Harvest scraper.

use clap::Parser;
use listing_harvest::config::{load_config_with_hash, Config};
use listing_harvest::crawler::{run_crawl, TracingObserver};
use listing_harvest::output::{export_records, exporters_for, print_statistics};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Listing-Harvest: a paginated listing scraper
///
/// Walks the listing pages of one site, scrapes every linked item page and
/// exports the records to CSV and JSON. Without a config file the built-in
/// defaults are used.
#[derive(Parser, Debug)]
#[command(name = "listing-harvest")]
#[command(version = "1.0.0")]
#[command(about = "A paginated listing scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long, conflicts_with = "no_export")]
    dry_run: bool,

    /// Crawl and print the summary, but do not write CSV/JSON files
    #[arg(long)]
    no_export: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(config, !cli.no_export).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("listing_harvest=info,warn"),
            1 => EnvFilter::new("listing_harvest=debug,info"),
            2 => EnvFilter::new("listing_harvest=trace,debug"),
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

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Listing-Harvest Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  Start URL: {}", config.site.start_url);

    println!("\nCrawler:");
    println!("  Delay: {}ms", config.crawler.delay_ms);
    println!("  Max pages: {}", config.crawler.max_pages);
    println!("  Max retries: {}", config.crawler.max_retries);
    println!("  Timeout: {}s", config.crawler.timeout_secs);
    println!("  User agent: {}", config.user_agent.value);

    println!("\nSelectors:");
    for (name, css) in config.selectors.entries() {
        println!("  {}: {}", name, css);
    }

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path);
    println!("  JSON: {}", config.output.json_path);

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config, export: bool) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Starting crawl at {} (max {} pages)",
        config.site.start_url,
        config.crawler.max_pages
    );

    let exporters = exporters_for(&config.output);

    let (records, _summary) = match run_crawl(config, Arc::new(TracingObserver)).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("Crawl could not start: {}", e);
            return Err(e.into());
        }
    };

    if export {
        export_records(&records, &exporters)?;
    }

    print_statistics(&records);

    Ok(())
}
