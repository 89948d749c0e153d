//! Listing-Harvest: a paginated listing scraper
//!
//! This crate walks the listing pages of a single site, follows every item link
//! to its detail page, extracts a fixed set of fields per item, and exports the
//! collected records to CSV and JSON.

pub mod config;
pub mod crawler;
pub mod output;
pub mod record;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Listing-Harvest operations
///
/// The crawl loop itself never fails; these errors come from setting up a
/// crawl or writing its results.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),
}

/// Result type alias for Listing-Harvest operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_crawl, Coordinator, CrawlObserver, TracingObserver};
pub use record::Record;
pub use state::{CrawlPhase, CrawlState, CrawlSummary, StopReason};
pub use crate::url::resolve_link;
