//! Crawler module for listing traversal and item extraction
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with retry and backoff
//! - Listing, pagination and item parsing
//! - The sequential crawl loop
//! - Observer hooks through which the crawl reports progress

mod coordinator;
mod fetcher;
mod observer;
mod parser;

pub use coordinator::{run_crawl, Coordinator};
pub use fetcher::{build_http_client, AttemptFailure, FetchError, Fetcher};
pub use observer::{CrawlObserver, TracingObserver};
pub use parser::{
    parse_item, parse_listing, parse_listing_page, parse_next_page, ListingPage, Selectors,
};
