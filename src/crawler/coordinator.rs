//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that walks listing pages in order,
//! fetches every item on each page, and follows the next-page link until
//! there is none or the page limit is reached.

use crate::config::{validate, Config};
use crate::crawler::fetcher::{build_http_client, Fetcher};
use crate::crawler::observer::CrawlObserver;
use crate::crawler::parser::{parse_item, parse_listing_page, Selectors};
use crate::record::Record;
use crate::state::{CrawlPhase, CrawlState, CrawlSummary, StopReason};
use std::sync::Arc;
use std::time::Duration;

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Arc<Config>,
    fetcher: Fetcher,
    selectors: Selectors,
    observer: Arc<dyn CrawlObserver>,
    delay: Duration,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `observer` - Receives progress events for the whole run
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(ScrapeError)` - The configuration is invalid or the HTTP client
    ///   could not be built
    pub fn new(config: Config, observer: Arc<dyn CrawlObserver>) -> crate::Result<Self> {
        validate(&config)?;

        let selectors = Selectors::compile(&config.selectors)?;
        let client = build_http_client(&config.user_agent, config.crawler.timeout())?;
        let fetcher = Fetcher::new(
            client,
            config.crawler.max_retries,
            config.crawler.backoff(),
            observer.clone(),
        );

        Ok(Self {
            delay: config.crawler.delay(),
            config: Arc::new(config),
            fetcher,
            selectors,
            observer,
        })
    }

    /// Runs the crawl loop to completion
    ///
    /// For each listing page:
    /// 1. Fetch the listing page; if it stays unavailable, stop
    /// 2. Extract item links and the next-page link
    /// 3. Fetch and parse each item, pausing `delay` before each one
    /// 4. Pause `delay` once more, then continue with the next page
    ///
    /// Never fails: whatever was collected before the loop stopped is returned,
    /// possibly nothing.
    pub async fn run(&self) -> (Vec<Record>, CrawlSummary) {
        let site = &self.config.site;
        let mut state = CrawlState::new(site.start_url.as_str(), self.config.crawler.max_pages);
        let mut records = Vec::new();
        let mut items_failed = 0;

        let stop_reason = loop {
            let Some(listing_url) = state.next_listing().map(str::to_string) else {
                break state.stop_reason();
            };

            state.enter(CrawlPhase::FetchingListing);
            self.observer
                .on_listing_page(state.pages_visited + 1, &listing_url);

            let html = match self.fetcher.fetch(&listing_url).await {
                Ok(html) => html,
                Err(_) => break StopReason::ListingUnavailable,
            };

            state.enter(CrawlPhase::ParsingListing);
            let listing = parse_listing_page(&html, &site.base_url, &self.selectors);
            self.observer
                .on_items_found(&listing_url, listing.item_urls.len());

            state.enter(CrawlPhase::FetchingItems);
            for item_url in &listing.item_urls {
                tokio::time::sleep(self.delay).await;

                match self.fetcher.fetch(item_url).await {
                    Ok(item_html) => {
                        let record = parse_item(&item_html, item_url, &self.selectors);
                        self.observer.on_record_scraped(&record);
                        records.push(record);
                    }
                    Err(_) => {
                        items_failed += 1;
                        self.observer.on_item_skipped(item_url);
                    }
                }
            }

            state.enter(CrawlPhase::ResolvingNext);
            state.complete_page(listing.next_url);
            tokio::time::sleep(self.delay).await;
        };

        state.enter(CrawlPhase::Done);

        let summary = CrawlSummary {
            pages_visited: state.pages_visited,
            records_collected: records.len(),
            items_failed,
            stop_reason,
        };
        self.observer.on_crawl_complete(&summary);

        (records, summary)
    }
}

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Validate the configuration and compile its selectors
/// 2. Build the HTTP client
/// 3. Walk listing pages and collect one record per item
///
/// # Returns
///
/// * `Ok((records, summary))` - Crawl ran; `records` are in encounter order
/// * `Err(ScrapeError)` - Crawl could not be started
pub async fn run_crawl(
    config: Config,
    observer: Arc<dyn CrawlObserver>,
) -> crate::Result<(Vec<Record>, CrawlSummary)> {
    let coordinator = Coordinator::new(config, observer)?;
    Ok(coordinator.run().await)
}
