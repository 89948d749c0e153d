//! Crawl event observers
//!
//! The crawler never logs directly. Every noteworthy step is reported to an
//! injected [`CrawlObserver`]; [`TracingObserver`] turns those events into
//! `tracing` log lines.

use crate::crawler::fetcher::{AttemptFailure, FetchError};
use crate::record::Record;
use crate::state::{CrawlSummary, StopReason};
use std::time::Duration;

/// Receiver for crawl progress events
///
/// All methods default to doing nothing, so implementors only override the
/// events they care about.
pub trait CrawlObserver: Send + Sync {
    /// A listing page is about to be fetched (`page_number` starts at 1)
    fn on_listing_page(&self, _page_number: u32, _url: &str) {}

    /// A fetch attempt returned a 2xx response with a readable body
    fn on_fetch_succeeded(&self, _url: &str, _attempt: u32) {}

    /// A fetch attempt failed
    fn on_fetch_failed(&self, _url: &str, _attempt: u32, _failure: &AttemptFailure) {}

    /// The fetcher is waiting before retrying `url`
    fn on_backoff(&self, _url: &str, _attempt: u32, _wait: Duration) {}

    /// Every attempt for a URL failed
    fn on_fetch_abandoned(&self, _error: &FetchError) {}

    /// Item links were extracted from a listing page
    fn on_items_found(&self, _listing_url: &str, _count: usize) {}

    /// A record was extracted from an item page
    fn on_record_scraped(&self, _record: &Record) {}

    /// An item page could not be fetched and was skipped
    fn on_item_skipped(&self, _url: &str) {}

    /// The crawl loop finished
    fn on_crawl_complete(&self, _summary: &CrawlSummary) {}
}

/// Observer that writes every event to the `tracing` subscriber
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl CrawlObserver for TracingObserver {
    fn on_listing_page(&self, page_number: u32, url: &str) {
        tracing::info!("Scraping page {}: {}", page_number, url);
    }

    fn on_fetch_succeeded(&self, url: &str, _attempt: u32) {
        tracing::info!("Successfully fetched: {}", url);
    }

    fn on_fetch_failed(&self, url: &str, attempt: u32, failure: &AttemptFailure) {
        tracing::warn!("Attempt {} failed for {}: {}", attempt, url, failure);
    }

    fn on_backoff(&self, url: &str, attempt: u32, wait: Duration) {
        tracing::debug!("Retrying {} in {:?} (after attempt {})", url, wait, attempt);
    }

    fn on_fetch_abandoned(&self, error: &FetchError) {
        tracing::error!("{}", error);
    }

    fn on_items_found(&self, _listing_url: &str, count: usize) {
        tracing::info!("Found {} items on page", count);
    }

    fn on_record_scraped(&self, record: &Record) {
        tracing::info!("Scraped: {}", record.display_title());
    }

    fn on_item_skipped(&self, url: &str) {
        tracing::warn!("Skipping item {}", url);
    }

    fn on_crawl_complete(&self, summary: &CrawlSummary) {
        let reason = match summary.stop_reason {
            StopReason::NoNextPage => "no next page",
            StopReason::PageCapReached => "page limit reached",
            StopReason::ListingUnavailable => "listing page unavailable",
        };
        tracing::info!(
            "Scraping complete. Total items: {} ({} pages, {} items skipped, stopped: {})",
            summary.records_collected,
            summary.pages_visited,
            summary.items_failed,
            reason
        );
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// One recorded observer call
    #[derive(Debug, Clone, PartialEq)]
    pub enum Event {
        ListingPage(u32, String),
        FetchSucceeded(String, u32),
        FetchFailed(String, u32),
        Backoff(String, u32, Duration),
        FetchAbandoned(String, u32),
        ItemsFound(String, usize),
        RecordScraped(String),
        ItemSkipped(String),
        CrawlComplete(CrawlSummary),
    }

    /// Observer that keeps every event for later assertions
    #[derive(Default)]
    pub struct RecordingObserver {
        events: Mutex<Vec<Event>>,
    }

    impl RecordingObserver {
        pub fn events(&self) -> Vec<Event> {
            self.events.lock().unwrap().clone()
        }

        fn push(&self, event: Event) {
            self.events.lock().unwrap().push(event);
        }
    }

    impl CrawlObserver for RecordingObserver {
        fn on_listing_page(&self, page_number: u32, url: &str) {
            self.push(Event::ListingPage(page_number, url.to_string()));
        }

        fn on_fetch_succeeded(&self, url: &str, attempt: u32) {
            self.push(Event::FetchSucceeded(url.to_string(), attempt));
        }

        fn on_fetch_failed(&self, url: &str, attempt: u32, _failure: &AttemptFailure) {
            self.push(Event::FetchFailed(url.to_string(), attempt));
        }

        fn on_backoff(&self, url: &str, attempt: u32, wait: Duration) {
            self.push(Event::Backoff(url.to_string(), attempt, wait));
        }

        fn on_fetch_abandoned(&self, error: &FetchError) {
            self.push(Event::FetchAbandoned(error.url.clone(), error.attempts));
        }

        fn on_items_found(&self, listing_url: &str, count: usize) {
            self.push(Event::ItemsFound(listing_url.to_string(), count));
        }

        fn on_record_scraped(&self, record: &Record) {
            self.push(Event::RecordScraped(record.url.clone()));
        }

        fn on_item_skipped(&self, url: &str) {
            self.push(Event::ItemSkipped(url.to_string()));
        }

        fn on_crawl_complete(&self, summary: &CrawlSummary) {
            self.push(Event::CrawlComplete(summary.clone()));
        }
    }
}
