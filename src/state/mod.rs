//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlPhase`: where the loop is within the current listing page
//! - `CrawlState`: current listing URL and pages visited, owned by the coordinator
//! - `CrawlSummary`: counters reported once the crawl has stopped

mod crawl_phase;
mod crawl_state;

// Re-export main types
pub use crawl_phase::CrawlPhase;
pub use crawl_state::{CrawlState, CrawlSummary, StopReason};
