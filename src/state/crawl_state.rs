use crate::state::CrawlPhase;

/// Why a crawl stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The last listing page had no next-page link
    NoNextPage,

    /// `max_pages` listing pages were visited
    PageCapReached,

    /// A listing page could not be fetched after all retries
    ListingUnavailable,
}

/// Loop bookkeeping for one crawl run
///
/// Owned by the coordinator and discarded when the run ends.
#[derive(Debug, Clone)]
pub struct CrawlState {
    /// Listing page to fetch next; `None` once there is nothing left
    pub current_url: Option<String>,

    /// Listing pages fully processed so far
    pub pages_visited: u32,

    /// Upper bound on `pages_visited`
    pub max_pages: u32,

    /// Where the loop currently is
    pub phase: CrawlPhase,
}

impl CrawlState {
    pub fn new(start_url: impl Into<String>, max_pages: u32) -> Self {
        Self {
            current_url: Some(start_url.into()),
            pages_visited: 0,
            max_pages,
            phase: CrawlPhase::Pending,
        }
    }

    /// Moves the loop to the next phase
    pub fn enter(&mut self, next: CrawlPhase) {
        debug_assert!(
            self.phase.can_transition_to(next),
            "invalid crawl transition: {} -> {}",
            self.phase,
            next
        );
        self.phase = next;
    }

    /// Returns the URL of the next listing page to fetch, if the cap allows one
    pub fn next_listing(&self) -> Option<&str> {
        if self.cap_reached() {
            return None;
        }
        self.current_url.as_deref()
    }

    pub fn cap_reached(&self) -> bool {
        self.pages_visited >= self.max_pages
    }

    /// Records a finished listing page and where to continue
    pub fn complete_page(&mut self, next_url: Option<String>) {
        self.pages_visited += 1;
        self.current_url = next_url;
    }

    /// Explains why the loop stopped, given that it has
    pub fn stop_reason(&self) -> StopReason {
        if self.current_url.is_none() {
            StopReason::NoNextPage
        } else {
            StopReason::PageCapReached
        }
    }
}

/// Outcome counters of a finished crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlSummary {
    pub pages_visited: u32,
    pub records_collected: usize,
    pub items_failed: usize,
    pub stop_reason: StopReason,
}
