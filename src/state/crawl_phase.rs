/// Phase definitions for the listing crawl loop
///
/// Each listing page moves through fetch, parse, item fetching and next-page
/// resolution before the loop either starts over or finishes.
use std::fmt;

/// Represents where the crawl loop currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    /// Crawl has been set up but no page has been requested
    Pending,

    // ===== Per-page phases =====
    /// Listing page is being fetched
    FetchingListing,

    /// Item links and the next-page link are being extracted
    ParsingListing,

    /// Item detail pages are being fetched and parsed
    FetchingItems,

    /// Deciding whether another listing page follows
    ResolvingNext,

    // ===== Terminal =====
    /// Crawl has finished; collected records are final
    Done,
}

impl CrawlPhase {
    /// Returns true if the loop has finished
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns true if the loop may move from this phase to `next`
    pub fn can_transition_to(&self, next: CrawlPhase) -> bool {
        use CrawlPhase::*;
        matches!(
            (*self, next),
            (Pending, FetchingListing)
                | (Pending, Done)
                | (FetchingListing, ParsingListing)
                | (FetchingListing, Done)
                | (ParsingListing, FetchingItems)
                | (FetchingItems, ResolvingNext)
                | (ResolvingNext, FetchingListing)
                | (ResolvingNext, Done)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::FetchingListing => "fetching_listing",
            Self::ParsingListing => "parsing_listing",
            Self::FetchingItems => "fetching_items",
            Self::ResolvingNext => "resolving_next",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
