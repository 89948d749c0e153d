use serde::Deserialize;
use std::time::Duration;

/// Site every crawl is bound to when no config file is given
pub const DEFAULT_BASE_URL: &str = "https://example-ecommerce-site.com";

/// User agent sent with every request unless overridden
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Main configuration structure for Listing-Harvest
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub selectors: SelectorConfig,
    pub output: OutputConfig,
}

/// The site being crawled
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Prefix that relative links are appended to
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// First listing page
    #[serde(rename = "start-url")]
    pub start_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            start_url: format!("{}/products?page=1", DEFAULT_BASE_URL),
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Pause before each item fetch and after each listing page (milliseconds).
    /// Retry backoff is twice this value.
    #[serde(rename = "delay-ms")]
    pub delay_ms: u64,

    /// Maximum number of listing pages to visit
    #[serde(rename = "max-pages")]
    pub max_pages: u32,

    /// Attempts per URL before it is abandoned
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            delay_ms: 2000,
            max_pages: 3,
            max_retries: 3,
            timeout_secs: 10,
        }
    }
}

impl CrawlerConfig {
    /// Rate-limiting pause as a [`Duration`]
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Wait between two attempts at the same URL
    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.delay_ms.saturating_mul(2))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    pub value: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            value: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// CSS selectors locating the listing structure and each record field
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Element wrapping one item on a listing page
    #[serde(rename = "item-container")]
    pub item_container: String,

    /// Link inside an item container; the first match is taken
    #[serde(rename = "item-link")]
    pub item_link: String,

    /// Link to the following listing page
    #[serde(rename = "next-page")]
    pub next_page: String,

    pub title: String,
    pub price: String,
    pub description: String,
    pub rating: String,
    pub availability: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            item_container: "div.product-item".to_string(),
            item_link: "a[href]".to_string(),
            next_page: "a.next-page".to_string(),
            title: "h1.product-title".to_string(),
            price: "span.price".to_string(),
            description: "div.description".to_string(),
            rating: "span.rating".to_string(),
            availability: "span.stock".to_string(),
        }
    }
}

impl SelectorConfig {
    /// Returns every selector paired with the name of the setting it came from
    pub fn entries(&self) -> [(&'static str, &str); 8] {
        [
            ("item-container", self.item_container.as_str()),
            ("item-link", self.item_link.as_str()),
            ("next-page", self.next_page.as_str()),
            ("title", self.title.as_str()),
            ("price", self.price.as_str()),
            ("description", self.description.as_str()),
            ("rating", self.rating.as_str()),
            ("availability", self.availability.as_str()),
        ]
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the CSV export
    #[serde(rename = "csv-path")]
    pub csv_path: String,

    /// Path to the JSON export
    #[serde(rename = "json-path")]
    pub json_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: "products_data.csv".to_string(),
            json_path: "products_data.json".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_is_twice_the_delay() {
        let crawler = CrawlerConfig {
            delay_ms: 150,
            ..CrawlerConfig::default()
        };
        assert_eq!(crawler.delay(), Duration::from_millis(150));
        assert_eq!(crawler.backoff(), Duration::from_millis(300));
    }

    #[test]
    fn test_default_timing() {
        let crawler = CrawlerConfig::default();
        assert_eq!(crawler.delay(), Duration::from_secs(2));
        assert_eq!(crawler.backoff(), Duration::from_secs(4));
        assert_eq!(crawler.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_backoff_saturates() {
        let crawler = CrawlerConfig {
            delay_ms: u64::MAX,
            ..CrawlerConfig::default()
        };
        assert_eq!(crawler.backoff(), Duration::from_millis(u64::MAX));
    }
}
