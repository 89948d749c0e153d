//! HTML parser for listing and item pages
//!
//! This module handles parsing HTML content to extract:
//! - Item detail links from a listing page
//! - The next-page link from a listing page
//! - Record fields from an item page
//!
//! What to look for is described by compiled [`Selectors`]; nothing here knows
//! the markup of a particular site.

use crate::config::{compile_selector, SelectorConfig};
use crate::record::{timestamp_now, Record};
use crate::url::resolve_link;
use crate::ConfigError;
use scraper::{ElementRef, Html, Selector};

/// Compiled form of [`SelectorConfig`]
#[derive(Debug, Clone)]
pub struct Selectors {
    item_container: Selector,
    item_link: Selector,
    next_page: Selector,
    title: Selector,
    price: Selector,
    description: Selector,
    rating: Selector,
    availability: Selector,
}

impl Selectors {
    /// Compiles every selector in the configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Selectors)` - All selectors compiled
    /// * `Err(ConfigError::InvalidSelector)` - At least one selector is malformed
    pub fn compile(config: &SelectorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            item_container: compile_selector("item-container", &config.item_container)?,
            item_link: compile_selector("item-link", &config.item_link)?,
            next_page: compile_selector("next-page", &config.next_page)?,
            title: compile_selector("title", &config.title)?,
            price: compile_selector("price", &config.price)?,
            description: compile_selector("description", &config.description)?,
            rating: compile_selector("rating", &config.rating)?,
            availability: compile_selector("availability", &config.availability)?,
        })
    }
}

/// Links extracted from one listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage {
    /// Absolute item URLs, in document order
    pub item_urls: Vec<String>,

    /// Absolute URL of the following listing page
    pub next_url: Option<String>,
}

/// Parses a listing page once and extracts both item links and the next link
///
/// # Example
///
/// ```
/// use listing_harvest::config::SelectorConfig;
/// use listing_harvest::crawler::{parse_listing_page, Selectors};
///
/// let selectors = Selectors::compile(&SelectorConfig::default()).unwrap();
/// let html = r#"<div class="product-item"><a href="/p/1">One</a></div>
///               <a class="next-page" href="/products?page=2">Next</a>"#;
/// let page = parse_listing_page(html, "https://shop.example.com", &selectors);
/// assert_eq!(page.item_urls, vec!["https://shop.example.com/p/1"]);
/// assert_eq!(
///     page.next_url.as_deref(),
///     Some("https://shop.example.com/products?page=2")
/// );
/// ```
pub fn parse_listing_page(html: &str, base_url: &str, selectors: &Selectors) -> ListingPage {
    let document = Html::parse_document(html);

    ListingPage {
        item_urls: extract_item_links(&document, base_url, selectors),
        next_url: extract_next_page(&document, base_url, selectors),
    }
}

/// Returns the item URLs found on a listing page
///
/// Each item container contributes the first matching link inside it.
/// Containers without a link are skipped. Use [`parse_listing_page`] when the
/// next-page link is needed as well, so the document is parsed only once.
///
/// # Example
///
/// ```
/// use listing_harvest::config::SelectorConfig;
/// use listing_harvest::crawler::{parse_listing, Selectors};
///
/// let selectors = Selectors::compile(&SelectorConfig::default()).unwrap();
/// let html = r#"<div class="product-item"><a href="/p/1">One</a></div>
///               <div class="product-item">No link</div>
///               <div class="product-item"><a href="https://cdn.example.com/p/2">Two</a></div>"#;
/// assert_eq!(
///     parse_listing(html, "https://shop.example.com", &selectors),
///     vec!["https://shop.example.com/p/1", "https://cdn.example.com/p/2"]
/// );
/// ```
pub fn parse_listing(html: &str, base_url: &str, selectors: &Selectors) -> Vec<String> {
    let document = Html::parse_document(html);
    extract_item_links(&document, base_url, selectors)
}

/// Returns the next listing page URL, or `None` on the last page
///
/// Only the first next-page marker counts. A marker without an `href` means
/// there is no next page.
///
/// # Example
///
/// ```
/// use listing_harvest::config::SelectorConfig;
/// use listing_harvest::crawler::{parse_next_page, Selectors};
///
/// let selectors = Selectors::compile(&SelectorConfig::default()).unwrap();
/// let base = "https://shop.example.com";
///
/// let html = r#"<a class="next-page" href="/products?page=3">Next</a>"#;
/// assert_eq!(
///     parse_next_page(html, base, &selectors).as_deref(),
///     Some("https://shop.example.com/products?page=3")
/// );
/// assert_eq!(parse_next_page(r#"<a class="next-page">Next</a>"#, base, &selectors), None);
/// ```
pub fn parse_next_page(html: &str, base_url: &str, selectors: &Selectors) -> Option<String> {
    let document = Html::parse_document(html);
    extract_next_page(&document, base_url, selectors)
}

/// Builds a record from an item page
///
/// `url` and `scraped_at` are always set. Every other field is `None` exactly
/// when its selector matches nothing on the page.
pub fn parse_item(html: &str, url: &str, selectors: &Selectors) -> Record {
    let document = Html::parse_document(html);

    Record {
        url: url.to_string(),
        title: safe_extract(&document, &selectors.title),
        price: safe_extract(&document, &selectors.price),
        description: safe_extract(&document, &selectors.description),
        rating: safe_extract(&document, &selectors.rating),
        availability: safe_extract(&document, &selectors.availability),
        scraped_at: timestamp_now(),
    }
}

fn extract_item_links(document: &Html, base_url: &str, selectors: &Selectors) -> Vec<String> {
    document
        .select(&selectors.item_container)
        .filter_map(|container| {
            let href = container
                .select(&selectors.item_link)
                .find_map(|link| link.value().attr("href"));

            if href.is_none() {
                tracing::debug!("Item container without a link, skipping");
            }

            href.map(|href| resolve_link(base_url, href))
        })
        .collect()
}

fn extract_next_page(document: &Html, base_url: &str, selectors: &Selectors) -> Option<String> {
    let next = document.select(&selectors.next_page).next()?;

    next.value()
        .attr("href")
        .filter(|href| !href.is_empty())
        .map(|href| resolve_link(base_url, href))
}

/// Text of the first element matching `selector`, trimmed
///
/// A matching element with no text yields `Some("")`.
fn safe_extract(document: &Html, selector: &Selector) -> Option<String> {
    document.select(selector).next().map(element_text)
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
