//! Link resolution for Listing-Harvest
//!
//! Item and pagination links are resolved against the configured base URL by
//! plain string concatenation. No path normalization takes place: `..`
//! segments, query strings and duplicate slashes are kept exactly as written.

/// Returns true if the link already carries an `http`/`https` scheme
pub fn is_absolute(href: &str) -> bool {
    href.starts_with("http")
}

/// Resolves a link href against the base URL
///
/// Absolute links pass through unchanged; anything else is appended to
/// `base_url` verbatim.
///
/// # Examples
///
/// ```
/// use listing_harvest::url::resolve_link;
///
/// assert_eq!(
///     resolve_link("https://shop.example.com", "/p/1"),
///     "https://shop.example.com/p/1"
/// );
/// assert_eq!(
///     resolve_link("https://shop.example.com", "https://cdn.example.com/p/1"),
///     "https://cdn.example.com/p/1"
/// );
/// ```
pub fn resolve_link(base_url: &str, href: &str) -> String {
    if is_absolute(href) {
        href.to_string()
    } else {
        format!("{}{}", base_url, href)
    }
}
