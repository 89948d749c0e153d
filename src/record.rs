//! The flat record produced for every scraped item

use chrono::Local;
use serde::Serialize;

/// Format of [`Record::scraped_at`]
pub const SCRAPED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One scraped item
///
/// Field order is the export column order. Fields other than `url` and
/// `scraped_at` are `None` when the page had no matching element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub url: String,
    pub title: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
    pub rating: Option<String>,
    pub availability: Option<String>,
    pub scraped_at: String,
}

impl Record {
    /// Column names, in export order
    pub const FIELDS: [&'static str; 7] = [
        "url",
        "title",
        "price",
        "description",
        "rating",
        "availability",
        "scraped_at",
    ];

    /// The optional fields paired with their column names
    pub fn optional_fields(&self) -> [(&'static str, Option<&str>); 5] {
        [
            ("title", self.title.as_deref()),
            ("price", self.price.as_deref()),
            ("description", self.description.as_deref()),
            ("rating", self.rating.as_deref()),
            ("availability", self.availability.as_deref()),
        ]
    }

    /// Title for log lines
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Unknown")
    }
}

/// Current local time in [`SCRAPED_AT_FORMAT`]
pub fn timestamp_now() -> String {
    Local::now().format(SCRAPED_AT_FORMAT).to_string()
}
