//! Statistics over collected records
//!
//! Printed after a crawl to show how many items were scraped, what the first
//! few look like, and which fields the site failed to provide.

use crate::record::Record;

/// How many records the summary shows in full
pub const SAMPLE_SIZE: usize = 5;

/// Record statistics summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordStatistics {
    /// Total number of records
    pub total_records: usize,

    /// Missing-value count for every optional field, in column order
    pub missing_by_field: Vec<(&'static str, usize)>,
}

impl RecordStatistics {
    /// Records that have every optional field present
    pub fn complete_records(records: &[Record]) -> usize {
        records
            .iter()
            .filter(|record| record.optional_fields().iter().all(|(_, v)| v.is_some()))
            .count()
    }
}

/// Counts records and missing values per field
pub fn compute_statistics(records: &[Record]) -> RecordStatistics {
    let mut missing_by_field: Vec<(&'static str, usize)> = Record::FIELDS[1..6]
        .iter()
        .map(|field| (*field, 0))
        .collect();

    for record in records {
        for (slot, (_, value)) in missing_by_field.iter_mut().zip(record.optional_fields()) {
            if value.is_none() {
                slot.1 += 1;
            }
        }
    }

    RecordStatistics {
        total_records: records.len(),
        missing_by_field,
    }
}

/// Formats the post-crawl summary shown on stdout
pub fn format_summary(records: &[Record]) -> String {
    let stats = compute_statistics(records);
    let mut out = String::new();

    out.push_str("=== Scraping Summary ===\n");
    out.push_str(&format!("Total items scraped: {}\n", stats.total_records));
    out.push_str(&format!(
        "Complete items: {}\n",
        RecordStatistics::complete_records(records)
    ));

    if !records.is_empty() {
        out.push_str("\nSample data:\n");
        for (index, record) in records.iter().take(SAMPLE_SIZE).enumerate() {
            out.push_str(&format!(
                "  {}. {} | {} | {}\n",
                index + 1,
                record.display_title(),
                record.price.as_deref().unwrap_or("-"),
                record.url
            ));
        }
    }

    out.push_str("\nMissing values:\n");
    for (field, missing) in &stats.missing_by_field {
        out.push_str(&format!("  {:<14}{}\n", field, missing));
    }

    out
}

/// Prints the post-crawl summary to stdout
pub fn print_statistics(records: &[Record]) {
    print!("\n{}", format_summary(records));
}
