//! Output module for exporting crawl results
//!
//! This module handles:
//! - Writing records to CSV and JSON
//! - Summarizing what was collected

mod csv_output;
mod json_output;
pub mod stats;
mod traits;

pub use csv_output::{write_csv, CsvExporter};
pub use json_output::{write_json, JsonExporter};
pub use stats::{compute_statistics, format_summary, print_statistics, RecordStatistics};
pub use traits::{OutputError, OutputResult, RecordExporter};

use crate::config::OutputConfig;
use crate::record::Record;

/// Builds the exporters named in the output configuration
pub fn exporters_for(config: &OutputConfig) -> Vec<Box<dyn RecordExporter>> {
    vec![
        Box::new(CsvExporter::new(&config.csv_path)),
        Box::new(JsonExporter::new(&config.json_path)),
    ]
}

/// Runs every exporter over the records
///
/// Stops at the first exporter that fails.
pub fn export_records(
    records: &[Record],
    exporters: &[Box<dyn RecordExporter>],
) -> crate::Result<()> {
    for exporter in exporters {
        exporter.export(records)?;
        tracing::info!(
            "Data exported to {} ({})",
            exporter.path().display(),
            exporter.format_name()
        );
    }
    Ok(())
}
