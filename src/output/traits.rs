//! Exporter trait and error types
//!
//! Exporters take the finished, ordered record sequence and write it out in
//! one format.

use crate::record::Record;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for record exporters
pub trait RecordExporter {
    /// Short format name used in log lines
    fn format_name(&self) -> &'static str;

    /// Where the export is written
    fn path(&self) -> &Path;

    /// Writes all records, replacing any existing file
    ///
    /// # Arguments
    ///
    /// * `records` - Records in encounter order; may be empty
    fn export(&self, records: &[Record]) -> OutputResult<()>;
}
