//! CSV export
//!
//! One header row with the record field names, then one row per record.
//! Missing values are written as empty cells.

use crate::output::traits::{OutputResult, RecordExporter};
use crate::record::Record;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes records to a UTF-8 CSV file
#[derive(Debug, Clone)]
pub struct CsvExporter {
    path: PathBuf,
}

impl CsvExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordExporter for CsvExporter {
    fn format_name(&self) -> &'static str {
        "CSV"
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn export(&self, records: &[Record]) -> OutputResult<()> {
        let file = File::create(&self.path)?;
        write_csv(records, file)
    }
}

/// Writes records as CSV to any writer
///
/// The header row is written even when `records` is empty.
pub fn write_csv<W: Write>(records: &[Record], writer: W) -> OutputResult<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    writer.write_record(Record::FIELDS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}
