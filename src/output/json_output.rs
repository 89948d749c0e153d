//! JSON export: a pretty-printed array with one object per record

use crate::output::traits::{OutputResult, RecordExporter};
use crate::record::Record;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes records to a JSON file
#[derive(Debug, Clone)]
pub struct JsonExporter {
    path: PathBuf,
}

impl JsonExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordExporter for JsonExporter {
    fn format_name(&self) -> &'static str {
        "JSON"
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn export(&self, records: &[Record]) -> OutputResult<()> {
        let file = File::create(&self.path)?;
        write_json(records, BufWriter::new(file))
    }
}

/// Writes records as an indented JSON array; missing values become `null`
pub fn write_json<W: Write>(records: &[Record], mut writer: W) -> OutputResult<()> {
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
