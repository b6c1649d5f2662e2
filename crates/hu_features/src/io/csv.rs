use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::{
    error::{HuError, Result},
    types::{FeatureVector, FEATURE_NAMES},
};

/// Writes dataset rows `hu1..hu7,label` as CSV, flushing after every row so an
/// interrupted run leaves only complete rows behind.
pub struct FeatureTableWriter<W: Write> {
    writer: ::csv::Writer<W>,
    rows: usize,
}

impl FeatureTableWriter<File> {
    /// Create (or truncate) the table at `path`, creating parent directories.
    pub fn create(path: &Path) -> Result<Self> {
        let open = || -> std::io::Result<File> {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            File::create(path)
        };
        let file = open().map_err(|source| HuError::SinkOpen {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(file))
    }
}

impl<W: Write> FeatureTableWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: ::csv::Writer::from_writer(inner),
            rows: 0,
        }
    }

    pub fn write_header(&mut self) -> Result<()> {
        let mut header: Vec<&str> = FEATURE_NAMES.to_vec();
        header.push("label");
        self.writer.write_record(&header)?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn write_row(&mut self, features: &FeatureVector, label: &str) -> Result<()> {
        let mut record: Vec<String> = features.values().iter().map(|v| format_value(*v)).collect();
        record.push(label.to_string());
        self.writer.write_record(&record)?;
        self.writer.flush()?;
        self.rows += 1;
        Ok(())
    }

    /// Number of data rows written so far
    pub fn rows_written(&self) -> usize {
        self.rows
    }

    /// Flush and hand back the underlying writer
    pub fn finish(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| HuError::Io(e.into_error()))
    }
}

/// Shortest round-trip representation, always with a decimal point or exponent.
pub fn format_value(value: f64) -> String {
    format!("{value:?}")
}
