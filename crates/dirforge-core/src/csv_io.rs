//! Reading the path files and writing the error files

use csv::{ReaderBuilder, StringRecord, Writer};
use log::info;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::{DirforgeError, DirforgeResult};
use crate::fsops::make_dir;

/// Stream every record of a headerless CSV into `on_row`.
///
/// Records may have any number of fields. Returns the number of records read.
pub fn read_rows<F>(path: &Path, mut on_row: F) -> DirforgeResult<usize>
where
    F: FnMut(&StringRecord) -> DirforgeResult<()>,
{
    info!("Handling input CSV {}", path.display());

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut count = 0;
    for record in reader.records() {
        let record = record?;
        on_row(&record)?;
        count += 1;
    }

    Ok(count)
}

/// One-column CSV collecting directory names that could not be applied
pub struct ErrorSink<W: Write> {
    writer: Writer<W>,
    rows: usize,
}

impl ErrorSink<File> {
    /// Create (or truncate) the error file, creating its parent directories
    pub fn create(path: &Path) -> DirforgeResult<Self> {
        if let Some(parent) = path.parent() {
            make_dir(parent, true).map_err(|e| DirforgeError::filesystem(parent, e))?;
        }
        let file = File::create(path).map_err(|e| DirforgeError::filesystem(path, e))?;
        Ok(Self::from_writer(file))
    }
}

impl<W: Write> ErrorSink<W> {
    pub fn from_writer(inner: W) -> Self {
        Self {
            writer: Writer::from_writer(inner),
            rows: 0,
        }
    }

    pub fn record(&mut self, dir_name: &str) -> DirforgeResult<()> {
        self.writer.write_record([dir_name])?;
        self.rows += 1;
        Ok(())
    }

    /// Number of rows written so far
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn finish(mut self) -> DirforgeResult<W> {
        self.writer.flush()?;
        self.writer
            .into_inner()
            .map_err(|e| DirforgeError::Io(e.into_error()))
    }
}
