//! CSV destination for clean records, plus the raw-record snapshot.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fstudio_core::{CleanRecord, RawRecord};
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::atomic::write_atomically;
use crate::error::LoadError;
use crate::Loader;

/// Header row of the clean products file.
pub const CLEAN_HEADER: [&str; 7] = [
    "Title",
    "Price (IDR)",
    "Rating",
    "Colors",
    "Size",
    "Gender",
    "Timestamp",
];

/// Header row of the raw snapshot file.
pub const RAW_HEADER: [&str; 7] = [
    "Title", "Price", "Rating", "Colors", "Size", "Gender", "Timestamp",
];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Serialize)]
struct CleanRow<'a> {
    title: &'a str,
    price_idr: String,
    rating: String,
    colors: u32,
    size: &'a str,
    gender: &'a str,
    timestamp: String,
}

impl<'a> From<&'a CleanRecord> for CleanRow<'a> {
    fn from(r: &'a CleanRecord) -> Self {
        Self {
            title: &r.title,
            price_idr: r.price_idr.to_string(),
            rating: r.rating.to_string(),
            colors: r.colors_count,
            size: &r.size,
            gender: &r.gender,
            timestamp: format_timestamp(r.extracted_at),
        }
    }
}

#[derive(Serialize)]
struct RawRow<'a> {
    title: &'a str,
    price: Option<&'a str>,
    rating: Option<&'a str>,
    colors: Option<&'a str>,
    size: Option<&'a str>,
    gender: Option<&'a str>,
    timestamp: String,
}

impl<'a> From<&'a RawRecord> for RawRow<'a> {
    fn from(r: &'a RawRecord) -> Self {
        Self {
            title: &r.title,
            price: r.price.as_deref(),
            rating: r.rating.as_deref(),
            colors: r.colors.as_deref(),
            size: r.size.as_deref(),
            gender: r.gender.as_deref(),
            timestamp: format_timestamp(r.extracted_at),
        }
    }
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Writes clean records to one CSV file, replacing it atomically.
#[derive(Debug, Clone)]
pub struct CsvLoader {
    path: PathBuf,
}

impl CsvLoader {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Loader for CsvLoader {
    fn name(&self) -> &str {
        "csv"
    }

    /// Writes the header and one row per record. An empty slice produces a
    /// header-only file.
    fn load(&self, records: &[CleanRecord]) -> Result<usize, LoadError> {
        write_rows(&self.path, &CLEAN_HEADER, records.iter().map(CleanRow::from))
    }
}

/// Writes a debugging snapshot of raw records to `path`, replacing it atomically.
///
/// Missing fields are written as empty cells.
///
/// # Errors
///
/// Returns [`LoadError`] when the file cannot be written.
pub fn write_raw_csv(records: &[RawRecord], path: &Path) -> Result<usize, LoadError> {
    write_rows(path, &RAW_HEADER, records.iter().map(RawRow::from))
}

fn write_rows<R, I>(path: &Path, header: &[&str], rows: I) -> Result<usize, LoadError>
where
    R: Serialize,
    I: IntoIterator<Item = R>,
{
    let csv_err = |source: csv::Error| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    write_atomically(path, |file: &mut NamedTempFile| {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.write_record(header).map_err(csv_err)?;

        let mut count = 0usize;
        for row in rows {
            writer.serialize(row).map_err(csv_err)?;
            count += 1;
        }

        writer.flush().map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(count)
    })
}

#[cfg(test)]
#[path = "csv_file_test.rs"]
mod tests;
