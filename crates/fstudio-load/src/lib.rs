//! Persistence of clean catalog records.
//!
//! Every destination implements [`Loader`]. Only the CSV destination is
//! implemented; spreadsheet and relational destinations are reported as
//! skipped by [`load_all`].

mod atomic;
pub mod csv_file;
pub mod error;
pub mod results;

use std::path::Path;

use fstudio_core::CleanRecord;

pub use csv_file::{write_raw_csv, CsvLoader, CLEAN_HEADER, RAW_HEADER};
pub use error::LoadError;
pub use results::{load_all, DestinationResult, LoadResults, LoadStatus};

/// A place clean records can be written to.
pub trait Loader {
    /// Short destination name used in logs and [`LoadResults`], e.g. `"csv"`.
    fn name(&self) -> &str;

    /// Writes every record, replacing whatever the destination held before.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] when the destination cannot be written. A failed
    /// load leaves the previous contents in place.
    fn load(&self, records: &[CleanRecord]) -> Result<usize, LoadError>;
}

/// Writes `records` to a CSV file at `destination`, overwriting it.
///
/// Returns `true` on success. Failures are logged, never propagated.
pub fn load(records: &[CleanRecord], destination: &Path) -> bool {
    let loader = CsvLoader::new(destination);
    match loader.load(records) {
        Ok(rows) => {
            tracing::info!(path = %destination.display(), rows, "records saved");
            true
        }
        Err(e) => {
            tracing::error!(path = %destination.display(), error = %e, "failed to save records");
            false
        }
    }
}
