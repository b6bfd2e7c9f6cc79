//! Fan-out of one clean record set to several destinations.

use fstudio_core::CleanRecord;

use crate::error::LoadError;
use crate::Loader;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Success { rows: usize },
    Failed { error: String },
    /// Requested, but the destination has no implementation.
    Skipped,
}

impl std::fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadStatus::Success { rows } => write!(f, "success ({rows} rows)"),
            LoadStatus::Failed { error } => write!(f, "failed: {error}"),
            LoadStatus::Skipped => write!(f, "skipped"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationResult {
    pub destination: String,
    pub status: LoadStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadResults {
    pub entries: Vec<DestinationResult>,
}

impl LoadResults {
    /// `true` when no destination failed. Skipped destinations do not count
    /// against the run.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        !self
            .entries
            .iter()
            .any(|e| matches!(e.status, LoadStatus::Failed { .. }))
    }

    #[must_use]
    pub fn status_of(&self, destination: &str) -> Option<&LoadStatus> {
        self.entries
            .iter()
            .find(|e| e.destination == destination)
            .map(|e| &e.status)
    }
}

/// Loads `records` into every destination in `loaders` and marks each name in
/// `unimplemented` as skipped.
///
/// An empty record set fails every implemented destination without touching
/// it, so a run that produced nothing never clobbers a previous output.
pub fn load_all(
    records: &[CleanRecord],
    loaders: &[&dyn Loader],
    unimplemented: &[&str],
) -> LoadResults {
    let mut entries = Vec::with_capacity(loaders.len() + unimplemented.len());

    for loader in loaders {
        let outcome = if records.is_empty() {
            Err(LoadError::Empty)
        } else {
            loader.load(records)
        };

        let status = match outcome {
            Ok(rows) => {
                tracing::info!(destination = loader.name(), rows, "load succeeded");
                LoadStatus::Success { rows }
            }
            Err(e) => {
                tracing::error!(destination = loader.name(), error = %e, "load failed");
                LoadStatus::Failed {
                    error: e.to_string(),
                }
            }
        };

        entries.push(DestinationResult {
            destination: loader.name().to_owned(),
            status,
        });
    }

    for name in unimplemented {
        tracing::warn!(destination = *name, "destination not implemented, skipping");
        entries.push(DestinationResult {
            destination: (*name).to_owned(),
            status: LoadStatus::Skipped,
        });
    }

    LoadResults { entries }
}
