//! All-or-nothing file replacement.
//!
//! Content is written to a temporary file in the destination's directory and
//! renamed over the destination only after it has been fully written and
//! synced, so a failure never leaves a truncated file behind.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::LoadError;

pub(crate) fn write_atomically<F>(path: &Path, write: F) -> Result<usize, LoadError>
where
    F: FnOnce(&mut NamedTempFile) -> Result<usize, LoadError>,
{
    let io_err = |source: std::io::Error| LoadError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(io_err)?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    let written = write(&mut tmp)?;
    tmp.flush().map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;

    tmp.persist(path).map_err(|e| LoadError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/out.txt");
        let n = write_atomically(&path, |f| {
            f.write_all(b"hello").unwrap();
            Ok(1)
        })
        .unwrap();
        assert_eq!(n, 1);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn failed_write_keeps_previous_contents_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        std::fs::write(&path, "previous").unwrap();

        let result = write_atomically(&path, |f| {
            f.write_all(b"partial").unwrap();
            Err(LoadError::Empty)
        });

        assert!(matches!(result, Err(LoadError::Empty)));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "previous");
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1, "temporary file should have been removed");
    }

    #[test]
    fn destination_that_is_a_directory_fails_to_persist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taken");
        std::fs::create_dir(&path).unwrap();

        let result = write_atomically(&path, |f| {
            f.write_all(b"data").unwrap();
            Ok(1)
        });

        assert!(
            matches!(result, Err(LoadError::Persist { .. })),
            "expected Persist error, got: {result:?}"
        );
        assert!(path.is_dir());
    }
}
