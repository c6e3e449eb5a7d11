//! Filesystem checks shared by the path-based load and save functions

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};

/// Fail with [`Error::NotFound`] unless `path` exists
pub(crate) fn ensure_exists(path: &Path) -> Result<fs::Metadata> {
    fs::metadata(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::NotFound(path.to_path_buf()),
        _ => Error::Io(e),
    })
}

/// Fail with [`Error::NotFound`] or [`Error::EmptyFile`] unless `path` has content
pub(crate) fn ensure_non_empty(path: &Path) -> Result<u64> {
    let metadata = ensure_exists(path)?;
    if metadata.len() == 0 {
        return Err(Error::EmptyFile(path.to_path_buf()));
    }
    Ok(metadata.len())
}

/// Delete `path` if it exists
pub(crate) fn remove_existing(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "removed existing destination");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::Io(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::tempdir;

    #[test]
    fn test_missing_path_is_not_found() {
        let dir = tempdir().unwrap();
        let err = ensure_non_empty(&dir.path().join("absent.stl")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_zero_length_is_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.stl");
        fs::write(&path, b"").unwrap();

        assert!(ensure_exists(&path).is_ok());
        let err = ensure_non_empty(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyFile);
    }

    #[test]
    fn test_remove_existing_is_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.stl");
        fs::write(&path, b"data").unwrap();

        remove_existing(&path).unwrap();
        assert!(!path.exists());
        remove_existing(&path).unwrap();
    }
}
