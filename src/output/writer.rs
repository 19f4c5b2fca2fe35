//! Output file writer implementation

use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{DiffMovieError, DiffMovieResult};

/// Writes report files so that readers never see a partial document
pub struct OutputWriter;

impl OutputWriter {
    /// Write `bytes` to `path` through a temporary sibling and a rename
    pub fn write_atomic(path: &Path, bytes: &[u8]) -> DiffMovieResult<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => std::env::current_dir()?,
        };
        std::fs::create_dir_all(&dir)?;

        let mut temp = tempfile::Builder::new()
            .prefix(".diffmovie-")
            .tempfile_in(&dir)?;
        debug!("Writing to temporary file: {}", temp.path().display());

        temp.write_all(bytes)?;
        temp.flush()?;
        temp.as_file().sync_all()?;

        temp.persist(path).map_err(|e| DiffMovieError::ReportError {
            message: format!("cannot move report into place at {}: {}", path.display(), e),
        })?;

        info!("Wrote {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_atomic_creates_directories_and_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("cmp.html");

        OutputWriter::write_atomic(&path, b"first").unwrap();
        OutputWriter::write_atomic(&path, b"second").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
        let leftovers: Vec<_> = std::fs::read_dir(path.parent().unwrap())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().starts_with(".diffmovie-"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
