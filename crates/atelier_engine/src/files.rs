//! Atomic file primitives for the data directory.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("data directory missing or not writable: {0}")]
    DataDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure the data directory exists; create if missing.
pub fn ensure_data_dir(dir: &Path) -> Result<(), FileError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| FileError::DataDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(FileError::DataDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| FileError::DataDir(e.to_string()))?;
    }
    // Writability probe: creating a temp file fails early on a read-only dir.
    NamedTempFile::new_in(dir).map_err(|e| FileError::DataDir(e.to_string()))?;
    Ok(())
}

/// Write `content` to `{dir}/{filename}` via a temp file and rename, so a
/// crash mid-write never leaves a partial slice behind.
pub fn write_atomic(dir: &Path, filename: &str, content: &str) -> Result<PathBuf, FileError> {
    ensure_data_dir(dir)?;

    let target = dir.join(filename);
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;

    if target.exists() {
        fs::remove_file(&target)?;
    }
    tmp.persist(&target).map_err(|e| FileError::Io(e.error))?;
    Ok(target)
}
