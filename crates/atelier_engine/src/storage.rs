//! File-backed slice storage: one file per key under a data directory.

use std::fs;
use std::path::PathBuf;

use atelier_core::Storage;
use site_logging::{site_error, site_warn};

use crate::files::{ensure_data_dir, write_atomic, FileError};

/// The local-storage analog: every slice key maps to `{dir}/{key}.json`.
///
/// Reads and writes degrade with a logged warning instead of failing; a
/// store built on top never observes an IO error. Two processes pointed at
/// the same directory race read-modify-write per slice, last writer wins.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Opens (and creates, if needed) the data directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, FileError> {
        let dir = dir.into();
        ensure_data_dir(&dir)?;
        Ok(Self { dir })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.key_path(key);
        match fs::read_to_string(&path) {
            Ok(text) => Some(text),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => {
                site_warn!("Failed to read slice {:?}: {}", path, err);
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Err(err) = write_atomic(&self.dir, &format!("{key}.json"), value) {
            site_error!("Failed to write slice {:?}: {}", key, err);
        }
    }

    fn remove(&mut self, key: &str) {
        let path = self.key_path(key);
        match fs::remove_file(&path) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => site_warn!("Failed to remove slice {:?}: {}", path, err),
        }
    }
}
