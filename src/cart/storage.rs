//! Cart Storage
//!
//! Durable home for the serialised cart snapshot.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

/// Errors raised by a cart storage backend.
#[derive(Debug, Error)]
pub enum CartStorageError {
    /// Reading or writing the snapshot failed.
    #[error("cart storage I/O failed")]
    Io(#[from] io::Error),
}

/// Somewhere a cart snapshot can be kept between sessions.
pub trait CartStorage {
    /// Read the last saved snapshot, if any.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot be read.
    fn load(&self) -> Result<Option<String>, CartStorageError>;

    /// Replace the saved snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot be written.
    fn save(&mut self, snapshot: &str) -> Result<(), CartStorageError>;
}

/// In-memory storage, lost when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryCartStorage {
    snapshot: Option<String>,
}

impl MemoryCartStorage {
    /// Storage pre-loaded with a snapshot.
    pub fn with_snapshot(snapshot: impl Into<String>) -> Self {
        Self {
            snapshot: Some(snapshot.into()),
        }
    }

    /// The snapshot currently held.
    pub fn snapshot(&self) -> Option<&str> {
        self.snapshot.as_deref()
    }
}

impl CartStorage for MemoryCartStorage {
    fn load(&self) -> Result<Option<String>, CartStorageError> {
        Ok(self.snapshot.clone())
    }

    fn save(&mut self, snapshot: &str) -> Result<(), CartStorageError> {
        self.snapshot = Some(snapshot.to_string());

        Ok(())
    }
}

/// Snapshot stored as a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileCartStorage {
    path: PathBuf,
}

impl FileCartStorage {
    /// Storage backed by the file at `path`. The file is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartStorage for FileCartStorage {
    fn load(&self) -> Result<Option<String>, CartStorageError> {
        match fs::read_to_string(&self.path) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn save(&mut self, snapshot: &str) -> Result<(), CartStorageError> {
        fs::write(&self.path, snapshot)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn missing_file_loads_as_nothing() -> TestResult {
        let dir = tempfile::tempdir()?;
        let storage = FileCartStorage::new(dir.path().join("cart.json"));

        assert_eq!(storage.load()?, None);

        Ok(())
    }

    #[test]
    fn file_storage_keeps_the_last_snapshot() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut storage = FileCartStorage::new(dir.path().join("cart.json"));

        storage.save("[1]")?;
        storage.save("[2]")?;

        assert_eq!(storage.load()?.as_deref(), Some("[2]"));

        Ok(())
    }

    #[test]
    fn unwritable_path_reports_io_errors() {
        let mut storage = FileCartStorage::new("/nonexistent-dir/cart.json");

        assert!(matches!(
            storage.save("[]"),
            Err(CartStorageError::Io(_))
        ));
    }
}
