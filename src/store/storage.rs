//! Storage port and its adapters.

use fs_err as fs;
use parking_lot::Mutex;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::errors::StoreError;

/// Where the serialized aggregate lives. The store only ever reads or writes
/// the whole document.
pub trait Storage {
    /// `Ok(None)` when nothing has been saved yet. Bytes are returned as
    /// stored; decoding is the store's job.
    fn load(&self) -> Result<Option<Vec<u8>>, StoreError>;
    fn save(&self, document: &str) -> Result<(), StoreError>;
}

impl<S: Storage + ?Sized> Storage for &S {
    fn load(&self) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).load()
    }

    fn save(&self, document: &str) -> Result<(), StoreError> {
        (**self).save(document)
    }
}

/// A single JSON file, replaced atomically on every save.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for JsonFileStorage {
    fn load(&self) -> Result<Option<Vec<u8>>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read(&self.path)?))
    }

    fn save(&self, document: &str) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(document.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        tracing::debug!(path = %self.path.display(), bytes = document.len(), "saved data file");
        Ok(())
    }
}

/// In-process storage for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    doc: Mutex<Option<String>>,
    saves: Mutex<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(doc: impl Into<String>) -> Self {
        Self {
            doc: Mutex::new(Some(doc.into())),
            saves: Mutex::new(0),
        }
    }

    pub fn document(&self) -> Option<String> {
        self.doc.lock().clone()
    }

    /// Number of completed `save` calls.
    pub fn save_count(&self) -> usize {
        *self.saves.lock()
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.doc.lock().clone().map(String::into_bytes))
    }

    fn save(&self, document: &str) -> Result<(), StoreError> {
        *self.doc.lock() = Some(document.to_string());
        *self.saves.lock() += 1;
        Ok(())
    }
}
