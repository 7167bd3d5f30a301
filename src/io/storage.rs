use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tempfile::NamedTempFile;

/// Error type for the key/value store
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not serialize storage: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// String keys to string values persisted as one JSON object, the same
/// shape as browser local storage.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        LocalStorage { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<IndexMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(IndexMap::new());
        }
        let text = fs::read_to_string(&self.path).map_err(|e| StorageError::ReadError {
            path: self.path.clone(),
            source: e,
        })?;
        if text.trim().is_empty() {
            return Ok(IndexMap::new());
        }
        serde_json::from_str(&text).map_err(|e| StorageError::ParseError {
            path: self.path.clone(),
            source: e,
        })
    }

    /// The current items for a read-modify-write, and whether the file was
    /// unparseable. A corrupt store is logged and replaced instead of
    /// blocking every later write.
    fn read_for_write(&self) -> Result<(IndexMap<String, String>, bool), StorageError> {
        match self.read_all() {
            Err(StorageError::ParseError { path, source }) => {
                tracing::warn!(path = %path.display(), error = %source, "replacing unreadable storage");
                Ok((IndexMap::new(), true))
            }
            other => Ok((other?, false)),
        }
    }

    fn write_all(&self, items: &IndexMap<String, String>) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(items)?;
        let write_err = |e: io::Error| StorageError::WriteError {
            path: self.path.clone(),
            source: e,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        atomic_write(&self.path, content.as_bytes()).map_err(write_err)
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.get(key).cloned())
    }

    pub fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let (mut items, _) = self.read_for_write()?;
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items)
    }

    /// Removing a missing key is not an error
    pub fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let (mut items, corrupt) = self.read_for_write()?;
        if items.shift_remove(key).is_some() || corrupt {
            self.write_all(&items)?;
        }
        Ok(())
    }
}

/// Write via a temp file in the same directory, then rename over the target
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
