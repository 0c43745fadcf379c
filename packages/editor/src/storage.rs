//! Persistence backends for the host shell.
//!
//! A [`KeyValueStore`] holds the saved document between sessions; a
//! [`FileExporter`] hands a named file to the user. Browser backends live in
//! the wasm package.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Export failed: {0}")]
    Export(String),
}

impl StorageError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// String key/value persistence
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Offers a named file to the user
pub trait FileExporter {
    fn export(&mut self, file_name: &str, contents: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Collects exported files in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryExporter {
    pub files: Vec<(String, String)>,
}

impl FileExporter for MemoryExporter {
    fn export(&mut self, file_name: &str, contents: &str) -> Result<(), StorageError> {
        self.files.push((file_name.to_string(), contents.to_string()));
        Ok(())
    }
}

/// One `<key>.json` file per key inside `dir`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(&path, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|e| StorageError::io(&self.dir, e))?;
        let path = self.path_for(key);
        fs::write(&path, value).map_err(|e| StorageError::io(&path, e))?;
        debug!(path = %path.display(), bytes = value.len(), "Stored value");
        Ok(())
    }
}

/// Writes exported files into a directory
#[derive(Debug, Clone)]
pub struct DirectoryExporter {
    dir: PathBuf,
    last_written: Option<PathBuf>,
}

impl DirectoryExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            last_written: None,
        }
    }

    pub fn last_written(&self) -> Option<&Path> {
        self.last_written.as_deref()
    }
}

impl FileExporter for DirectoryExporter {
    fn export(&mut self, file_name: &str, contents: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|e| StorageError::io(&self.dir, e))?;
        let path = self.dir.join(file_name);
        fs::write(&path, contents).map_err(|e| StorageError::io(&path, e))?;
        self.last_written = Some(path);
        Ok(())
    }
}
