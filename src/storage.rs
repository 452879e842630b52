//! Key-value persistence for scores.
//!
//! The game only needs to get and set small JSON values. [`MemoryStore`] keeps them for the
//! lifetime of the process and [`JsonFileStore`] mirrors them into a single file in the data
//! directory.

use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde_json::Value;
use thiserror::Error;
use tracing::warn;

/// File name used by [`JsonFileStore`] inside its directory.
pub const STORE_FILE_NAME: &str = "store.json";

/// Persistence failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying file operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored content could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Minimal key-value interface for JSON values.
pub trait Store {
    /// Reads the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the backing storage cannot be written.
    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Removes `key` if present.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the backing storage cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStore {
    /// Stored values.
    values: BTreeMap<String, Value>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        let _ = self.values.insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let _ = self.values.remove(key);
        Ok(())
    }
}

/// Store backed by one JSON object on disk.
///
/// Every write reads the file, updates the object and writes it back, so several processes playing
/// at once simply see the last writer win.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    /// Location of the JSON file.
    path: PathBuf,
}

impl JsonFileStore {
    /// Opens a store in `directory`, creating the directory when missing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created.
    pub fn open(directory: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(directory)?;

        Ok(Self {
            path: directory.join(STORE_FILE_NAME),
        })
    }

    /// Default data directory for the game.
    #[must_use]
    pub fn default_directory() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("invisible-wall");
        path
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole object, treating a missing file as empty.
    fn load(&self) -> Result<BTreeMap<String, Value>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    /// Reads the object about to be modified, and whether the file on disk was corrupt.
    ///
    /// A file that no longer parses is replaced by the next write instead of blocking every later
    /// one.
    fn load_for_write(&self) -> Result<(BTreeMap<String, Value>, bool), StoreError> {
        match self.load() {
            Ok(values) => Ok((values, false)),
            Err(StoreError::Serialization(err)) => {
                warn!(%err, path = %self.path.display(), "overwriting corrupt store file");
                Ok((BTreeMap::new(), true))
            }
            Err(err) => Err(err),
        }
    }

    /// Writes the whole object back through a sibling temporary file.
    fn save(&self, values: &BTreeMap<String, Value>) -> Result<(), StoreError> {
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, serde_json::to_string_pretty(values)?)?;
        fs::rename(&staging, &self.path)?;
        Ok(())
    }
}

impl Store for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        let (mut values, _) = self.load_for_write()?;
        let _ = values.insert(key.to_owned(), value);
        self.save(&values)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let (mut values, corrupt) = self.load_for_write()?;
        if values.remove(key).is_some() || corrupt {
            self.save(&values)?;
        }
        Ok(())
    }
}
