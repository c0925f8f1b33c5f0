//! Persistence

use std::{
    fs, io,
    path::PathBuf,
};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{items::LineItem, users::User, wishlist::WishlistEntry};

/// Errors from the durable backend or the snapshot codec.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The backend could not be read or written.
    #[error("storage backend error: {0}")]
    Io(#[from] io::Error),

    /// Persisted data did not parse as a snapshot.
    #[error("corrupt persisted state: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Durable key-value storage contract.
///
/// The store serializes its full state under a fixed namespace key after
/// mutations and reads that key back once at startup. Implementations only
/// move opaque strings; the wire shape lives with [`Snapshot`].
pub trait StateStore {
    /// Reads the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] when the backend cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Durably writes `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] when the backend cannot be written.
    fn save(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

/// In-memory backend for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: FxHashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl StateStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.values.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed backend: one JSON document per key under a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens a storage directory, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] when the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        Ok(FileStore { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StateStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// The persisted shape of a store: cart rows, wishlist entries and the
/// signed-in user.
///
/// UI flags and the catalog are session state and are deliberately not part
/// of the snapshot. The shape round-trips exactly: product snapshots,
/// quantities, chosen variants and customization payloads all survive a
/// write/read cycle unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Cart line items, in insertion order.
    #[serde(default)]
    pub cart: Vec<LineItem>,

    /// Wishlist entries, in insertion order.
    #[serde(default)]
    pub wishlist: Vec<WishlistEntry>,

    /// Authenticated-user snapshot, when signed in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl Snapshot {
    /// Encodes the snapshot as a JSON document.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] when encoding fails.
    pub fn encode(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes a snapshot from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] when the document is not a valid
    /// snapshot.
    pub fn decode(value: &str) -> Result<Self, PersistenceError> {
        Ok(serde_json::from_str(value)?)
    }
}
