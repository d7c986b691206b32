//! Cart Storage
//!
//! The persistent key-value slot the cart snapshots itself into. Storage
//! failure is surfaced to the caller but never invalidates the in-memory
//! cart, which stays authoritative for the session.

use std::{fs, io, path::PathBuf};

use rustc_hash::FxHashMap;
use thiserror::Error;

/// Fixed key the serialized cart state is persisted under.
pub const CART_KEY: &str = "storefront-cart";

/// Errors related to reading or writing a storage slot.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error accessing the backing slot.
    #[error("failed to access cart storage: {0}")]
    Io(#[from] io::Error),
}

/// A persistent key-value slot for serialized cart state.
///
/// Each `set` must replace the slot's whole value in one step: a
/// concurrent reader observes either the previous snapshot or the new
/// one, never an interleaving of the two.
pub trait CartStore {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the slot could not be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the slot could not be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// An in-memory store for tests and single-session use.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: FxHashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.slots.insert(key.to_string(), value.to_string());

        Ok(())
    }
}

/// A file-backed store with one file per key under a root directory.
///
/// Writes go to a temporary sibling file first and are moved into place
/// with a rename, so a reader never sees a partially-written snapshot.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FileStore { root: root.into() }
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl CartStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.slot_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Io(err)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root)?;

        let staging = self.root.join(format!("{key}.json.tmp"));
        fs::write(&staging, value)?;
        fs::rename(&staging, self.slot_path(key))?;

        Ok(())
    }
}
