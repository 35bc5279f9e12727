//! Layout storage
//!
//! A [`LayoutStore`] is a string key/value store holding the layout blob.
//! [`LayoutPersistence`] drives it with a best-effort policy: the live layout
//! stays authoritative and a failed save is logged, never surfaced.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::codec::{encode, resolve_blob, serialize_layout};
use super::error::PersistError;
use crate::dock::{DockLayout, LayoutDescriptor, TabTypeRegistry};
use crate::logging::span_names;

/// Key the layout blob is stored under.
pub const LAYOUT_STORAGE_KEY: &str = "lightplay_editor_layout";

/// Key/value storage for layout blobs.
pub trait LayoutStore {
    /// Reads the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, PersistError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage rejects the write.
    fn write(&mut self, key: &str, value: &str) -> Result<(), PersistError>;

    /// Removes the value stored under `key`. Missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be modified.
    fn remove(&mut self, key: &str) -> Result<(), PersistError>;
}

/// In-process store with an optional byte quota.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStore {
    /// Creates an unbounded store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that rejects writes once keys and values exceed
    /// `quota` bytes in total.
    #[must_use]
    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: HashMap::new(),
            quota: Some(quota),
        }
    }

    /// Returns the number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl LayoutStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        if let Some(quota) = self.quota {
            let needed = self.used_bytes_without(key) + key.len() + value.len();
            if needed > quota {
                return Err(PersistError::QuotaExceeded { needed, quota });
            }
        }
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Directory-backed store holding one JSON file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the default directory (`<data dir>/lightplay`).
    #[must_use]
    pub fn default_location() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("lightplay"))
    }

    /// Returns the store directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file a key maps to.
    ///
    /// Characters other than ASCII alphanumerics, `-` and `_` are replaced so
    /// a key never escapes the store directory.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

impl LayoutStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, PersistError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(PersistError::Io(err)),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(PersistError::Io(err)),
        }
    }
}

/// Best-effort save/load of the layout under one key.
pub struct LayoutPersistence {
    store: Box<dyn LayoutStore>,
    key: String,
}

impl std::fmt::Debug for LayoutPersistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutPersistence")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl LayoutPersistence {
    /// Creates a persistence handle for `key`.
    #[must_use]
    pub fn new(store: impl LayoutStore + 'static, key: impl Into<String>) -> Self {
        Self {
            store: Box::new(store),
            key: key.into(),
        }
    }

    /// Creates a persistence handle for [`LAYOUT_STORAGE_KEY`].
    #[must_use]
    pub fn with_default_key(store: impl LayoutStore + 'static) -> Self {
        Self::new(store, LAYOUT_STORAGE_KEY)
    }

    /// Returns the storage key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the raw stored blob, if any.
    #[must_use]
    pub fn stored_blob(&self) -> Option<String> {
        self.store.read(&self.key).ok().flatten()
    }

    /// Saves the layout. Failures are logged and reported as `false`.
    pub fn save(&mut self, layout: &DockLayout) -> bool {
        let _span = crate::trace_operation_debug!(span_names::LAYOUT_SAVE, key = %self.key).entered();

        let result = encode(&serialize_layout(layout))
            .and_then(|blob| self.store.write(&self.key, &blob).map(|()| blob.len()));
        match result {
            Ok(bytes) => {
                tracing::debug!(bytes, "Layout saved");
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to save layout");
                false
            }
        }
    }

    /// Loads and resolves the stored layout.
    ///
    /// A missing key, unreadable storage, malformed blob or a tree with no
    /// registered tabs all yield `None`.
    #[must_use]
    pub fn load(&self, registry: &TabTypeRegistry) -> Option<LayoutDescriptor> {
        match self.store.read(&self.key) {
            Ok(Some(blob)) => resolve_blob(&blob, registry),
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(error = %err, "Failed to read stored layout");
                None
            }
        }
    }

    /// Removes the stored layout. Failures are logged and reported as `false`.
    pub fn clear(&mut self) -> bool {
        match self.store.remove(&self.key) {
            Ok(()) => {
                tracing::info!(key = %self.key, "Stored layout cleared");
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to clear stored layout");
                false
            }
        }
    }
}
