//! # Key-Value Backends
//!
//! The persistence capability behind the cart: named string slots with
//! get / set / remove. The cart only ever uses two keys ([`crate::CART_KEY`]
//! and [`crate::COUPON_KEY`]), each holding one serialized value, so the
//! backend stays deliberately dumb. Writes are last-writer-wins; there are
//! no transactions.
//!
//! Two backends ship:
//!
//! - [`FileStore`]: one file per key under the app data directory. This is
//!   what production runs use, and what makes the cart survive restarts.
//! - [`MemoryStore`]: a HashMap. For tests and ephemeral sessions.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{StoreError, StoreResult};

// =============================================================================
// StringStore Trait
// =============================================================================

/// A named-slot string store.
///
/// Keys are plain names (no path separators); values are whole strings,
/// replaced atomically from the caller's point of view. `remove` of an
/// absent key is a no-op, so clearing is idempotent.
pub trait StringStore {
    /// Reads the value under `key`, or `None` when the key is absent.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Writes `value` under `key`, overwriting any previous value.
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;

    /// Removes `key` entirely. Absent keys are fine.
    fn remove(&mut self, key: &str) -> StoreResult<()>;
}

// =============================================================================
// File Store
// =============================================================================

/// File-backed store: one file per key inside a data directory.
///
/// ## Layout
/// ```text
/// <data dir>/
///   carrito         ← the cart snapshot (JSON array)
///   cuponAplicado   ← the active coupon code
/// ```
///
/// Absence of a file is the "key absent" state, so `remove` deletes the
/// file rather than truncating it.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens a file store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StoreError::DataDir {
            path: dir.clone(),
            source,
        })?;
        debug!(dir = %dir.display(), "File store ready");
        Ok(FileStore { dir })
    }

    /// The directory this store writes into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl StringStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        fs::write(self.path_for(key), value).map_err(|source| StoreError::Io {
            key: key.to_string(),
            source,
        })
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}

// =============================================================================
// Memory Store
// =============================================================================

/// In-memory store backed by a HashMap.
///
/// Nothing survives the process; useful for tests and for running the
/// storefront without touching the disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl StringStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        self.values.remove(key);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
