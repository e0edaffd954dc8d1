//! # Persistence Layer
//!
//! Durable storage of named blobs of JSON. A logical key such as `"recipes"` is
//! normalized with [`normalize_key`] and the result names the blob.
//!
//! ## Split
//!
//! - [`backend::StorageBackend`]: raw string I/O. [`fs_backend::FsBackend`] in
//!   production, [`mem_backend::MemBackend`] in tests.
//! - [`JsonStorage`]: the typed layer on top. Normalizes keys, serializes values,
//!   and classifies failures into [`RecipeError`] kinds.
//!
//! ## Guarantees
//!
//! - `store` replaces the previous blob atomically. A crash mid-write leaves
//!   either the old content or the new content, never a mix.
//! - `read` distinguishes a missing blob (`NotFound`) from a blob that does not
//!   parse (`ParseError`) and from I/O failure (`IoError`).
//! - `store` does not serialize writers. Callers that can race on one key must
//!   hold their own lock (the recipe store does).
//!
//! ## Storage Layout
//!
//! ```text
//! <data_dir>/
//! ├── recipes              # The whole recipe collection, one JSON array
//! └── .recipes-{uuid}.tmp  # Only while a write is in flight
//! ```

use crate::error::{RecipeError, Result};
use crate::slug::normalize_key;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;

use backend::StorageBackend;
use fs_backend::FsBackend;
use mem_backend::MemBackend;

/// Production storage: JSON files on disk.
pub type JsonDiskStorage = JsonStorage<FsBackend>;

/// Test storage: JSON strings in memory.
pub type MemStorage = JsonStorage<MemBackend>;

pub struct JsonStorage<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
}

impl JsonStorage<FsBackend> {
    pub fn on_disk(data_dir: impl Into<PathBuf>) -> Self {
        Self::with_backend(FsBackend::new(data_dir))
    }
}

impl JsonStorage<MemBackend> {
    pub fn in_memory() -> Self {
        Self::with_backend(MemBackend::new())
    }
}

impl<B: StorageBackend> JsonStorage<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Create the data directory tree. Safe to call repeatedly.
    pub fn ensure_directories(&self) -> Result<()> {
        self.backend.ensure_directories().map_err(|e| {
            RecipeError::io(self.backend.blob_path("").display().to_string(), e)
        })
    }

    /// Serialize `value` and atomically replace the blob for `key`.
    pub fn store<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let name = blob_name(key)?;
        let content = serde_json::to_string_pretty(value).map_err(|e| {
            RecipeError::InvalidArgument(format!("could not serialize '{}': {}", key, e))
        })?;
        self.backend
            .write_blob(&name, &content)
            .map_err(|e| RecipeError::io(key, e))?;
        debug!(key, bytes = content.len(), "stored blob");
        Ok(())
    }

    /// Read and deserialize the blob for `key`.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let name = blob_name(key)?;
        let content = self
            .backend
            .read_blob(&name)
            .map_err(|e| RecipeError::io(key, e))?
            .ok_or_else(|| RecipeError::NotFound(format!("no stored data for key '{}'", key)))?;
        serde_json::from_str(&content).map_err(|e| RecipeError::parse(key, e))
    }

    /// Delete the blob for `key`.
    pub fn remove(&self, key: &str) -> Result<()> {
        let name = blob_name(key)?;
        let existed = self
            .backend
            .delete_blob(&name)
            .map_err(|e| RecipeError::io(key, e))?;
        if !existed {
            return Err(RecipeError::NotFound(format!(
                "no stored data for key '{}'",
                key
            )));
        }
        Ok(())
    }

    /// The path backing `key`, for diagnostics.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        Ok(self.backend.blob_path(&blob_name(key)?))
    }
}

fn blob_name(key: &str) -> Result<String> {
    let name = normalize_key(key);
    if name.is_empty() {
        return Err(RecipeError::InvalidArgument(format!(
            "storage key '{}' has no usable characters",
            key
        )));
    }
    Ok(name)
}
