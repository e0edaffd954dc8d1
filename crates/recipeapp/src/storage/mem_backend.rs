use super::backend::StorageBackend;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// In-memory storage backend for testing.
///
/// Uses a `Mutex` rather than `RefCell` because the store is shared across
/// threads. Writes and reads can be made to fail on demand.
#[derive(Default)]
pub struct MemBackend {
    blobs: Mutex<HashMap<String, String>>,
    simulate_write_error: AtomicBool,
    simulate_read_error: AtomicBool,
    writes: AtomicUsize,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.store(simulate, Ordering::SeqCst);
    }

    /// Enable read error simulation (a non-"missing" failure).
    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.simulate_read_error.store(simulate, Ordering::SeqCst);
    }

    /// Test helper to plant raw content, e.g. a corrupt snapshot.
    pub fn insert_raw(&self, name: &str, content: &str) {
        self.blobs
            .lock()
            .insert(name.to_string(), content.to_string());
    }

    /// Test helper to inspect what was last written.
    pub fn raw(&self, name: &str) -> Option<String> {
        self.blobs.lock().get(name).cloned()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl StorageBackend for MemBackend {
    fn ensure_directories(&self) -> io::Result<()> {
        Ok(())
    }

    fn read_blob(&self, name: &str) -> io::Result<Option<String>> {
        if self.simulate_read_error.load(Ordering::SeqCst) {
            return Err(io::Error::other("Simulated read error"));
        }
        Ok(self.blobs.lock().get(name).cloned())
    }

    fn write_blob(&self, name: &str, content: &str) -> io::Result<()> {
        if self.simulate_write_error.load(Ordering::SeqCst) {
            return Err(io::Error::other("Simulated write error"));
        }
        self.blobs
            .lock()
            .insert(name.to_string(), content.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn delete_blob(&self, name: &str) -> io::Result<bool> {
        if self.simulate_write_error.load(Ordering::SeqCst) {
            return Err(io::Error::other("Simulated write error"));
        }
        Ok(self.blobs.lock().remove(name).is_some())
    }

    fn blob_path(&self, name: &str) -> PathBuf {
        PathBuf::from(format!("/mem/{}", name))
    }
}
