use std::io;
use std::path::PathBuf;

/// Abstract interface for raw blob I/O.
///
/// This trait handles the "how" of storage (filesystem vs memory), while
/// [`super::JsonStorage`] handles the "what" (key normalization, serialization,
/// error classification). Names passed in are already normalized.
pub trait StorageBackend: Send + Sync {
    /// Create whatever the backend needs before the first write. Idempotent.
    fn ensure_directories(&self) -> io::Result<()>;

    /// Read a blob. Returns Ok(None) if it does not exist.
    fn read_blob(&self, name: &str) -> io::Result<Option<String>>;

    /// Replace a blob.
    /// MUST be atomic (e.g. write to tmp then rename) so readers never see a
    /// truncated or mixed blob.
    fn write_blob(&self, name: &str, content: &str) -> io::Result<()>;

    /// Delete a blob. Returns false if there was nothing to delete.
    fn delete_blob(&self, name: &str) -> io::Result<bool>;

    /// Where the blob lives. For `FsBackend` this is the real path, for
    /// `MemBackend` a virtual one.
    fn blob_path(&self, name: &str) -> PathBuf;
}
