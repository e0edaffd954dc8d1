use super::backend::StorageBackend;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;
use uuid::Uuid;

/// One file per blob, directly under `data_dir`, named exactly by the
/// normalized key (no extension).
pub struct FsBackend {
    data_dir: PathBuf,
}

impl FsBackend {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

impl StorageBackend for FsBackend {
    fn ensure_directories(&self) -> io::Result<()> {
        fs::create_dir_all(&self.data_dir)
    }

    fn read_blob(&self, name: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.blob_path(name)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write_blob(&self, name: &str, content: &str) -> io::Result<()> {
        let target = self.blob_path(name);

        // Atomic write: the tmp file sits next to the target so rename never
        // crosses a filesystem boundary.
        let tmp = self.data_dir.join(format!(".{}-{}.tmp", name, Uuid::new_v4()));
        if let Err(e) = fs::write(&tmp, content).and_then(|_| fs::rename(&tmp, &target)) {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                if cleanup.kind() != io::ErrorKind::NotFound {
                    warn!(path = %tmp.display(), error = %cleanup, "could not remove temp file");
                }
            }
            return Err(e);
        }
        Ok(())
    }

    fn delete_blob(&self, name: &str) -> io::Result<bool> {
        match fs::remove_file(self.blob_path(name)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn blob_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(name)
    }
}
