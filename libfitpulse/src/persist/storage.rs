//! Key-value backends for snapshot bytes

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::{Result, StorageError};

/// Byte store addressed by string keys
///
/// Implementations must be safe to share across threads; every call is
/// independent and may fail.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    fn set(&self, key: &str, value: &[u8]) -> Result<()>;
}

/// One file per key inside a directory
///
/// Writes go to a sibling temp file which is then renamed over the target,
/// so a reader never sees a half-written snapshot.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`; characters outside `[A-Za-z0-9_-]` become `_`
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
        self.dir.join(format!("{}.json", name))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key);
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e).into()),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        std::fs::create_dir_all(&self.dir).map_err(StorageError::Io)?;

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value).map_err(StorageError::Io)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&tmp, permissions).map_err(StorageError::Io)?;
        }

        std::fs::rename(&tmp, &path).map_err(StorageError::Io)?;
        tracing::trace!(path = %path.display(), bytes = value.len(), "Wrote snapshot file");
        Ok(())
    }
}

/// In-process store for tests, with switchable failures
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
    fail_reads: RwLock<bool>,
    fail_writes: RwLock<bool>,
    writes: RwLock<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(self, key: &str, value: impl Into<Vec<u8>>) -> Self {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.to_string(), value.into());
        }
        self
    }

    pub fn set_fail_reads(&self, fail: bool) {
        if let Ok(mut flag) = self.fail_reads.write() {
            *flag = fail;
        }
    }

    pub fn set_fail_writes(&self, fail: bool) {
        if let Ok(mut flag) = self.fail_writes.write() {
            *flag = fail;
        }
    }

    /// Number of successful `set` calls so far
    pub fn write_count(&self) -> usize {
        self.writes.read().map(|n| *n).unwrap_or(0)
    }

    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.read().ok()?.get(key).cloned()
    }

    fn flag(lock: &RwLock<bool>) -> bool {
        lock.read().map(|flag| *flag).unwrap_or(false)
    }
}

fn poisoned() -> StorageError {
    StorageError::Unavailable("memory store lock poisoned".to_string())
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        if Self::flag(&self.fail_reads) {
            return Err(StorageError::Unavailable("read failure injected".to_string()).into());
        }
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        if Self::flag(&self.fail_writes) {
            return Err(StorageError::Unavailable("write failure injected".to_string()).into());
        }
        self.entries
            .write()
            .map_err(|_| poisoned())?
            .insert(key.to_string(), value.to_vec());
        *self.writes.write().map_err(|_| poisoned())? += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("nested"));

        assert!(store.get("persist:root").unwrap().is_none());
        store.set("persist:root", b"{\"version\":1}").unwrap();
        assert_eq!(
            store.get("persist:root").unwrap().as_deref(),
            Some(&b"{\"version\":1}"[..])
        );
        assert!(dir.path().join("nested").join("persist_root.json").exists());
    }

    #[test]
    fn test_file_store_overwrite_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        store.set("k", b"one").unwrap();
        store.set("k", b"two").unwrap();

        assert_eq!(store.get("k").unwrap().as_deref(), Some(&b"two"[..]));
        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_permissions() {
        use std::os::unix::fs::PermissionsExt;
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        store.set("k", b"{}").unwrap();
        let mode = std::fs::metadata(store.path_for("k")).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_memory_store_injected_failures() {
        let store = MemoryStore::new().with_entry("k", "v");
        store.set_fail_reads(true);
        assert!(store.get("k").is_err());
        store.set_fail_reads(false);
        assert_eq!(store.get("k").unwrap().as_deref(), Some(&b"v"[..]));

        store.set_fail_writes(true);
        assert!(store.set("k", b"w").is_err());
        assert_eq!(store.write_count(), 0);
    }
}
