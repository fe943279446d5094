use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::sync::Mutex;
#[cfg(test)]
use std::sync::atomic::{AtomicBool, Ordering};

use tempfile::NamedTempFile;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode stored value: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// String key → JSON string value, like a mobile async storage.
pub trait KeyValueStorage: Send + Sync {
    /// `Ok(None)` when the key has never been written or was removed.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// One `<key>.json` file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        atomic_write(&self.path_for(key), value.as_bytes())?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Write `content` to `path` via a temp file in the same directory and a rename,
/// so a failed write never leaves a half-written target.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    write_then_persist(path, |file| file.write_all(content))
}

/// Fill a temp file next to `path` with `fill`, then rename it over `path`.
/// If `fill` fails the temp file is dropped and `path` is untouched.
pub fn write_then_persist(
    path: &Path,
    fill: impl FnOnce(&mut NamedTempFile) -> io::Result<()>,
) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    fill(&mut tmp)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// In-process storage for tests. Reads and writes can be made to fail.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(key: &str, value: &str) -> Self {
        let storage = Self::default();
        if let Ok(mut items) = storage.items.lock() {
            items.insert(key.to_string(), value.to_string());
        }
        storage
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::Relaxed);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }

    /// Raw stored value, bypassing the failure switches.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.items.lock().ok()?.get(key).cloned()
    }

    fn check(flag: &AtomicBool, what: &str) -> Result<(), StorageError> {
        if flag.load(Ordering::Relaxed) {
            return Err(StorageError::Unavailable(format!("{} refused", what)));
        }
        Ok(())
    }

    fn items(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.items
            .lock()
            .map_err(|_| StorageError::Unavailable("storage lock poisoned".to_string()))
    }
}

#[cfg(test)]
impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::check(&self.fail_reads, "read")?;
        Ok(self.items()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::check(&self.fail_writes, "write")?;
        self.items()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        Self::check(&self.fail_writes, "remove")?;
        self.items()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_storage_round_trip() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("nested"));
        assert_eq!(storage.get_item("auth-storage").unwrap(), None);

        storage.set_item("auth-storage", "{\"a\":1}").unwrap();
        assert_eq!(
            storage.get_item("auth-storage").unwrap().as_deref(),
            Some("{\"a\":1}")
        );

        storage.set_item("auth-storage", "{\"a\":2}").unwrap();
        assert_eq!(
            storage.get_item("auth-storage").unwrap().as_deref(),
            Some("{\"a\":2}")
        );

        storage.remove_item("auth-storage").unwrap();
        assert_eq!(storage.get_item("auth-storage").unwrap(), None);
        // Removing twice is fine
        storage.remove_item("auth-storage").unwrap();
    }

    #[test]
    fn atomic_write_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("value.json");
        atomic_write(&path, b"one").unwrap();
        atomic_write(&path, b"two").unwrap();
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), "two");
    }

    #[test]
    fn memory_storage_failure_switches() {
        let storage = MemoryStorage::with_item("k", "v");
        storage.fail_writes(true);
        assert!(storage.set_item("k", "w").is_err());
        assert_eq!(storage.peek("k").as_deref(), Some("v"));

        storage.fail_reads(true);
        assert!(matches!(
            storage.get_item("k"),
            Err(StorageError::Unavailable(_))
        ));
        storage.fail_reads(false);
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v"));
    }
}
