use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;

use super::storage::{KeyValueStorage, StorageError};
use crate::core::user::User;

/// Storage key of the persisted session record.
pub const SESSION_KEY: &str = "auth-storage";

/// On-disk shape: `{"state":{"user":<User>|null}}`.
#[derive(Debug, Serialize, Deserialize)]
struct SessionEnvelope {
    state: SessionSnapshot,
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionSnapshot {
    user: Option<User>,
}

pub fn encode_session(user: Option<&User>) -> Result<String, StorageError> {
    let envelope = SessionEnvelope {
        state: SessionSnapshot {
            user: user.cloned(),
        },
    };
    Ok(serde_json::to_string(&envelope)?)
}

pub fn decode_session(raw: &str) -> Result<Option<User>, StorageError> {
    let envelope: SessionEnvelope = serde_json::from_str(raw)?;
    Ok(envelope.state.user)
}

#[derive(Debug, Default)]
struct SessionCell {
    user: Option<User>,
    hydrated: bool,
    /// Bumped on every `set_user`.
    generation: u64,
}

/// Process-wide holder of the logged-in user.
///
/// Clones share the same cell, so every screen holding a handle observes a
/// mutation immediately. Every mutation is written through to storage.
#[derive(Clone)]
pub struct SessionStore {
    cell: Arc<RwLock<SessionCell>>,
    storage: Arc<dyn KeyValueStorage>,
    write_lock: Arc<Mutex<()>>,
    /// Set once the persisted record has been loaded.
    rehydrated: Arc<OnceCell<()>>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("user", &self.user())
            .field("hydrated", &self.is_hydrated())
            .finish()
    }
}

impl SessionStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            cell: Arc::new(RwLock::new(SessionCell::default())),
            storage,
            write_lock: Arc::new(Mutex::new(())),
            rehydrated: Arc::new(OnceCell::new()),
        }
    }

    pub fn user(&self) -> Option<User> {
        self.read().user.clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.read().user.is_some()
    }

    /// True once `rehydrate` has finished (successfully or not).
    pub fn is_hydrated(&self) -> bool {
        self.read().hydrated
    }

    /// Replace the session and persist it. A storage failure is logged and
    /// leaves the in-memory value updated.
    pub fn set_user(&self, user: Option<User>) {
        let generation = {
            let mut cell = self.write();
            cell.user = user.clone();
            cell.generation += 1;
            cell.generation
        };

        match &user {
            Some(u) => log::info!("Session set for {}", u.username),
            None => log::info!("Session cleared"),
        }

        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        // A newer set_user already holds (or will write) a fresher value.
        if self.read().generation != generation {
            log::debug!("Skipping stale session write (generation {})", generation);
            return;
        }
        let result = encode_session(user.as_ref())
            .and_then(|raw| self.storage.set_item(SESSION_KEY, &raw));
        if let Err(e) = result {
            log::warn!("Failed to persist session: {}", e);
        }
    }

    /// Load the persisted session into memory. Storage is read once per store;
    /// a call that overlaps the first load waits for it, later calls return
    /// the current value.
    ///
    /// A missing, unreadable or corrupt record counts as logged out. Any
    /// `set_user` issued before the load finishes is newer than the record and wins.
    pub async fn rehydrate(&self) -> Option<User> {
        self.rehydrated.get_or_init(|| self.load()).await;
        self.user()
    }

    async fn load(&self) {
        let storage = Arc::clone(&self.storage);
        let loaded = match tokio::task::spawn_blocking(move || storage.get_item(SESSION_KEY)).await {
            Ok(Ok(Some(raw))) => match decode_session(&raw) {
                Ok(user) => user,
                Err(e) => {
                    log::warn!("Discarding unreadable session record: {}", e);
                    None
                }
            },
            Ok(Ok(None)) => None,
            Ok(Err(e)) => {
                log::warn!("Failed to read session record: {}", e);
                None
            }
            Err(e) => {
                log::warn!("Session rehydration task failed: {}", e);
                None
            }
        };

        let mut cell = self.write();
        if cell.generation == 0 {
            cell.user = loaded;
        } else {
            log::debug!("Session changed during rehydration, keeping the newer value");
        }
        cell.hydrated = true;
        log::info!("Session rehydrated (logged in: {})", cell.user.is_some());
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionCell> {
        self.cell.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionCell> {
        self.cell.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::storage::{FileStorage, MemoryStorage, write_then_persist};
    use std::io::{self, Write};
    use std::time::Duration;
    use tempfile::TempDir;

    /// Persisted record that takes a while to read.
    struct SlowStorage {
        inner: MemoryStorage,
        delay: Duration,
    }

    impl KeyValueStorage for SlowStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            std::thread::sleep(self.delay);
            self.inner.get_item(key)
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.inner.set_item(key, value)
        }

        fn remove_item(&self, key: &str) -> Result<(), StorageError> {
            self.inner.remove_item(key)
        }
    }

    fn emily() -> User {
        User {
            id: 1,
            username: "emilys".into(),
            first_name: "Emily".into(),
            last_name: "Johnson".into(),
            gender: "female".into(),
            image: "https://dummyjson.com/icon/emilys/128".into(),
        }
    }

    fn michael() -> User {
        User {
            id: 2,
            username: "michaelw".into(),
            first_name: "Michael".into(),
            last_name: "Williams".into(),
            gender: "male".into(),
            image: "https://dummyjson.com/icon/michaelw/128".into(),
        }
    }

    #[test]
    fn absence_is_encoded_as_null() {
        let raw = encode_session(None).unwrap();
        assert_eq!(raw, r#"{"state":{"user":null}}"#);
        assert_eq!(decode_session(&raw).unwrap(), None);

        let raw = encode_session(Some(&emily())).unwrap();
        assert!(raw.contains("\"firstName\":\"Emily\""));
        assert_eq!(decode_session(&raw).unwrap(), Some(emily()));
    }

    #[test]
    fn clones_observe_mutations_immediately() {
        let store = SessionStore::new(Arc::new(MemoryStorage::new()));
        let reader = store.clone();
        assert_eq!(reader.user(), None);

        store.set_user(Some(emily()));
        assert_eq!(reader.user(), Some(emily()));
        assert!(reader.is_logged_in());

        store.set_user(None);
        assert_eq!(reader.user(), None);
    }

    #[tokio::test]
    async fn login_survives_restart() {
        let dir = TempDir::new().unwrap();
        let first = SessionStore::new(Arc::new(FileStorage::new(dir.path())));
        first.rehydrate().await;
        first.set_user(Some(emily()));
        drop(first);

        let second = SessionStore::new(Arc::new(FileStorage::new(dir.path())));
        assert!(!second.is_hydrated());
        assert_eq!(second.rehydrate().await, Some(emily()));
        assert!(second.is_hydrated());
        assert_eq!(second.user(), Some(emily()));
    }

    #[tokio::test]
    async fn logout_survives_restart() {
        let dir = TempDir::new().unwrap();
        let first = SessionStore::new(Arc::new(FileStorage::new(dir.path())));
        first.set_user(Some(emily()));
        first.set_user(None);

        let raw = std::fs::read_to_string(dir.path().join("auth-storage.json")).unwrap();
        assert_eq!(raw, r#"{"state":{"user":null}}"#);

        let second = SessionStore::new(Arc::new(FileStorage::new(dir.path())));
        assert_eq!(second.rehydrate().await, None);
        assert!(second.is_hydrated());
    }

    #[tokio::test]
    async fn missing_record_rehydrates_as_logged_out() {
        let store = SessionStore::new(Arc::new(MemoryStorage::new()));
        assert_eq!(store.rehydrate().await, None);
        assert!(store.is_hydrated());
    }

    #[tokio::test]
    async fn corrupt_record_rehydrates_as_logged_out() {
        let storage = MemoryStorage::with_item(SESSION_KEY, "{not json");
        let store = SessionStore::new(Arc::new(storage));
        assert_eq!(store.rehydrate().await, None);
        assert!(store.is_hydrated());
    }

    #[tokio::test]
    async fn read_failure_rehydrates_as_logged_out() {
        let storage = MemoryStorage::with_item(SESSION_KEY, &encode_session(Some(&emily())).unwrap());
        storage.fail_reads(true);
        let store = SessionStore::new(Arc::new(storage));
        assert_eq!(store.rehydrate().await, None);
        assert!(store.is_hydrated());
    }

    #[tokio::test]
    async fn rehydrate_runs_once() {
        let storage = Arc::new(MemoryStorage::with_item(
            SESSION_KEY,
            &encode_session(Some(&emily())).unwrap(),
        ));
        let store = SessionStore::new(storage.clone());
        assert_eq!(store.rehydrate().await, Some(emily()));

        storage
            .set_item(SESSION_KEY, &encode_session(Some(&michael())).unwrap())
            .unwrap();
        assert_eq!(store.rehydrate().await, Some(emily()));
    }

    #[tokio::test]
    async fn set_before_rehydrate_wins() {
        let storage = Arc::new(MemoryStorage::with_item(
            SESSION_KEY,
            &encode_session(Some(&emily())).unwrap(),
        ));
        let store = SessionStore::new(storage.clone());
        store.set_user(Some(michael()));
        assert_eq!(store.rehydrate().await, Some(michael()));
        assert_eq!(
            decode_session(&storage.peek(SESSION_KEY).unwrap()).unwrap(),
            Some(michael())
        );
    }

    #[tokio::test]
    async fn failed_write_keeps_memory_and_prior_record() {
        let storage = Arc::new(MemoryStorage::with_item(
            SESSION_KEY,
            &encode_session(Some(&emily())).unwrap(),
        ));
        let store = SessionStore::new(storage.clone());
        store.rehydrate().await;

        storage.fail_writes(true);
        store.set_user(None);
        assert_eq!(store.user(), None);

        // The previous record is intact and is what the next process sees.
        storage.fail_writes(false);
        let next = SessionStore::new(storage.clone());
        assert_eq!(next.rehydrate().await, Some(emily()));
    }

    #[tokio::test]
    async fn overlapping_rehydrate_waits_for_first_load() {
        let storage = SlowStorage {
            inner: MemoryStorage::with_item(SESSION_KEY, &encode_session(Some(&emily())).unwrap()),
            delay: Duration::from_millis(200),
        };
        let store = SessionStore::new(Arc::new(storage));
        let other = store.clone();

        let first = tokio::spawn(async move { other.rehydrate().await });
        tokio::time::sleep(Duration::from_millis(50)).await;
        let second = store.rehydrate().await;

        assert_eq!(second, Some(emily()));
        assert!(store.is_hydrated());
        assert_eq!(first.await.unwrap(), Some(emily()));
    }

    #[tokio::test]
    async fn interrupted_file_write_keeps_prior_record() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());
        let first = SessionStore::new(Arc::new(storage.clone()));
        first.set_user(Some(emily()));

        // Half of the new record reaches the temp file, then the write fails.
        let raw = encode_session(Some(&michael())).unwrap();
        let result = write_then_persist(&storage.path_for(SESSION_KEY), |file| {
            file.write_all(&raw.as_bytes()[..raw.len() / 2])?;
            Err(io::Error::other("disk full"))
        });
        assert!(result.is_err());

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);

        let next = SessionStore::new(Arc::new(storage));
        assert_eq!(next.rehydrate().await, Some(emily()));
    }
}
