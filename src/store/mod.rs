pub mod session;
pub mod storage;

pub use session::{SESSION_KEY, SessionStore};
pub use storage::{FileStorage, KeyValueStorage, StorageError};
#[cfg(test)]
pub use storage::MemoryStorage;
