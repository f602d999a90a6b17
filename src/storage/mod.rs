//! Durable key-value storage for client-side lists
//!
//! Plays the role browser local storage plays for a web client: string
//! values under short string keys, read once at startup and overwritten on
//! every change.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::{StorageError, StorageResult};

/// Backend able to keep string values across restarts
pub trait DurableStorage: Send + Sync {
    /// Read the value stored under `key`, if any
    fn load(&self, key: &str) -> StorageResult<Option<String>>;

    /// Overwrite the value stored under `key`
    fn save(&self, key: &str, value: &str) -> StorageResult<()>;
}

impl<S: DurableStorage + ?Sized> DurableStorage for std::sync::Arc<S> {
    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).save(key, value)
    }
}

/// Keys become file names, so only a conservative alphabet is accepted
pub(crate) fn validate_key(key: &str) -> StorageResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
