//! In-process storage, for tests and headless clients

use std::collections::HashMap;

use parking_lot::Mutex;

use super::{validate_key, DurableStorage};
use crate::error::StorageResult;

#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-filled with one value
    pub fn with_value(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .values
            .lock()
            .insert(key.to_string(), value.to_string());
        storage
    }

    /// Raw value under `key`, bypassing validation
    pub fn get(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }
}

impl DurableStorage for MemoryStorage {
    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        validate_key(key)?;
        Ok(self.get(key))
    }

    fn save(&self, key: &str, value: &str) -> StorageResult<()> {
        validate_key(key)?;
        self.values
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
