use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use super::{KeyValueStore, StoreError, StoreKey};

/// In-process store. `set_many` applies every entry under one lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<StoreKey, String>>,
}

impl MemoryStore {
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<StoreKey, String>>, StoreError> {
        self.entries
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store mutex poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: StoreKey) -> Result<Option<String>, StoreError> {
        Ok(self.lock()?.get(&key).cloned())
    }

    fn set(&self, key: StoreKey, value: String) -> Result<(), StoreError> {
        self.lock()?.insert(key, value);
        Ok(())
    }

    fn remove(&self, key: StoreKey) -> Result<(), StoreError> {
        self.lock()?.remove(&key);
        Ok(())
    }

    fn set_many(&self, entries: Vec<(StoreKey, String)>) -> Result<(), StoreError> {
        let mut guard = self.lock()?;
        for (key, value) in entries {
            guard.insert(key, value);
        }
        Ok(())
    }
}
