//! Local key-value persistence for the three board collections.
//!
//! Each collection lives under its own fixed key as a JSON array and is always written
//! whole. Reads fail soft: a missing, unreadable, or malformed value loads as an empty
//! collection so callers never see parse errors.

mod file;
mod memory;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

pub use file::FileStore;
pub use memory::MemoryStore;

/// Fixed identifiers for the persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Listings,
    Applications,
    Favorites,
}

impl StoreKey {
    pub const ALL: [StoreKey; 3] = [StoreKey::Listings, StoreKey::Applications, StoreKey::Favorites];

    pub const fn as_str(self) -> &'static str {
        match self {
            StoreKey::Listings => "LISTINGS_V1",
            StoreKey::Applications => "APPLICATIONS_V1",
            StoreKey::Favorites => "FAVORITES_V1",
        }
    }
}

/// Raw string storage, modelled on a device key-value store.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: StoreKey) -> Result<Option<String>, StoreError>;
    fn set(&self, key: StoreKey, value: String) -> Result<(), StoreError>;
    fn remove(&self, key: StoreKey) -> Result<(), StoreError>;

    /// Write several keys in order. Backends that can apply them atomically override this.
    fn set_many(&self, entries: Vec<(StoreKey, String)>) -> Result<(), StoreError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    fn get(&self, key: StoreKey) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: StoreKey, value: String) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: StoreKey) -> Result<(), StoreError> {
        (**self).remove(key)
    }

    fn set_many(&self, entries: Vec<(StoreKey, String)>) -> Result<(), StoreError> {
        (**self).set_many(entries)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage io failure for {key}: {source}")]
    Io {
        key: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("could not encode {key}: {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Load a collection, treating absence and any read or parse failure as empty.
pub fn load_collection<T, S>(store: &S, key: StoreKey) -> Vec<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            warn!(key = key.as_str(), error = %err, "read failed, using empty collection");
            return Vec::new();
        }
    };

    if raw.trim().is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<Vec<T>>(&raw) {
        Ok(items) => {
            debug!(key = key.as_str(), count = items.len(), "collection loaded");
            items
        }
        Err(err) => {
            warn!(key = key.as_str(), error = %err, "malformed collection, using empty collection");
            Vec::new()
        }
    }
}

pub fn encode_collection<T: Serialize>(key: StoreKey, items: &[T]) -> Result<String, StoreError> {
    serde_json::to_string(items).map_err(|source| StoreError::Encode {
        key: key.as_str(),
        source,
    })
}

/// Replace the stored collection with `items`.
pub fn save_collection<T, S>(store: &S, key: StoreKey, items: &[T]) -> Result<(), StoreError>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let encoded = encode_collection(key, items)?;
    store.set(key, encoded)?;
    debug!(key = key.as_str(), count = items.len(), "collection saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_distinct() {
        let mut names: Vec<_> = StoreKey::ALL.iter().map(|key| key.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 3);
        assert_eq!(StoreKey::Listings.as_str(), "LISTINGS_V1");
        assert_eq!(StoreKey::Applications.as_str(), "APPLICATIONS_V1");
    }

    #[test]
    fn missing_key_loads_empty() {
        let store = MemoryStore::default();
        let items: Vec<String> = load_collection(&store, StoreKey::Favorites);
        assert!(items.is_empty());
    }

    #[test]
    fn malformed_json_loads_empty() {
        let store = MemoryStore::default();
        store
            .set(StoreKey::Favorites, "[\"l1\", oops".to_string())
            .expect("set succeeds");
        let items: Vec<String> = load_collection(&store, StoreKey::Favorites);
        assert!(items.is_empty());

        store
            .set(StoreKey::Favorites, "{\"not\":\"an array\"}".to_string())
            .expect("set succeeds");
        let items: Vec<String> = load_collection(&store, StoreKey::Favorites);
        assert!(items.is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let store = MemoryStore::default();
        let ids = vec!["l1".to_string(), "l3".to_string()];
        save_collection(&store, StoreKey::Favorites, &ids).expect("save succeeds");
        let loaded: Vec<String> = load_collection(&store, StoreKey::Favorites);
        assert_eq!(loaded, ids);

        save_collection::<String, _>(&store, StoreKey::Favorites, &[]).expect("save empty");
        let loaded: Vec<String> = load_collection(&store, StoreKey::Favorites);
        assert!(loaded.is_empty());
    }

    #[test]
    fn unavailable_backend_reads_as_empty() {
        struct Offline;

        impl KeyValueStore for Offline {
            fn get(&self, _key: StoreKey) -> Result<Option<String>, StoreError> {
                Err(StoreError::Unavailable("disk offline".to_string()))
            }

            fn set(&self, _key: StoreKey, _value: String) -> Result<(), StoreError> {
                Err(StoreError::Unavailable("disk offline".to_string()))
            }

            fn remove(&self, _key: StoreKey) -> Result<(), StoreError> {
                Err(StoreError::Unavailable("disk offline".to_string()))
            }
        }

        let items: Vec<String> = load_collection(&Offline, StoreKey::Listings);
        assert!(items.is_empty());
        assert!(save_collection(&Offline, StoreKey::Listings, &items).is_err());
    }
}
