use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;
use uuid::Uuid;

use super::{KeyValueStore, StoreError, StoreKey};

/// Directory-backed store: key `K` lives in `<root>/K.json`.
///
/// Every write lands in a temp file that is renamed over the target, so a single key is
/// never left half-written. Writes to different keys are separate renames.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: StoreKey) -> PathBuf {
        self.root.join(format!("{}.json", key.as_str()))
    }

    fn io_error(key: StoreKey) -> impl FnOnce(std::io::Error) -> StoreError {
        move |source| StoreError::Io {
            key: key.as_str(),
            source,
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: StoreKey) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(Self::io_error(key)(err)),
        }
    }

    fn set(&self, key: StoreKey, value: String) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root).map_err(Self::io_error(key))?;

        let target = self.path_for(key);
        let temp_path = self
            .root
            .join(format!(".{}.{}.tmp", key.as_str(), Uuid::new_v4().simple()));

        let write = || -> std::io::Result<()> {
            let mut file = fs::OpenOptions::new()
                .create_new(true)
                .write(true)
                .open(&temp_path)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
            drop(file);
            fs::rename(&temp_path, &target)
        };

        if let Err(err) = write() {
            let _ = fs::remove_file(&temp_path);
            return Err(Self::io_error(key)(err));
        }

        debug!(path = %target.display(), bytes = value.len(), "key written");
        Ok(())
    }

    fn remove(&self, key: StoreKey) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(Self::io_error(key)(err)),
        }
    }
}
