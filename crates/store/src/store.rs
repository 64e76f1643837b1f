// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! Key-value stores
//!

use crate::StoreError;
use async_trait::async_trait;
use log::debug;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

/// Implementing types store string values under string keys
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Get the value stored under the key (if any)
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store a value under the key (replacing any value already there)
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove the value stored under the key (if any)
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Check a key is made of lowercase ASCII letters, digits and `-`
fn validate_key(key: &str) -> Result<(), StoreError> {
    let is_valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if is_valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

/// A store keeping each value in its own `<key>.json` file in a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Use the directory as a store (it's created on the first write)
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path(key)?;
        tokio::fs::create_dir_all(&self.root).await?;

        // Write then rename, so a value is never half written
        let temp_path = self.root.join(format!(".{key}.json.tmp"));
        tokio::fs::write(&temp_path, value).await?;
        tokio::fs::rename(&temp_path, &path).await?;
        debug!("stored {} bytes at {}", value.len(), path.display());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}

/// A store that keeps values in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        self.values.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tempdir::TempDir;

    async fn exercise(store: &dyn KeyValueStore) {
        assert_eq!(store.get("timeline-data").await.unwrap(), None);
        store.set("timeline-data", "[1]").await.unwrap();
        assert_eq!(store.get("timeline-data").await.unwrap().as_deref(), Some("[1]"));
        store.set("timeline-data", "[2]").await.unwrap();
        assert_eq!(store.get("timeline-data").await.unwrap().as_deref(), Some("[2]"));
        store.remove("timeline-data").await.unwrap();
        store.remove("timeline-data").await.unwrap();
        assert_eq!(store.get("timeline-data").await.unwrap(), None);

        for key in ["", "../escape", "Upper", "a/b", "with space"] {
            assert!(matches!(
                store.get(key).await,
                Err(StoreError::InvalidKey(_))
            ));
        }
    }

    #[tokio::test]
    async fn memory_store() {
        exercise(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn file_store() {
        let dir = TempDir::new("timeline-pro-store").unwrap();
        let store = FileStore::new(dir.path().join("nested"));
        exercise(&store).await;

        // Values survive the store
        store.set("timeline-settings", "{}").await.unwrap();
        let reopened = FileStore::new(store.root());
        assert_eq!(
            reopened.get("timeline-settings").await.unwrap().as_deref(),
            Some("{}")
        );
        assert!(dir.path().join("nested/timeline-settings.json").is_file());
    }
}
