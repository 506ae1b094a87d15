use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info};
use tripwise_core::{KeyValueStore, RepoResult};

/// Key-value slots persisted as a single JSON object on disk
pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within the process
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_slots(&self) -> RepoResult<BTreeMap<String, String>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_slots(&self, slots: &BTreeMap<String, String>) -> RepoResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, serde_json::to_vec_pretty(slots)?).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> RepoResult<Option<String>> {
        let _guard = self.lock.lock().await;
        let mut slots = self.read_slots().await?;
        Ok(slots.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> RepoResult<()> {
        let _guard = self.lock.lock().await;
        let mut slots = self.read_slots().await?;
        slots.insert(key.to_string(), value.to_string());
        self.write_slots(&slots).await?;
        debug!("Stored slot {} in {}", key, self.path.display());
        Ok(())
    }

    async fn remove(&self, key: &str) -> RepoResult<()> {
        let _guard = self.lock.lock().await;
        let mut slots = self.read_slots().await?;
        if slots.remove(key).is_some() {
            self.write_slots(&slots).await?;
            info!("Removed slot {} from {}", key, self.path.display());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("data.json"));

        assert_eq!(store.get("jwt_token").await.unwrap(), None);
        store.remove("jwt_token").await.unwrap();
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data.json");

        let store = FileStore::new(&path);
        store.set("jwt_token", "abc").await.unwrap();
        store.set("trips", "[]").await.unwrap();
        drop(store);

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("jwt_token").await.unwrap().as_deref(), Some("abc"));

        reopened.remove("jwt_token").await.unwrap();
        assert_eq!(reopened.get("jwt_token").await.unwrap(), None);
        assert_eq!(reopened.get("trips").await.unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileStore::new(&path);
        assert!(store.get("jwt_token").await.is_err());
    }
}
