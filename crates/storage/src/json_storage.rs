//! JSON file storage implementation.
//!
//! Stores the snapshot record as `progress.json` in a data directory and keeps
//! a small meta marker (save counter + updated_at) next to it.

use std::path::{Path, PathBuf};

use gradplan_core::SnapshotRecord;
use super::{SnapshotStore, Result};
use tokio::fs;
use tracing::debug;

const RECORD_FILE: &str = "progress.json";
const META_FILE: &str = "progress.meta.json";

/// File-based JSON snapshot store.
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    /// Create storage, creating the data directory and its `meta/`
    /// subdirectory if needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        fs::create_dir_all(root.join("meta")).await?;

        Ok(Self { root })
    }

    /// Data directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self) -> PathBuf {
        self.root.join(RECORD_FILE)
    }

    fn meta_path(&self) -> PathBuf {
        self.root.join("meta").join(META_FILE)
    }

    /// Number of saves recorded in the meta marker.
    pub async fn version(&self) -> Result<u64> {
        let version = match fs::read_to_string(self.meta_path()).await {
            Ok(s) => serde_json::from_str::<serde_json::Value>(&s)
                .ok()
                .and_then(|json| json.get("version").and_then(|v| v.as_u64()))
                .unwrap_or(0),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => 0,
            Err(e) => return Err(e.into()),
        };
        Ok(version)
    }

    /// Read and increment the save counter, return the new value.
    async fn bump_version(&self) -> Result<u64> {
        let version = self.version().await? + 1;
        let meta = serde_json::json!({"version": version, "updated_at": chrono::Utc::now()});
        fs::write(self.meta_path(), serde_json::to_string_pretty(&meta)?.as_bytes()).await?;
        Ok(version)
    }
}

#[async_trait::async_trait]
impl SnapshotStore for JsonStorage {
    async fn load(&self) -> Result<Option<SnapshotRecord>> {
        read_json(&self.record_path()).await
    }

    async fn save(&mut self, record: &SnapshotRecord) -> Result<()> {
        let json = serde_json::to_string_pretty(record)?;
        fs::write(self.record_path(), json.as_bytes()).await?;

        let version = self.bump_version().await?;
        debug!("Saved snapshot to {} (version {})", self.record_path().display(), version);
        Ok(())
    }

    async fn clear(&mut self) -> Result<()> {
        for path in [self.record_path(), self.meta_path()] {
            fs::remove_file(&path).await.or_else(|e| {
                if e.kind() == std::io::ErrorKind::NotFound { Ok(()) } else { Err(e) }
            })?;
        }
        debug!("Cleared snapshot in {}", self.root.display());
        Ok(())
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StorageError;

    fn sample_record() -> SnapshotRecord {
        SnapshotRecord {
            completed: vec!["Ética".to_string()],
            current: vec!["Economia".to_string()],
            planned: vec![],
            finalized_periods: vec![6],
            timestamp: Some(chrono::Utc::now()),
        }
    }

    #[tokio::test]
    async fn test_load_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path()).await.unwrap();

        assert!(storage.load().await.unwrap().is_none());
        assert_eq!(storage.version().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(dir.path()).await.unwrap();
        let record = sample_record();

        storage.save(&record).await.unwrap();
        storage.save(&record).await.unwrap();

        let loaded = storage.load().await.unwrap().unwrap();
        assert_eq!(loaded, record);
        assert_eq!(storage.version().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_clear_removes_record() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(dir.path()).await.unwrap();

        storage.save(&sample_record()).await.unwrap();
        storage.clear().await.unwrap();
        storage.clear().await.unwrap();

        assert!(storage.load().await.unwrap().is_none());
        assert_eq!(storage.version().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path()).await.unwrap();
        std::fs::write(dir.path().join(RECORD_FILE), "{not json").unwrap();

        assert!(matches!(storage.load().await, Err(StorageError::Json(_))));
    }
}
