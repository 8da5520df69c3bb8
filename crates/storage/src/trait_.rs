//! Snapshot store trait abstraction.

use async_trait::async_trait;
use gradplan_core::SnapshotRecord;

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Where the student's snapshot lives between sessions.
///
/// Implementations hold a single record; `save` replaces it.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Load the saved record, if any.
    async fn load(&self) -> Result<Option<SnapshotRecord>>;

    /// Save a record, replacing the previous one.
    async fn save(&mut self, record: &SnapshotRecord) -> Result<()>;

    /// Remove the saved record.
    async fn clear(&mut self) -> Result<()>;
}
