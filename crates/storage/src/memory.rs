//! In-memory snapshot store.

use gradplan_core::SnapshotRecord;
use super::{SnapshotStore, Result};

/// Keeps the record in process memory. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    record: Option<SnapshotRecord>,
    saves: usize,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding a record.
    pub fn with_record(record: SnapshotRecord) -> Self {
        Self {
            record: Some(record),
            saves: 0,
        }
    }

    /// Number of successful saves.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

#[async_trait::async_trait]
impl SnapshotStore for MemoryStorage {
    async fn load(&self) -> Result<Option<SnapshotRecord>> {
        Ok(self.record.clone())
    }

    async fn save(&mut self, record: &SnapshotRecord) -> Result<()> {
        self.record = Some(record.clone());
        self.saves += 1;
        Ok(())
    }

    async fn clear(&mut self) -> Result<()> {
        self.record = None;
        Ok(())
    }
}
