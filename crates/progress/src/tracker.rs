//! Progress tracking session.
//!
//! Ties one engine to one snapshot store: every accepted command is saved
//! immediately, and loading falls back from a shared link to the store to an
//! empty snapshot.

use gradplan_core::{Correction, Snapshot, SnapshotRecord, Time};
use gradplan_storage::{DecodeError, QueryShare, ShareChannel, SnapshotStore, StorageError};
use tracing::{info, warn};

use crate::engine::{Finalized, InvalidCommand, ProgressEngine, Transition};

/// Where the session's snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// A shared link payload
    Shared,
    /// The snapshot store
    Stored,
    /// Nothing usable; started empty
    Empty,
}

/// Errors from a tracking session.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// The engine refused the command
    #[error(transparent)]
    Rejected(#[from] InvalidCommand),

    /// An imported payload could not be decoded
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The store failed
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// A progress engine persisted through a snapshot store.
pub struct ProgressTracker<S: SnapshotStore> {
    engine: ProgressEngine,
    store: S,
    share: QueryShare,
    source: LoadSource,
    saved_at: Option<Time>,
}

impl<S: SnapshotStore> ProgressTracker<S> {
    /// Open a session.
    ///
    /// A decodable `shared` payload wins and is written through to the store;
    /// a failed write is logged and the shared progress is still used.
    /// Otherwise the stored snapshot is used, and if that is missing or
    /// unreadable the session starts empty.
    pub async fn open(engine: ProgressEngine, store: S, shared: Option<&str>) -> Result<Self, TrackerError> {
        let mut tracker = Self {
            engine,
            store,
            share: QueryShare::new(),
            source: LoadSource::Empty,
            saved_at: None,
        };

        if let Some(payload) = shared {
            match tracker.share.decode_input(payload) {
                Ok(snapshot) => {
                    tracker.engine.replace(snapshot);
                    tracker.source = LoadSource::Shared;
                    if let Err(e) = tracker.persist().await {
                        warn!("Shared progress loaded but not saved: {}", e);
                    }
                    info!("Loaded progress from shared link");
                    return Ok(tracker);
                }
                Err(e) => warn!("Ignoring shared progress: {}", e),
            }
        }

        match tracker.store.load().await {
            Ok(Some(record)) => {
                tracker.saved_at = record.timestamp;
                tracker.engine.replace(Snapshot::from(record));
                tracker.source = LoadSource::Stored;
                info!("Loaded saved progress");
            }
            Ok(None) => info!("No saved progress, starting empty"),
            Err(e) => warn!("Saved progress is unreadable, starting empty: {}", e),
        }

        Ok(tracker)
    }

    /// The engine, for queries.
    pub fn engine(&self) -> &ProgressEngine {
        &self.engine
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Where the snapshot was loaded from.
    pub fn source(&self) -> LoadSource {
        self.source
    }

    /// When the snapshot was last written.
    pub fn saved_at(&self) -> Option<Time> {
        self.saved_at
    }

    async fn persist(&mut self) -> Result<(), TrackerError> {
        let record = SnapshotRecord::stamped(self.engine.snapshot());
        self.store.save(&record).await?;
        self.saved_at = record.timestamp;
        Ok(())
    }

    /// Save after a command, or put `previous` back if the store refuses.
    async fn commit(&mut self, previous: Snapshot) -> Result<(), TrackerError> {
        if let Err(e) = self.persist().await {
            warn!("Save failed, keeping previous progress: {}", e);
            self.engine.restore(previous);
            return Err(e);
        }
        Ok(())
    }

    /// Advance a subject and save.
    pub async fn toggle(&mut self, name: &str) -> Result<Transition, TrackerError> {
        let previous = self.engine.snapshot().clone();
        let transition = self.engine.toggle(name)?;
        self.commit(previous).await?;
        Ok(transition)
    }

    /// Finalize a period and save.
    pub async fn finalize_period(&mut self, index: usize) -> Result<Finalized, TrackerError> {
        let previous = self.engine.snapshot().clone();
        let finalized = self.engine.finalize_period(index)?;
        self.commit(previous).await?;
        Ok(finalized)
    }

    /// Replace progress with a shared link or payload and save.
    ///
    /// On a decode or save error the current progress is kept.
    pub async fn import(&mut self, input: &str) -> Result<Vec<Correction>, TrackerError> {
        let snapshot = self.share.decode_input(input)?;
        let previous = self.engine.snapshot().clone();
        let corrections = self.engine.replace(snapshot);
        self.commit(previous).await?;
        self.source = LoadSource::Shared;
        info!("Imported shared progress");
        Ok(corrections)
    }

    /// Clear the store, then progress.
    pub async fn reset(&mut self) -> Result<(), TrackerError> {
        self.store.clear().await?;
        self.engine.reset();
        self.saved_at = None;
        Ok(())
    }

    /// Encoded payload for the current progress.
    pub fn share_payload(&self) -> String {
        self.share.encode(self.engine.snapshot())
    }

    /// Link to `base` carrying the current progress.
    pub fn share_url(&self, base: &str) -> String {
        self.share.share_url(base, self.engine.snapshot())
    }
}
