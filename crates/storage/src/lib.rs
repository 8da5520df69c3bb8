//! Snapshot persistence and sharing for GradPlan.
//!
//! This crate provides a trait-based snapshot store with a JSON file
//! implementation, an in-memory store, and the query-string share channel.

#![warn(missing_docs)]

pub mod trait_;
pub mod json_storage;
pub mod memory;
pub mod share;

pub use trait_::{SnapshotStore, StorageError, Result};
pub use json_storage::JsonStorage;
pub use memory::MemoryStorage;
pub use share::{ShareChannel, QueryShare, DecodeError};
