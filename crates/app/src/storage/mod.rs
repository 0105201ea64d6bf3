//! Snapshot Storage
//!
//! Where the dataset is loaded from at startup and written back to after every
//! successful mutation.

use std::{io, path::PathBuf};

use async_trait::async_trait;
use brix::{dataset::Dataset, snapshot::{Loaded, SnapshotError}};
use mockall::automock;
use thiserror::Error;

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Snapshot storage failures.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The snapshot file exists but could not be read.
    #[error("failed to read snapshot from {}", path.display())]
    Read {
        /// File being read.
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The snapshot could not be written or moved into place.
    #[error("failed to write snapshot to {}", path.display())]
    Write {
        /// File being written.
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The stored document did not parse.
    #[error("invalid snapshot")]
    Snapshot(#[from] SnapshotError),
}

#[automock]
#[async_trait]
/// Snapshot persistence.
pub trait SnapshotStore: Send + Sync {
    /// Load the last saved snapshot, or `None` if nothing was ever saved.
    async fn load(&self) -> Result<Option<Loaded>, StorageError>;

    /// Replace the saved snapshot.
    async fn save(&self, dataset: &Dataset) -> Result<(), StorageError>;
}
