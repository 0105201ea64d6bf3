//! In-memory storage.

use async_trait::async_trait;
use brix::{
    dataset::Dataset,
    snapshot::{Format, Loaded, Metadata},
};
use tokio::sync::Mutex;

use super::{SnapshotStore, StorageError};

/// Keeps the last saved dataset in memory. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    saved: Mutex<Option<Dataset>>,
}

impl MemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already populated dataset.
    #[must_use]
    pub fn with_dataset(dataset: Dataset) -> Self {
        Self {
            saved: Mutex::new(Some(dataset)),
        }
    }

    /// The last saved dataset.
    pub async fn saved(&self) -> Option<Dataset> {
        self.saved.lock().await.clone()
    }
}

#[async_trait]
impl SnapshotStore for MemoryStore {
    async fn load(&self) -> Result<Option<Loaded>, StorageError> {
        Ok(self.saved.lock().await.clone().map(|dataset| Loaded {
            dataset,
            format: Format::Current,
            metadata: Metadata::default(),
            warnings: Vec::new(),
        }))
    }

    async fn save(&self, dataset: &Dataset) -> Result<(), StorageError> {
        *self.saved.lock().await = Some(dataset.clone());

        Ok(())
    }
}
