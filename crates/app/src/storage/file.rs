//! JSON file storage.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use brix::{
    dataset::Dataset,
    snapshot::{self, Loaded},
};
use jiff::Timestamp;
use tokio::fs;
use tracing::debug;

use super::{SnapshotStore, StorageError};

/// Stores the snapshot as one pretty-printed JSON file.
///
/// Writes go to a sibling temporary file that is then renamed over the target,
/// so a crash mid-write leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store backed by the file at `path`, which need not exist yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Target file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");

        self.path.with_file_name(name)
    }
}

#[async_trait]
impl SnapshotStore for JsonFileStore {
    async fn load(&self) -> Result<Option<Loaded>, StorageError> {
        let json = match fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        debug!(path = %self.path.display(), bytes = json.len(), "read snapshot");

        Ok(Some(snapshot::parse(&json)?))
    }

    async fn save(&self, dataset: &Dataset) -> Result<(), StorageError> {
        let json = snapshot::render(dataset, Timestamp::now())?;
        let staging = self.staging_path();

        fs::write(&staging, json.as_bytes())
            .await
            .map_err(|source| StorageError::Write {
                path: staging.clone(),
                source,
            })?;

        fs::rename(&staging, &self.path)
            .await
            .map_err(|source| StorageError::Write {
                path: self.path.clone(),
                source,
            })?;

        debug!(path = %self.path.display(), bytes = json.len(), "wrote snapshot");

        Ok(())
    }
}
