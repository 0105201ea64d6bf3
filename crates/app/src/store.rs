//! Application Store
//!
//! Owns the in-memory dataset for the lifetime of the process and writes it
//! through to [`SnapshotStore`] after every mutation.

use std::{collections::BTreeSet, fmt, sync::Arc};

use brix::{
    dataset::Dataset,
    identities::{Identity, IdentityError, IdentityProfile, LoginId, Role, Secret},
    snapshot::Format,
};
use jiff::Timestamp;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::storage::{SnapshotStore, StorageError};

/// Reasons the store could not be opened.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Loading or the initial save failed.
    #[error("failed to load snapshot")]
    Storage(#[from] StorageError),

    /// The configured bootstrap admin is not a valid identity.
    #[error("invalid bootstrap admin")]
    Bootstrap(#[from] IdentityError),

    /// A legacy snapshot was found under [`LegacySnapshots::Refuse`].
    #[error("snapshot is in the legacy format and must be migrated first")]
    LegacyFormat,
}

/// How [`Store::open_with`] treats a snapshot in the legacy layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LegacySnapshots {
    /// Convert it and save it back in the current format.
    #[default]
    Migrate,

    /// Fail with [`StoreError::LegacyFormat`], leaving the file untouched.
    Refuse,
}

/// Admin identity seeded into empty storage.
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    /// Login id of the seeded admin.
    pub login: LoginId,

    /// Secret of the seeded admin.
    pub secret: Secret,
}

impl BootstrapAdmin {
    fn into_identity(self) -> Result<Identity, IdentityError> {
        Identity::new(
            self.login,
            self.secret,
            IdentityProfile {
                display_name: "Administrator".to_string(),
                email: None,
                role: Role::Admin,
                clients: BTreeSet::new(),
            },
            Timestamp::now(),
        )
    }
}

/// Shared handle to the dataset.
///
/// Reads run concurrently. Writes are serialized, applied to a copy and only
/// swapped in once the copy has been persisted, so a failed save leaves the
/// in-memory state untouched.
#[derive(Clone)]
pub struct Store {
    dataset: Arc<RwLock<Dataset>>,
    persistence: Arc<dyn SnapshotStore>,
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}

impl Store {
    /// Load the dataset, migrating legacy snapshots and seeding empty storage.
    ///
    /// # Errors
    ///
    /// Returns an error if loading or the initial save fails, or if the
    /// bootstrap admin is invalid.
    pub async fn open(
        persistence: Arc<dyn SnapshotStore>,
        admin: Option<BootstrapAdmin>,
    ) -> Result<Self, StoreError> {
        Self::open_with(persistence, admin, LegacySnapshots::Migrate).await
    }

    /// Like [`Store::open`], with an explicit policy for legacy snapshots.
    ///
    /// # Errors
    ///
    /// Returns an error if loading or the initial save fails, if the bootstrap
    /// admin is invalid, or if a legacy snapshot is found and `legacy` is
    /// [`LegacySnapshots::Refuse`].
    pub async fn open_with(
        persistence: Arc<dyn SnapshotStore>,
        admin: Option<BootstrapAdmin>,
        legacy: LegacySnapshots,
    ) -> Result<Self, StoreError> {
        let dataset = match persistence.load().await? {
            Some(loaded)
                if loaded.format == Format::Legacy && legacy == LegacySnapshots::Refuse =>
            {
                warn!("refusing to open a legacy snapshot without migrating it");

                return Err(StoreError::LegacyFormat);
            }
            Some(loaded) => {
                for warning in &loaded.warnings {
                    warn!(%warning, "snapshot migration");
                }

                if loaded.format == Format::Legacy {
                    info!(
                        version = loaded.metadata.version.as_deref().unwrap_or("unknown"),
                        "migrated legacy snapshot; saving it back in the current format"
                    );

                    persistence.save(&loaded.dataset).await?;
                }

                loaded.dataset
            }
            None => {
                let mut dataset = Dataset::default();

                if let Some(admin) = admin {
                    let identity = admin.into_identity()?;

                    info!(login = %identity.login, "seeding bootstrap admin");

                    dataset.identities.insert(identity)?;
                    persistence.save(&dataset).await?;
                } else {
                    warn!("storage is empty and no bootstrap admin is configured");
                }

                dataset
            }
        };

        if !dataset.identities.has_active_admin() {
            warn!("no active admin identity; nothing can be modified");
        }

        info!(
            identities = dataset.identities.len(),
            clients = dataset.clients.len(),
            trackings = dataset.trackings.len(),
            "store opened"
        );

        Ok(Self {
            dataset: Arc::new(RwLock::new(dataset)),
            persistence,
        })
    }

    /// Run `f` against the current dataset.
    pub async fn read<T>(&self, f: impl FnOnce(&Dataset) -> T) -> T {
        f(&*self.dataset.read().await)
    }

    /// Run `f` against a copy of the dataset and commit the copy if both `f`
    /// and the save succeed.
    ///
    /// # Errors
    ///
    /// Returns whatever `f` returns, or the save error converted into `E`.
    pub async fn write<T, E>(&self, f: impl FnOnce(&mut Dataset) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StorageError>,
    {
        let mut current = self.dataset.write().await;
        let mut next = current.clone();

        let value = f(&mut next)?;

        self.persistence.save(&next).await?;
        *current = next;

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use brix::snapshot::{Loaded, Metadata};
    use testresult::TestResult;

    use crate::{
        storage::{MemoryStore, MockSnapshotStore},
        test::helpers::seeded_dataset,
    };

    use super::*;

    fn admin() -> TestResult<BootstrapAdmin> {
        Ok(BootstrapAdmin {
            login: LoginId::parse("admin")?,
            secret: Secret::new("admin123")?,
        })
    }

    #[tokio::test]
    async fn empty_storage_is_seeded_with_the_bootstrap_admin() -> TestResult {
        let persistence = Arc::new(MemoryStore::new());

        let store = Store::open(persistence.clone(), Some(admin()?)).await?;

        let authenticated = store
            .read(|dataset| dataset.identities.authenticate("admin", "admin123").is_some())
            .await;

        assert!(authenticated);
        assert_eq!(
            persistence.saved().await.map(|dataset| dataset.identities.len()),
            Some(1)
        );

        Ok(())
    }

    #[tokio::test]
    async fn bootstrap_admin_is_ignored_when_storage_has_data() -> TestResult {
        let seeded = seeded_dataset()?;
        let persistence = Arc::new(MemoryStore::with_dataset(seeded.dataset.clone()));

        let store = Store::open(persistence, Some(admin()?)).await?;

        let dataset = store.read(Dataset::clone).await;

        assert_eq!(dataset, seeded.dataset);

        Ok(())
    }

    #[tokio::test]
    async fn legacy_snapshots_are_saved_back_once() -> TestResult {
        let seeded = seeded_dataset()?;
        let loaded = Loaded {
            dataset: seeded.dataset.clone(),
            format: Format::Legacy,
            metadata: Metadata::default(),
            warnings: Vec::new(),
        };

        let mut persistence = MockSnapshotStore::new();
        persistence
            .expect_load()
            .times(1)
            .return_once(move || Ok(Some(loaded)));
        persistence.expect_save().times(1).returning(|_| Ok(()));

        Store::open(Arc::new(persistence), None).await?;

        Ok(())
    }

    #[tokio::test]
    async fn refused_legacy_snapshots_are_left_untouched() -> TestResult {
        let seeded = seeded_dataset()?;
        let loaded = Loaded {
            dataset: seeded.dataset,
            format: Format::Legacy,
            metadata: Metadata::default(),
            warnings: Vec::new(),
        };

        let mut persistence = MockSnapshotStore::new();
        persistence
            .expect_load()
            .times(1)
            .return_once(move || Ok(Some(loaded)));
        persistence.expect_save().never();

        let result =
            Store::open_with(Arc::new(persistence), None, LegacySnapshots::Refuse).await;

        assert!(matches!(result, Err(StoreError::LegacyFormat)));

        Ok(())
    }

    #[tokio::test]
    async fn refusing_legacy_snapshots_still_opens_current_ones() -> TestResult {
        let seeded = seeded_dataset()?;
        let persistence = Arc::new(MemoryStore::with_dataset(seeded.dataset.clone()));

        let store = Store::open_with(persistence, None, LegacySnapshots::Refuse).await?;

        assert_eq!(store.read(Dataset::clone).await, seeded.dataset);

        Ok(())
    }

    #[tokio::test]
    async fn failed_save_leaves_dataset_untouched() -> TestResult {
        let seeded = seeded_dataset()?;
        let expected = seeded.dataset.clone();

        let mut persistence = MockSnapshotStore::new();
        persistence
            .expect_load()
            .return_once(move || Ok(Some(Loaded {
                dataset: seeded.dataset,
                format: Format::Current,
                metadata: Metadata::default(),
                warnings: Vec::new(),
            })));
        persistence.expect_save().returning(|_| {
            Err(StorageError::Write {
                path: "brix.json".into(),
                source: std::io::Error::other("disk full"),
            })
        });

        let store = Store::open(Arc::new(persistence), None).await?;

        let result: Result<(), StorageError> = store
            .write(|dataset| {
                dataset.trackings.clear();
                Ok(())
            })
            .await;

        assert!(matches!(result, Err(StorageError::Write { .. })));
        assert_eq!(store.read(Dataset::clone).await, expected);

        Ok(())
    }
}
