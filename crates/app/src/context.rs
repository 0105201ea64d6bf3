//! App Context

use std::{fmt, sync::Arc};

use crate::{
    domain::{
        clients::{ClientsService, StoreClientsService},
        identities::{IdentitiesService, StoreIdentitiesService},
        trackings::{StoreTrackingsService, TrackingsService},
    },
    storage::SnapshotStore,
    store::{BootstrapAdmin, LegacySnapshots, Store, StoreError},
};

/// Every service, sharing one store.
#[derive(Clone)]
pub struct AppContext {
    /// Logins and identity management.
    pub identities: Arc<dyn IdentitiesService>,

    /// Client organizations.
    pub clients: Arc<dyn ClientsService>,

    /// Tracking records.
    pub trackings: Arc<dyn TrackingsService>,
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Open the store and build every service on top of it.
    ///
    /// # Errors
    ///
    /// Returns an error when the snapshot cannot be loaded or the bootstrap
    /// admin cannot be seeded.
    pub async fn open(
        persistence: Arc<dyn SnapshotStore>,
        admin: Option<BootstrapAdmin>,
    ) -> Result<Self, StoreError> {
        let store = Store::open(persistence, admin).await?;

        Ok(Self::with_store(store))
    }

    /// Open storage that must already be in the current format.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::LegacyFormat`] for a legacy snapshot, which is
    /// left as it is, or any error [`AppContext::open`] can return.
    pub async fn open_current(persistence: Arc<dyn SnapshotStore>) -> Result<Self, StoreError> {
        let store = Store::open_with(persistence, None, LegacySnapshots::Refuse).await?;

        Ok(Self::with_store(store))
    }

    fn with_store(store: Store) -> Self {
        Self {
            identities: Arc::new(StoreIdentitiesService::new(store.clone())),
            clients: Arc::new(StoreClientsService::new(store.clone())),
            trackings: Arc::new(StoreTrackingsService::new(store)),
        }
    }
}
