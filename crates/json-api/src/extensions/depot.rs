//! Depot helper extensions.

use std::any::Any;

use brix::identities::Identity;
use salvo::prelude::{Depot, StatusError};

const IDENTITY_DEPOT_KEY: &str = "brix.identity";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Record the identity the request was authenticated as.
    fn insert_identity(&mut self, identity: Identity);

    /// The authenticated identity, or 401 when the auth middleware did not run.
    fn identity_or_401(&self) -> Result<&Identity, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_identity(&mut self, identity: Identity) {
        self.insert(IDENTITY_DEPOT_KEY, identity);
    }

    fn identity_or_401(&self) -> Result<&Identity, StatusError> {
        self.get::<Identity>(IDENTITY_DEPOT_KEY)
            .map_err(|_ignored| StatusError::unauthorized())
    }
}
