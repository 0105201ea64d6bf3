//! Trackings service errors.

use brix::{access::AccessDenied, clients::ClientUuid, trackings::TrackingError};
use thiserror::Error;

use crate::storage::StorageError;

/// Trackings service errors.
#[derive(Debug, Error)]
pub enum TrackingsServiceError {
    /// The actor may not perform this operation.
    #[error(transparent)]
    AccessDenied(#[from] AccessDenied),

    /// No visible record has this id.
    #[error("tracking record not found")]
    NotFound,

    /// The record would be assigned to a client that does not exist.
    #[error("client {0} not found")]
    UnknownClient(ClientUuid),

    /// The record was changed by someone else after the caller read it.
    #[error("tracking record changed since it was read (expected version {expected}, found {actual})")]
    VersionConflict {
        /// Version the caller sent.
        expected: u64,

        /// Version currently stored.
        actual: u64,
    },

    /// The draft failed validation.
    #[error("invalid tracking record")]
    Invalid(#[from] TrackingError),

    /// The change could not be saved.
    #[error("storage error")]
    Storage(#[from] StorageError),
}
