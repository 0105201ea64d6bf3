//! Clients service errors.

use brix::{access::AccessDenied, clients::ClientError, identities::IdentityError};
use thiserror::Error;

use crate::storage::StorageError;

/// Clients service errors.
#[derive(Debug, Error)]
pub enum ClientsServiceError {
    /// The actor may not perform this operation.
    #[error(transparent)]
    AccessDenied(#[from] AccessDenied),

    /// No visible client has this id.
    #[error("client not found")]
    NotFound,

    /// Another client already uses this legal name.
    #[error("a client with this legal name already exists")]
    AlreadyExists,

    /// Required details are missing.
    #[error("invalid client")]
    Invalid(#[from] ClientError),

    #[error("failed to issue client login")]
    Login(#[from] IdentityError),

    /// The change could not be saved.
    #[error("storage error")]
    Storage(#[from] StorageError),
}
