//! Identities service errors.

use brix::{
    access::{AccessDenied, AuthenticationRejected},
    clients::ClientUuid,
    identities::IdentityError,
};
use thiserror::Error;

use crate::storage::StorageError;

/// Identities service errors.
#[derive(Debug, Error)]
pub enum IdentitiesServiceError {
    /// Login, secret or active flag did not check out.
    #[error(transparent)]
    Rejected(#[from] AuthenticationRejected),

    /// The actor may not perform this operation.
    #[error(transparent)]
    AccessDenied(#[from] AccessDenied),

    /// No identity has this login.
    #[error("identity not found")]
    NotFound,

    /// The login is already taken, compared case-insensitively.
    #[error("an identity with this login already exists")]
    AlreadyExists,

    /// A newly linked client does not exist.
    #[error("client {0} not found")]
    UnknownClient(ClientUuid),

    /// The login, secret or profile failed validation.
    #[error("invalid identity")]
    Invalid(#[source] IdentityError),

    /// The change could not be saved.
    #[error("storage error")]
    Storage(#[from] StorageError),
}

impl From<IdentityError> for IdentitiesServiceError {
    fn from(error: IdentityError) -> Self {
        match error {
            IdentityError::DuplicateLogin(_) => Self::AlreadyExists,
            error => Self::Invalid(error),
        }
    }
}
