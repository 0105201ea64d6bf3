//! Record Access
//!
//! Decides which tracking records an authenticated identity may read and
//! whether it may change anything at all. Everything here is a pure function of
//! its inputs; callers hold the state.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::{
    clients::ClientUuid,
    identities::{Identity, IdentityStore, LoginId, OwnedScope},
    trackings::TrackingRecord,
};

/// Login rejected. Deliberately carries no reason.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Default)]
#[error("invalid login or secret")]
pub struct AuthenticationRejected;

/// Mutation refused.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AccessDenied {
    /// Only admins may create, update or delete.
    #[error("only admins may modify data")]
    NotAdmin,

    /// The acting identity has been deactivated.
    #[error("identity is inactive")]
    Inactive,

    /// An admin tried to delete, deactivate or demote their own identity.
    #[error("admins cannot delete, deactivate or demote themselves")]
    SelfLockout,
}

/// Why an identity's scope could not be honored.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MalformedIdentity {
    /// A non-admin identity claims unrestricted access.
    #[error("non-admin identity has an unrestricted scope")]
    UnrestrictedNonAdmin,

    /// A non-admin identity is linked to no clients.
    #[error("non-admin identity is not linked to any client")]
    EmptyScope,
}

/// Read access resolved for one identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility<'a> {
    /// Every record.
    All,

    /// Records owned by one of these clients.
    Scoped(&'a BTreeSet<ClientUuid>),

    /// Nothing. The identity's scope is malformed.
    Denied(MalformedIdentity),
}

impl<'a> Visibility<'a> {
    /// Resolve an identity's read access, failing closed on malformed scopes.
    pub fn of(identity: &'a Identity) -> Self {
        if identity.is_admin() {
            return Self::All;
        }

        match &identity.scope {
            OwnedScope::Unrestricted => Self::Denied(MalformedIdentity::UnrestrictedNonAdmin),
            OwnedScope::Clients(clients) if clients.is_empty() => {
                Self::Denied(MalformedIdentity::EmptyScope)
            }
            OwnedScope::Clients(clients) => Self::Scoped(clients),
        }
    }

    /// Whether records owned by `client` are visible.
    pub fn permits(&self, client: ClientUuid) -> bool {
        match self {
            Self::All => true,
            Self::Scoped(clients) => clients.contains(&client),
            Self::Denied(_) => false,
        }
    }
}

/// Resolve a login attempt into an identity or a generic rejection.
///
/// # Errors
///
/// Returns [`AuthenticationRejected`] for unknown logins, wrong secrets and
/// inactive identities alike.
pub fn authenticate<'a>(
    identities: &'a IdentityStore,
    login: &str,
    secret: &str,
) -> Result<&'a Identity, AuthenticationRejected> {
    identities
        .authenticate(login, secret)
        .ok_or(AuthenticationRejected)
}

/// The records `identity` may read, in their original order.
///
/// Admins get a copy of everything. Other identities get exactly the records
/// owned by one of their clients, or nothing if their scope is malformed.
pub fn visible_records(records: &[TrackingRecord], identity: &Identity) -> Vec<TrackingRecord> {
    let visibility = Visibility::of(identity);

    records
        .iter()
        .filter(|record| visibility.permits(record.client))
        .cloned()
        .collect()
}

/// Whether `identity` may read `record`.
pub fn can_view(record: &TrackingRecord, identity: &Identity) -> bool {
    Visibility::of(identity).permits(record.client)
}

/// Check that `actor` may create, update or delete anything.
///
/// Ownership of the target is irrelevant: non-admins are read-only.
///
/// # Errors
///
/// Returns [`AccessDenied::NotAdmin`] for non-admins and
/// [`AccessDenied::Inactive`] for deactivated admins.
pub fn authorize_mutation(actor: &Identity) -> Result<(), AccessDenied> {
    if !actor.is_admin() {
        return Err(AccessDenied::NotAdmin);
    }

    if !actor.active {
        return Err(AccessDenied::Inactive);
    }

    Ok(())
}

/// Kind of change made to an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityChange {
    /// Display name, email, secret or linked clients.
    Profile,

    /// Role changed away from admin.
    Demote,

    /// Marked inactive.
    Deactivate,

    /// Removed.
    Delete,
}

/// Check that `actor` may apply `change` to the identity logged in as `target`.
///
/// # Errors
///
/// Everything [`authorize_mutation`] returns, plus [`AccessDenied::SelfLockout`]
/// when an admin would delete, deactivate or demote themselves.
pub fn authorize_identity_change(
    actor: &Identity,
    target: &LoginId,
    change: IdentityChange,
) -> Result<(), AccessDenied> {
    authorize_mutation(actor)?;

    if &actor.login == target && change != IdentityChange::Profile {
        return Err(AccessDenied::SelfLockout);
    }

    Ok(())
}
