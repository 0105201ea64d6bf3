//! BRIX prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    access::{
        AccessDenied, AuthenticationRejected, IdentityChange, MalformedIdentity, Visibility,
        authenticate, authorize_identity_change, authorize_mutation, can_view, visible_records,
    },
    clients::{Client, ClientDetails, ClientError, ClientUuid},
    dataset::{ClientRemoval, Dataset},
    filters::{ChannelFilter, TrackingQuery},
    identities::{
        Identity, IdentityError, IdentityProfile, IdentityStore, LoginId, OwnedScope, Role, Secret,
    },
    logins::{suggest_login, temporary_secret},
    snapshot::{Format, Loaded, MigrationWarning, Snapshot, SnapshotError},
    summary::{ChannelSummary, red_channel},
    trackings::{
        CustomsChannel, Milestones, TrackingDraft, TrackingError, TrackingRecord, TrackingUuid,
    },
    uuids::TypedUuid,
};
