//! Identity Payloads

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use brix::identities::{Identity, IdentityProfile, Role};

/// Identity role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum RolePayload {
    Admin,
    Client,
    Operator,
}

impl From<RolePayload> for Role {
    fn from(role: RolePayload) -> Self {
        match role {
            RolePayload::Admin => Role::Admin,
            RolePayload::Client => Role::Client,
            RolePayload::Operator => Role::Operator,
        }
    }
}

impl From<Role> for RolePayload {
    fn from(role: Role) -> Self {
        match role {
            Role::Admin => RolePayload::Admin,
            Role::Client => RolePayload::Client,
            Role::Operator => RolePayload::Operator,
        }
    }
}

/// Editable identity fields
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProfilePayload {
    pub display_name: String,

    #[serde(default)]
    pub email: Option<String>,

    pub role: RolePayload,

    /// Linked client UUIDs; required unless the role is admin
    #[serde(default)]
    pub clients: Vec<Uuid>,
}

impl From<ProfilePayload> for IdentityProfile {
    fn from(payload: ProfilePayload) -> Self {
        IdentityProfile {
            display_name: payload.display_name,
            email: payload.email,
            role: payload.role.into(),
            clients: payload.clients.into_iter().map(Into::into).collect(),
        }
    }
}

/// Identity, without its secret
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct IdentityResponse {
    pub login: String,
    pub display_name: String,
    pub email: Option<String>,
    pub role: RolePayload,

    /// Readable client UUIDs, `null` when unrestricted
    pub clients: Option<Vec<Uuid>>,

    pub active: bool,
    pub created_at: Option<String>,
}

impl From<&Identity> for IdentityResponse {
    fn from(identity: &Identity) -> Self {
        IdentityResponse {
            login: identity.login.to_string(),
            display_name: identity.display_name.clone(),
            email: identity.email.clone(),
            role: identity.role.into(),
            clients: identity
                .scope
                .clients()
                .map(|clients| clients.iter().map(|client| client.into_uuid()).collect()),
            active: identity.active,
            created_at: identity.created_at.map(|at| at.to_string()),
        }
    }
}

impl From<Identity> for IdentityResponse {
    fn from(identity: Identity) -> Self {
        IdentityResponse::from(&identity)
    }
}
