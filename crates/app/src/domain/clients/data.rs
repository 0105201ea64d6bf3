//! Client Data

use brix::{
    clients::{Client, ClientDetails},
    identities::{LoginId, Secret},
};

/// New Client Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClient {
    /// Client details.
    pub details: ClientDetails,

    /// Also create a client login derived from the legal name.
    pub create_login: bool,
}

/// Client Update Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientUpdate {
    /// Replacement details.
    pub details: ClientDetails,

    /// Whether the client stays active.
    pub active: bool,
}

/// Login issued alongside a new client. The secret is only ever returned here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedLogin {
    /// Login derived from the legal name.
    pub login: LoginId,

    /// Generated temporary secret.
    pub secret: Secret,
}

/// Result of creating a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedClient {
    /// Stored client.
    pub client: Client,

    /// `None` unless requested, and also when the derived login was unusable
    /// or already taken.
    pub login: Option<IssuedLogin>,
}
