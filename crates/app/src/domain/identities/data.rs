//! Identity Data

use brix::identities::IdentityProfile;

/// New Identity Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIdentity {
    /// Raw login; normalized before use.
    pub login: String,

    /// Raw secret; surrounding whitespace is dropped.
    pub secret: String,

    /// Role, scope and contact details.
    pub profile: IdentityProfile,
}

/// Identity Update Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityUpdate {
    /// Replacement profile.
    pub profile: IdentityProfile,

    /// Replacement secret. `None` keeps the current one.
    pub secret: Option<String>,
}
