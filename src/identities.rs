//! Identities
//!
//! Login principals, their credentials and the set of clients whose records
//! they are allowed to read.

use std::{
    collections::BTreeSet,
    fmt::{self, Display, Formatter},
};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::Zeroize;

use crate::clients::{ClientUuid, non_blank};

pub mod store;

pub use store::IdentityStore;

/// Identity validation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// Login id was blank after trimming.
    #[error("login id cannot be empty")]
    EmptyLogin,

    /// Secret was blank after trimming.
    #[error("secret cannot be empty")]
    EmptySecret,

    /// Display name was blank after trimming.
    #[error("display name cannot be empty")]
    EmptyDisplayName,

    /// A non-admin identity was given no clients.
    #[error("{0} identities must be linked to at least one client")]
    MissingScope(Role),

    /// Another identity already uses this login id.
    #[error("login id `{0}` is already taken")]
    DuplicateLogin(LoginId),
}

/// Normalized login id: trimmed and lowercased.
///
/// Two raw inputs that differ only by surrounding whitespace or case produce the
/// same `LoginId`, which is what the identity store keys on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LoginId(String);

impl LoginId {
    /// Normalize a raw login id.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::EmptyLogin`] when nothing is left after trimming.
    pub fn parse(raw: &str) -> Result<Self, IdentityError> {
        let normalized = raw.trim().to_lowercase();

        if normalized.is_empty() {
            return Err(IdentityError::EmptyLogin);
        }

        Ok(Self(normalized))
    }

    /// The normalized login id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for LoginId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for LoginId {
    type Error = IdentityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LoginId> for String {
    fn from(value: LoginId) -> Self {
        value.0
    }
}

/// Stored login secret.
///
/// Compared case-sensitively against trimmed input. Never printed; the backing
/// buffer is wiped on drop.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    /// Build a secret from user input, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::EmptySecret`] when nothing is left after trimming.
    pub fn new(raw: &str) -> Result<Self, IdentityError> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(IdentityError::EmptySecret);
        }

        Ok(Self(trimmed.to_string()))
    }

    pub(crate) fn generated(value: String) -> Self {
        Self(value)
    }

    /// Check a presented secret. Only the presented value is trimmed.
    pub fn matches(&self, presented: &str) -> bool {
        self.0 == presented.trim()
    }

    /// Reveal the secret, e.g. to show a generated one to an admin exactly once.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(**redacted**)")
    }
}

impl Drop for Secret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Identity role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Unrestricted read access and the only role allowed to mutate.
    Admin,

    /// A client's own staff.
    Client,

    /// Forwarder staff acting for one or more clients.
    Operator,
}

impl Role {
    /// Lowercase role name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Client => "client",
            Self::Operator => "operator",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which clients' records an identity may read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnedScope {
    /// Every record, regardless of client.
    Unrestricted,

    /// Only records owned by one of these clients.
    Clients(BTreeSet<ClientUuid>),
}

impl OwnedScope {
    /// Scope holding exactly one client.
    #[must_use]
    pub fn single(client: ClientUuid) -> Self {
        Self::Clients(BTreeSet::from([client]))
    }

    /// Whether a record owned by `client` falls inside this scope.
    pub fn permits(&self, client: ClientUuid) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::Clients(clients) => clients.contains(&client),
        }
    }

    /// The listed clients, or `None` for an unrestricted scope.
    pub fn clients(&self) -> Option<&BTreeSet<ClientUuid>> {
        match self {
            Self::Unrestricted => None,
            Self::Clients(clients) => Some(clients),
        }
    }
}

/// Editable part of an identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityProfile {
    /// Name shown in the dashboard header.
    pub display_name: String,

    /// Contact email.
    pub email: Option<String>,

    /// Role.
    pub role: Role,

    /// Linked clients. Ignored for admins.
    pub clients: BTreeSet<ClientUuid>,
}

impl IdentityProfile {
    /// Resolve the scope this profile grants.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::MissingScope`] for a non-admin without clients.
    pub fn scope(&self) -> Result<OwnedScope, IdentityError> {
        match self.role {
            Role::Admin => Ok(OwnedScope::Unrestricted),
            role if self.clients.is_empty() => Err(IdentityError::MissingScope(role)),
            Role::Client | Role::Operator => Ok(OwnedScope::Clients(self.clients.clone())),
        }
    }
}

/// Identity Record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Identity {
    /// Normalized, unique login id.
    pub login: LoginId,

    /// Login secret.
    pub secret: Secret,

    /// Role.
    pub role: Role,

    /// Readable clients.
    pub scope: OwnedScope,

    /// Name shown in the dashboard header.
    pub display_name: String,

    /// Contact email.
    pub email: Option<String>,

    /// Inactive identities never authenticate.
    pub active: bool,

    /// Creation time, if known.
    pub created_at: Option<Timestamp>,
}

impl Identity {
    /// Build a new, active identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the display name is blank or a non-admin has no clients.
    pub fn new(
        login: LoginId,
        secret: Secret,
        profile: IdentityProfile,
        created_at: Timestamp,
    ) -> Result<Self, IdentityError> {
        let scope = profile.scope()?;
        let display_name = profile.display_name.trim().to_string();

        if display_name.is_empty() {
            return Err(IdentityError::EmptyDisplayName);
        }

        Ok(Self {
            login,
            secret,
            role: profile.role,
            scope,
            display_name,
            email: non_blank(profile.email),
            active: true,
            created_at: Some(created_at),
        })
    }

    /// Replace the editable fields.
    ///
    /// # Errors
    ///
    /// Same rules as [`Identity::new`]; the identity is left untouched on error.
    pub fn apply(&mut self, profile: IdentityProfile) -> Result<(), IdentityError> {
        let scope = profile.scope()?;
        let display_name = profile.display_name.trim().to_string();

        if display_name.is_empty() {
            return Err(IdentityError::EmptyDisplayName);
        }

        self.role = profile.role;
        self.scope = scope;
        self.display_name = display_name;
        self.email = non_blank(profile.email);

        Ok(())
    }

    /// Whether this identity holds the admin role.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn profile(role: Role, clients: &[ClientUuid]) -> IdentityProfile {
        IdentityProfile {
            display_name: " Operador BRIX ".to_string(),
            email: Some(String::new()),
            role,
            clients: clients.iter().copied().collect(),
        }
    }

    #[test]
    fn login_ids_are_trimmed_and_lowercased() -> TestResult {
        assert_eq!(LoginId::parse("  Admin ")?, LoginId::parse("admin")?);
        assert_eq!(LoginId::parse(" \t"), Err(IdentityError::EmptyLogin));

        Ok(())
    }

    #[test]
    fn login_ids_normalize_when_deserialized() -> TestResult {
        let login: LoginId = serde_json::from_str("\"Operador_BRIX\"")?;

        assert_eq!(login.as_str(), "operador_brix");

        Ok(())
    }

    #[test]
    fn secrets_match_trimmed_input_case_sensitively() -> TestResult {
        let secret = Secret::new(" admin123 ")?;

        assert!(secret.matches("admin123"));
        assert!(secret.matches("  admin123\n"));
        assert!(!secret.matches("ADMIN123"));

        Ok(())
    }

    #[test]
    fn secrets_are_redacted_in_debug_output() -> TestResult {
        let secret = Secret::new("hunter2")?;

        assert!(!format!("{secret:?}").contains("hunter2"));

        Ok(())
    }

    #[test]
    fn admin_profiles_are_unrestricted() -> TestResult {
        let scope = profile(Role::Admin, &[ClientUuid::new()]).scope()?;

        assert_eq!(scope, OwnedScope::Unrestricted);

        Ok(())
    }

    #[test]
    fn non_admin_profiles_need_clients() {
        assert_eq!(
            profile(Role::Operator, &[]).scope(),
            Err(IdentityError::MissingScope(Role::Operator))
        );
    }

    #[test]
    fn new_identity_is_active_and_normalized() -> TestResult {
        let client = ClientUuid::new();
        let identity = Identity::new(
            LoginId::parse("operador_brix")?,
            Secret::new("op123")?,
            profile(Role::Operator, &[client]),
            Timestamp::UNIX_EPOCH,
        )?;

        assert!(identity.active);
        assert_eq!(identity.display_name, "Operador BRIX");
        assert_eq!(identity.email, None);
        assert!(identity.scope.permits(client));
        assert!(!identity.scope.permits(ClientUuid::new()));

        Ok(())
    }

    #[test]
    fn failed_apply_leaves_identity_untouched() -> TestResult {
        let client = ClientUuid::new();
        let mut identity = Identity::new(
            LoginId::parse("aristide")?,
            Secret::new("1234")?,
            profile(Role::Client, &[client]),
            Timestamp::UNIX_EPOCH,
        )?;
        let before = identity.clone();

        let result = identity.apply(profile(Role::Client, &[]));

        assert_eq!(result, Err(IdentityError::MissingScope(Role::Client)));
        assert_eq!(identity, before);

        Ok(())
    }
}
