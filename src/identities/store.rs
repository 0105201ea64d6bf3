//! Identity Store

use rustc_hash::FxHashMap;

use super::{Identity, IdentityError, LoginId};

/// Identities keyed by normalized login id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityStore {
    identities: FxHashMap<LoginId, Identity>,
}

impl IdentityStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a login attempt.
    ///
    /// The login id is normalized and the secret trimmed before comparison.
    /// Unknown logins, wrong secrets and inactive identities are indistinguishable
    /// to the caller.
    pub fn authenticate(&self, login: &str, secret: &str) -> Option<&Identity> {
        let login = LoginId::parse(login).ok()?;

        self.identities
            .get(&login)
            .filter(|identity| identity.active && identity.secret.matches(secret))
    }

    /// Add an identity.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::DuplicateLogin`] if the login id is taken.
    pub fn insert(&mut self, identity: Identity) -> Result<(), IdentityError> {
        if self.identities.contains_key(&identity.login) {
            return Err(IdentityError::DuplicateLogin(identity.login));
        }

        self.identities.insert(identity.login.clone(), identity);

        Ok(())
    }

    /// Look up an identity.
    pub fn get(&self, login: &LoginId) -> Option<&Identity> {
        self.identities.get(login)
    }

    /// Look up an identity for editing.
    pub fn get_mut(&mut self, login: &LoginId) -> Option<&mut Identity> {
        self.identities.get_mut(login)
    }

    /// Remove an identity.
    pub fn remove(&mut self, login: &LoginId) -> Option<Identity> {
        self.identities.remove(login)
    }

    /// Keep only identities matching `keep`, returning how many were dropped.
    pub fn retain(&mut self, mut keep: impl FnMut(&Identity) -> bool) -> usize {
        let before = self.identities.len();

        self.identities.retain(|_, identity| keep(identity));

        before - self.identities.len()
    }

    /// All identities, ordered by login id.
    pub fn sorted(&self) -> Vec<&Identity> {
        let mut identities: Vec<_> = self.identities.values().collect();

        identities.sort_by(|a, b| a.login.cmp(&b.login));

        identities
    }

    /// Number of identities.
    pub fn len(&self) -> usize {
        self.identities.len()
    }

    /// Whether the store holds no identities.
    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    /// Whether any active admin remains.
    pub fn has_active_admin(&self) -> bool {
        self.identities
            .values()
            .any(|identity| identity.active && identity.is_admin())
    }
}
