//! Identities Service

use async_trait::async_trait;
use brix::{
    access::{self, IdentityChange, authorize_identity_change, authorize_mutation},
    dataset::Dataset,
    identities::{Identity, LoginId, OwnedScope, Role, Secret},
};
use jiff::Timestamp;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    domain::identities::{
        IdentitiesServiceError,
        data::{IdentityUpdate, NewIdentity},
    },
    store::Store,
};

/// [`IdentitiesService`] over the shared [`Store`].
#[derive(Debug, Clone)]
pub struct StoreIdentitiesService {
    store: Store,
}

impl StoreIdentitiesService {
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

/// Reject clients in `scope` that are missing from the dataset, ignoring
/// those already listed in `current`.
fn ensure_clients_exist(
    dataset: &Dataset,
    scope: &OwnedScope,
    current: Option<&OwnedScope>,
) -> Result<(), IdentitiesServiceError> {
    let unknown = scope
        .clients()
        .into_iter()
        .flatten()
        .filter(|client| {
            !current
                .and_then(OwnedScope::clients)
                .is_some_and(|current| current.contains(client))
        })
        .find(|client| !dataset.clients.contains_key(client));

    match unknown {
        Some(client) => Err(IdentitiesServiceError::UnknownClient(*client)),
        None => Ok(()),
    }
}

#[async_trait]
impl IdentitiesService for StoreIdentitiesService {
    #[tracing::instrument(name = "identities.service.authenticate", skip(self, secret), err)]
    async fn authenticate(
        &self,
        login: &str,
        secret: &str,
    ) -> Result<Identity, IdentitiesServiceError> {
        let identity = self
            .store
            .read(|dataset| access::authenticate(&dataset.identities, login, secret).cloned())
            .await;

        if identity.is_err() {
            warn!("authentication rejected");
        }

        Ok(identity?)
    }

    #[tracing::instrument(
        name = "identities.service.list_identities",
        skip(self, actor),
        fields(login = %actor.login),
        err
    )]
    async fn list_identities(
        &self,
        actor: &Identity,
    ) -> Result<Vec<Identity>, IdentitiesServiceError> {
        authorize_mutation(actor)?;

        let identities = self
            .store
            .read(|dataset| dataset.identities.sorted().into_iter().cloned().collect())
            .await;

        Ok(identities)
    }

    #[tracing::instrument(
        name = "identities.service.create_identity",
        skip(self, actor, identity),
        fields(login = %actor.login, role = %identity.profile.role),
        err
    )]
    async fn create_identity(
        &self,
        actor: &Identity,
        identity: NewIdentity,
    ) -> Result<Identity, IdentitiesServiceError> {
        authorize_mutation(actor)?;

        let identity = Identity::new(
            LoginId::parse(&identity.login)?,
            Secret::new(&identity.secret)?,
            identity.profile,
            Timestamp::now(),
        )?;

        let created = self
            .store
            .write(|dataset| {
                ensure_clients_exist(dataset, &identity.scope, None)?;

                dataset.identities.insert(identity.clone())?;

                Ok::<_, IdentitiesServiceError>(identity)
            })
            .await?;

        info!(new_login = %created.login, "created identity");

        Ok(created)
    }

    #[tracing::instrument(
        name = "identities.service.update_identity",
        skip(self, actor, update),
        fields(login = %actor.login, target = %target),
        err
    )]
    async fn update_identity(
        &self,
        actor: &Identity,
        target: &LoginId,
        update: IdentityUpdate,
    ) -> Result<Identity, IdentitiesServiceError> {
        let change = if update.profile.role == Role::Admin {
            IdentityChange::Profile
        } else {
            IdentityChange::Demote
        };

        authorize_identity_change(actor, target, change)?;

        let scope = update.profile.scope()?;
        let secret = update
            .secret
            .as_deref()
            .map(Secret::new)
            .transpose()?;

        let updated = self
            .store
            .write(|dataset| {
                let current = dataset
                    .identities
                    .get(target)
                    .map(|identity| identity.scope.clone())
                    .ok_or(IdentitiesServiceError::NotFound)?;

                ensure_clients_exist(dataset, &scope, Some(&current))?;

                let identity = dataset
                    .identities
                    .get_mut(target)
                    .ok_or(IdentitiesServiceError::NotFound)?;

                identity.apply(update.profile)?;

                if let Some(secret) = secret {
                    identity.secret = secret;
                }

                Ok::<_, IdentitiesServiceError>(identity.clone())
            })
            .await?;

        info!(role = %updated.role, "updated identity");

        Ok(updated)
    }

    #[tracing::instrument(
        name = "identities.service.set_active",
        skip(self, actor),
        fields(login = %actor.login, target = %target),
        err
    )]
    async fn set_active(
        &self,
        actor: &Identity,
        target: &LoginId,
        active: bool,
    ) -> Result<Identity, IdentitiesServiceError> {
        let change = if active {
            IdentityChange::Profile
        } else {
            IdentityChange::Deactivate
        };

        authorize_identity_change(actor, target, change)?;

        let updated = self
            .store
            .write(|dataset| {
                let identity = dataset
                    .identities
                    .get_mut(target)
                    .ok_or(IdentitiesServiceError::NotFound)?;

                identity.active = active;

                Ok::<_, IdentitiesServiceError>(identity.clone())
            })
            .await?;

        info!("updated identity status");

        Ok(updated)
    }

    #[tracing::instrument(
        name = "identities.service.delete_identity",
        skip(self, actor),
        fields(login = %actor.login, target = %target),
        err
    )]
    async fn delete_identity(
        &self,
        actor: &Identity,
        target: &LoginId,
    ) -> Result<Identity, IdentitiesServiceError> {
        authorize_identity_change(actor, target, IdentityChange::Delete)?;

        let removed = self
            .store
            .write(|dataset| {
                dataset
                    .identities
                    .remove(target)
                    .ok_or(IdentitiesServiceError::NotFound)
            })
            .await?;

        info!("deleted identity");

        Ok(removed)
    }
}

#[automock]
#[async_trait]
/// Login and identity management.
pub trait IdentitiesService: Send + Sync {
    /// Resolve a login and secret to an active identity.
    ///
    /// Unknown logins, wrong secrets and inactive identities are
    /// indistinguishable to the caller.
    async fn authenticate(
        &self,
        login: &str,
        secret: &str,
    ) -> Result<Identity, IdentitiesServiceError>;

    /// Every identity, by login. Admin only.
    async fn list_identities(
        &self,
        actor: &Identity,
    ) -> Result<Vec<Identity>, IdentitiesServiceError>;

    /// Register an identity. Admin only.
    async fn create_identity(
        &self,
        actor: &Identity,
        identity: NewIdentity,
    ) -> Result<Identity, IdentitiesServiceError>;

    /// Replace an identity's profile and optionally its secret. Admin only.
    async fn update_identity(
        &self,
        actor: &Identity,
        target: &LoginId,
        update: IdentityUpdate,
    ) -> Result<Identity, IdentitiesServiceError>;

    /// Activate or deactivate an identity. Admin only.
    async fn set_active(
        &self,
        actor: &Identity,
        target: &LoginId,
        active: bool,
    ) -> Result<Identity, IdentitiesServiceError>;

    /// Remove an identity. Admin only.
    async fn delete_identity(
        &self,
        actor: &Identity,
        target: &LoginId,
    ) -> Result<Identity, IdentitiesServiceError>;
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use brix::{
        access::{AccessDenied, AuthenticationRejected},
        clients::ClientUuid,
        identities::{IdentityError, IdentityProfile},
    };
    use testresult::TestResult;

    use crate::test::helpers::{Seeded, seeded_dataset};

    use super::*;

    fn profile(role: Role, clients: &[ClientUuid]) -> IdentityProfile {
        IdentityProfile {
            display_name: "Nova Pessoa".to_string(),
            email: Some("nova@example.com".to_string()),
            role,
            clients: clients.iter().copied().collect(),
        }
    }

    async fn service(seeded: &Seeded) -> TestResult<StoreIdentitiesService> {
        let (store, _) = seeded.store().await?;

        Ok(StoreIdentitiesService::new(store))
    }

    #[tokio::test]
    async fn authenticate_normalizes_login() -> TestResult {
        let seeded = seeded_dataset()?;
        let service = service(&seeded).await?;

        let identity = service.authenticate(" Aristide ", "1234").await?;

        assert_eq!(identity.login, LoginId::parse("aristide")?);

        Ok(())
    }

    #[tokio::test]
    async fn authenticate_rejects_wrong_secret() -> TestResult {
        let seeded = seeded_dataset()?;
        let service = service(&seeded).await?;

        let result = service.authenticate("aristide", "4321").await;

        assert!(matches!(
            result,
            Err(IdentitiesServiceError::Rejected(AuthenticationRejected))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn only_admins_list_identities() -> TestResult {
        let seeded = seeded_dataset()?;
        let service = service(&seeded).await?;

        let logins: Vec<_> = service
            .list_identities(&seeded.identity("admin")?)
            .await?
            .into_iter()
            .map(|identity| identity.login.to_string())
            .collect();

        assert_eq!(logins, ["admin", "aristide", "nicolas", "operador_brix"]);

        let result = service
            .list_identities(&seeded.identity("operador_brix")?)
            .await;

        assert!(matches!(
            result,
            Err(IdentitiesServiceError::AccessDenied(AccessDenied::NotAdmin))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn created_identity_can_log_in() -> TestResult {
        let seeded = seeded_dataset()?;
        let service = service(&seeded).await?;

        let created = service
            .create_identity(
                &seeded.identity("admin")?,
                NewIdentity {
                    login: "Joana".to_string(),
                    secret: "s3nha".to_string(),
                    profile: profile(Role::Operator, &[seeded.mc, seeded.bento]),
                },
            )
            .await?;

        assert_eq!(created.login, LoginId::parse("joana")?);
        assert_eq!(service.authenticate("JOANA", "s3nha").await?, created);

        Ok(())
    }

    #[tokio::test]
    async fn logins_differing_only_in_case_collide() -> TestResult {
        let seeded = seeded_dataset()?;
        let service = service(&seeded).await?;

        let result = service
            .create_identity(
                &seeded.identity("admin")?,
                NewIdentity {
                    login: "ARISTIDE".to_string(),
                    secret: "1234".to_string(),
                    profile: profile(Role::Client, &[seeded.mc]),
                },
            )
            .await;

        assert!(matches!(result, Err(IdentitiesServiceError::AlreadyExists)));

        Ok(())
    }

    #[tokio::test]
    async fn non_admin_identities_need_known_clients() -> TestResult {
        let seeded = seeded_dataset()?;
        let service = service(&seeded).await?;
        let admin = seeded.identity("admin")?;
        let unknown = ClientUuid::new();

        let missing = service
            .create_identity(
                &admin,
                NewIdentity {
                    login: "joana".to_string(),
                    secret: "1234".to_string(),
                    profile: profile(Role::Client, &[]),
                },
            )
            .await;

        let dangling = service
            .create_identity(
                &admin,
                NewIdentity {
                    login: "joana".to_string(),
                    secret: "1234".to_string(),
                    profile: profile(Role::Client, &[unknown]),
                },
            )
            .await;

        assert!(matches!(
            missing,
            Err(IdentitiesServiceError::Invalid(IdentityError::MissingScope(
                Role::Client
            )))
        ));
        assert!(matches!(
            dangling,
            Err(IdentitiesServiceError::UnknownClient(client)) if client == unknown
        ));

        Ok(())
    }

    #[tokio::test]
    async fn update_identity_replaces_scope_and_secret() -> TestResult {
        let seeded = seeded_dataset()?;
        let service = service(&seeded).await?;

        let updated = service
            .update_identity(
                &seeded.identity("admin")?,
                &LoginId::parse("aristide")?,
                IdentityUpdate {
                    profile: profile(Role::Client, &[seeded.bento]),
                    secret: Some("nova".to_string()),
                },
            )
            .await?;

        assert_eq!(
            updated.scope.clients(),
            Some(&BTreeSet::from([seeded.bento]))
        );
        assert!(service.authenticate("aristide", "1234").await.is_err());
        assert!(service.authenticate("aristide", "nova").await.is_ok());

        Ok(())
    }

    #[tokio::test]
    async fn admins_cannot_lock_themselves_out() -> TestResult {
        let seeded = seeded_dataset()?;
        let service = service(&seeded).await?;
        let admin = seeded.identity("admin")?;

        let demote = service
            .update_identity(
                &admin,
                &admin.login,
                IdentityUpdate {
                    profile: profile(Role::Operator, &[seeded.mc]),
                    secret: None,
                },
            )
            .await;
        let deactivate = service.set_active(&admin, &admin.login, false).await;
        let delete = service.delete_identity(&admin, &admin.login).await;

        for result in [demote, deactivate, delete] {
            assert!(matches!(
                result,
                Err(IdentitiesServiceError::AccessDenied(AccessDenied::SelfLockout))
            ));
        }

        let renamed = service
            .update_identity(
                &admin,
                &admin.login,
                IdentityUpdate {
                    profile: profile(Role::Admin, &[]),
                    secret: None,
                },
            )
            .await?;

        assert_eq!(renamed.display_name, "Nova Pessoa");

        Ok(())
    }

    #[tokio::test]
    async fn deactivated_identities_cannot_log_in() -> TestResult {
        let seeded = seeded_dataset()?;
        let service = service(&seeded).await?;
        let nicolas = LoginId::parse("nicolas")?;

        service
            .set_active(&seeded.identity("admin")?, &nicolas, false)
            .await?;

        assert!(matches!(
            service.authenticate("nicolas", "1234").await,
            Err(IdentitiesServiceError::Rejected(_))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn delete_identity_removes_it() -> TestResult {
        let seeded = seeded_dataset()?;
        let service = service(&seeded).await?;
        let admin = seeded.identity("admin")?;
        let nicolas = LoginId::parse("nicolas")?;

        let removed = service.delete_identity(&admin, &nicolas).await?;

        assert_eq!(removed.login, nicolas);
        assert!(matches!(
            service.delete_identity(&admin, &nicolas).await,
            Err(IdentitiesServiceError::NotFound)
        ));

        Ok(())
    }

    #[tokio::test]
    async fn identities_linked_to_removed_clients_stay_editable() -> TestResult {
        let mut seeded = seeded_dataset()?;
        let vanished = ClientUuid::from_legacy_name("EMPRESA ABC LTDA");
        let unknown = ClientUuid::new();

        seeded.dataset.identities.insert(crate::test::helpers::identity(
            "empresa",
            "1234",
            Role::Client,
            &[vanished],
        )?)?;

        let service = service(&seeded).await?;
        let admin = seeded.identity("admin")?;
        let empresa = LoginId::parse("empresa")?;

        let renamed = service
            .update_identity(
                &admin,
                &empresa,
                IdentityUpdate {
                    profile: profile(Role::Client, &[vanished, seeded.mc]),
                    secret: None,
                },
            )
            .await?;

        assert_eq!(renamed.display_name, "Nova Pessoa");
        assert_eq!(
            renamed.scope.clients(),
            Some(&BTreeSet::from([vanished, seeded.mc]))
        );

        let widened = service
            .update_identity(
                &admin,
                &empresa,
                IdentityUpdate {
                    profile: profile(Role::Client, &[vanished, unknown]),
                    secret: None,
                },
            )
            .await;

        assert!(matches!(
            widened,
            Err(IdentitiesServiceError::UnknownClient(client)) if client == unknown
        ));

        Ok(())
    }
}
