//! Clients Service

use std::collections::BTreeSet;

use async_trait::async_trait;
use brix::{
    access::{Visibility, authorize_mutation},
    clients::{Client, ClientUuid},
    dataset::{ClientRemoval, Dataset},
    identities::{Identity, IdentityError, IdentityProfile, Role},
    logins::{suggest_login, temporary_secret},
};
use jiff::Timestamp;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    domain::clients::{
        ClientsServiceError,
        data::{ClientUpdate, CreatedClient, IssuedLogin, NewClient},
    },
    store::Store,
};

/// [`ClientsService`] over the shared [`Store`].
#[derive(Debug, Clone)]
pub struct StoreClientsService {
    store: Store,
}

impl StoreClientsService {
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

fn issue_login(dataset: &mut Dataset, client: &Client) -> Result<Option<IssuedLogin>, IdentityError> {
    let Some(login) = suggest_login(&client.legal_name) else {
        warn!(legal_name = %client.legal_name, "no login could be derived from the legal name");
        return Ok(None);
    };

    if dataset.identities.get(&login).is_some() {
        warn!(%login, "derived login is already taken; no login created");
        return Ok(None);
    }

    let secret = temporary_secret();
    let identity = Identity::new(
        login.clone(),
        secret.clone(),
        IdentityProfile {
            display_name: client.trade_name.clone(),
            email: Some(client.email.clone()),
            role: Role::Client,
            clients: BTreeSet::from([client.uuid]),
        },
        Timestamp::now(),
    )?;

    dataset.identities.insert(identity)?;

    Ok(Some(IssuedLogin { login, secret }))
}

#[async_trait]
impl ClientsService for StoreClientsService {
    #[tracing::instrument(
        name = "clients.service.list_clients",
        skip(self, actor),
        fields(login = %actor.login),
        err
    )]
    async fn list_clients(&self, actor: &Identity) -> Result<Vec<Client>, ClientsServiceError> {
        let visibility = Visibility::of(actor);

        let clients = self
            .store
            .read(|dataset| {
                dataset
                    .sorted_clients()
                    .into_iter()
                    .filter(|client| visibility.permits(client.uuid))
                    .cloned()
                    .collect()
            })
            .await;

        Ok(clients)
    }

    #[tracing::instrument(
        name = "clients.service.get_client",
        skip(self, actor),
        fields(login = %actor.login, client_uuid = %uuid),
        err
    )]
    async fn get_client(
        &self,
        actor: &Identity,
        uuid: ClientUuid,
    ) -> Result<Client, ClientsServiceError> {
        if !Visibility::of(actor).permits(uuid) {
            return Err(ClientsServiceError::NotFound);
        }

        self.store
            .read(|dataset| dataset.clients.get(&uuid).cloned())
            .await
            .ok_or(ClientsServiceError::NotFound)
    }

    #[tracing::instrument(
        name = "clients.service.create_client",
        skip(self, actor, client),
        fields(login = %actor.login, create_login = client.create_login),
        err
    )]
    async fn create_client(
        &self,
        actor: &Identity,
        client: NewClient,
    ) -> Result<CreatedClient, ClientsServiceError> {
        authorize_mutation(actor)?;

        let details = client.details.normalized()?;

        let created = self
            .store
            .write(|dataset| {
                if dataset.client_named(&details.legal_name).is_some() {
                    return Err(ClientsServiceError::AlreadyExists);
                }

                let record = Client::new(ClientUuid::new(), details, Timestamp::now());
                let login = if client.create_login {
                    issue_login(dataset, &record)?
                } else {
                    None
                };

                dataset.clients.insert(record.uuid, record.clone());

                Ok(CreatedClient {
                    client: record,
                    login,
                })
            })
            .await?;

        info!(
            client_uuid = %created.client.uuid,
            issued_login = created.login.is_some(),
            "created client"
        );

        Ok(created)
    }

    #[tracing::instrument(
        name = "clients.service.update_client",
        skip(self, actor, update),
        fields(login = %actor.login, client_uuid = %uuid),
        err
    )]
    async fn update_client(
        &self,
        actor: &Identity,
        uuid: ClientUuid,
        update: ClientUpdate,
    ) -> Result<Client, ClientsServiceError> {
        authorize_mutation(actor)?;

        let details = update.details.normalized()?;

        let client = self
            .store
            .write(|dataset| {
                if dataset
                    .client_named(&details.legal_name)
                    .is_some_and(|other| other.uuid != uuid)
                {
                    return Err(ClientsServiceError::AlreadyExists);
                }

                let client = dataset
                    .clients
                    .get_mut(&uuid)
                    .ok_or(ClientsServiceError::NotFound)?;

                client.apply(details, update.active);

                Ok(client.clone())
            })
            .await?;

        info!(active = client.active, "updated client");

        Ok(client)
    }

    #[tracing::instrument(
        name = "clients.service.delete_client",
        skip(self, actor),
        fields(login = %actor.login, client_uuid = %uuid),
        err
    )]
    async fn delete_client(
        &self,
        actor: &Identity,
        uuid: ClientUuid,
    ) -> Result<ClientRemoval, ClientsServiceError> {
        authorize_mutation(actor)?;

        let removal = self
            .store
            .write(|dataset| {
                dataset
                    .remove_client(uuid)
                    .ok_or(ClientsServiceError::NotFound)
            })
            .await?;

        info!(
            trackings_removed = removal.trackings_removed,
            identities_removed = removal.identities_removed,
            identities_narrowed = removal.identities_narrowed,
            "deleted client"
        );

        Ok(removal)
    }
}

#[automock]
#[async_trait]
/// Client registry operations.
pub trait ClientsService: Send + Sync {
    /// Clients `actor` is linked to, or all of them for admins, by legal name.
    async fn list_clients(&self, actor: &Identity) -> Result<Vec<Client>, ClientsServiceError>;

    /// A single client. Clients outside the actor's scope are not found.
    async fn get_client(
        &self,
        actor: &Identity,
        uuid: ClientUuid,
    ) -> Result<Client, ClientsServiceError>;

    /// Register a client, optionally issuing it a login. Admin only.
    async fn create_client(
        &self,
        actor: &Identity,
        client: NewClient,
    ) -> Result<CreatedClient, ClientsServiceError>;

    /// Replace a client's details. Admin only.
    async fn update_client(
        &self,
        actor: &Identity,
        uuid: ClientUuid,
        update: ClientUpdate,
    ) -> Result<Client, ClientsServiceError>;

    /// Delete a client with its records and sole-client logins. Admin only.
    async fn delete_client(
        &self,
        actor: &Identity,
        uuid: ClientUuid,
    ) -> Result<ClientRemoval, ClientsServiceError>;
}
