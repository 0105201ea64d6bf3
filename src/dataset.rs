//! Dataset
//!
//! The complete persisted state: identities, clients and tracking records.

use rustc_hash::FxHashMap;

use crate::{
    clients::{Client, ClientUuid},
    identities::{IdentityStore, OwnedScope},
    trackings::{TrackingRecord, TrackingUuid},
};

/// Everything the application persists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    /// Login principals.
    pub identities: IdentityStore,

    /// Clients by id.
    pub clients: FxHashMap<ClientUuid, Client>,

    /// Tracking records in insertion order.
    pub trackings: Vec<TrackingRecord>,
}

/// What deleting a client removed along with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientRemoval {
    /// The deleted client.
    pub client: Client,

    /// Tracking records owned by the client.
    pub trackings_removed: usize,

    /// Identities whose only client this was.
    pub identities_removed: usize,

    /// Identities that lost this client but kept others.
    pub identities_narrowed: usize,
}

impl Dataset {
    /// Clients ordered by legal name.
    pub fn sorted_clients(&self) -> Vec<&Client> {
        let mut clients: Vec<_> = self.clients.values().collect();

        clients.sort_by(|a, b| a.legal_name.cmp(&b.legal_name).then(a.uuid.cmp(&b.uuid)));

        clients
    }

    /// Find a client by exact (trimmed) legal name.
    pub fn client_named(&self, legal_name: &str) -> Option<&Client> {
        let legal_name = legal_name.trim();

        self.clients
            .values()
            .find(|client| client.legal_name == legal_name)
    }

    /// Position of a tracking record.
    pub fn tracking_position(&self, uuid: TrackingUuid) -> Option<usize> {
        self.trackings.iter().position(|record| record.uuid == uuid)
    }

    /// Delete a client together with its records.
    ///
    /// Identities scoped to this client alone are deleted; identities linked to
    /// other clients as well just lose this one.
    pub fn remove_client(&mut self, uuid: ClientUuid) -> Option<ClientRemoval> {
        let client = self.clients.remove(&uuid)?;

        let before = self.trackings.len();
        self.trackings.retain(|record| record.client != uuid);
        let trackings_removed = before - self.trackings.len();

        let identities_removed = self.identities.retain(|identity| {
            identity
                .scope
                .clients()
                .is_none_or(|clients| !(clients.len() == 1 && clients.contains(&uuid)))
        });

        let narrowed: Vec<_> = self
            .identities
            .sorted()
            .into_iter()
            .filter(|identity| {
                identity
                    .scope
                    .clients()
                    .is_some_and(|clients| clients.contains(&uuid))
            })
            .map(|identity| identity.login.clone())
            .collect();

        for login in &narrowed {
            if let Some(OwnedScope::Clients(clients)) = self
                .identities
                .get_mut(login)
                .map(|identity| &mut identity.scope)
            {
                clients.remove(&uuid);
            }
        }

        Some(ClientRemoval {
            client,
            trackings_removed,
            identities_removed,
            identities_narrowed: narrowed.len(),
        })
    }
}
