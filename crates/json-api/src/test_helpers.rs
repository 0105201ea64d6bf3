//! Test helpers.

use std::{collections::BTreeSet, sync::Arc};

use brix::{
    clients::ClientUuid,
    identities::{Identity, IdentityProfile, LoginId, Role, Secret},
};
use brix_app::{
    context::AppContext,
    domain::{
        clients::MockClientsService, identities::MockIdentitiesService,
        trackings::MockTrackingsService,
    },
};
use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use testresult::TestResult;

use crate::{extensions::*, state::State};

fn identity(login: &str, role: Role, clients: &[ClientUuid]) -> TestResult<Identity> {
    Ok(Identity::new(
        LoginId::parse(login)?,
        Secret::new("secret")?,
        IdentityProfile {
            display_name: login.to_string(),
            email: None,
            role,
            clients: clients.iter().copied().collect::<BTreeSet<_>>(),
        },
        Timestamp::UNIX_EPOCH,
    )?)
}

pub(crate) fn test_admin() -> TestResult<Identity> {
    identity("admin", Role::Admin, &[])
}

pub(crate) fn test_client(clients: &[ClientUuid]) -> TestResult<Identity> {
    identity("aristide", Role::Client, clients)
}

/// Authenticates every request as a fixed identity.
pub(crate) struct InjectIdentity(pub(crate) Identity);

#[salvo::handler]
impl InjectIdentity {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        depot.insert_identity(self.0.clone());
        ctrl.call_next(req, depot, res).await;
    }
}

pub(crate) fn strict_identities_mock() -> MockIdentitiesService {
    let mut identities = MockIdentitiesService::new();

    identities.expect_authenticate().never();
    identities.expect_list_identities().never();
    identities.expect_create_identity().never();
    identities.expect_update_identity().never();
    identities.expect_set_active().never();
    identities.expect_delete_identity().never();

    identities
}

pub(crate) fn strict_clients_mock() -> MockClientsService {
    let mut clients = MockClientsService::new();

    clients.expect_list_clients().never();
    clients.expect_get_client().never();
    clients.expect_create_client().never();
    clients.expect_update_client().never();
    clients.expect_delete_client().never();

    clients
}

fn strict_trackings_mock() -> MockTrackingsService {
    let mut trackings = MockTrackingsService::new();

    trackings.expect_list_trackings().never();
    trackings.expect_get_tracking().never();
    trackings.expect_summarize().never();
    trackings.expect_create_tracking().never();
    trackings.expect_update_tracking().never();
    trackings.expect_delete_tracking().never();

    trackings
}

pub(crate) fn state_with(
    identities: MockIdentitiesService,
    clients: MockClientsService,
    trackings: MockTrackingsService,
) -> Arc<State> {
    State::from_app_context(AppContext {
        identities: Arc::new(identities),
        clients: Arc::new(clients),
        trackings: Arc::new(trackings),
    })
}

pub(crate) fn state_with_identities(identities: MockIdentitiesService) -> Arc<State> {
    state_with(identities, strict_clients_mock(), strict_trackings_mock())
}

fn service(state: Arc<State>, actor: Identity, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(InjectIdentity(actor))
            .push(route),
    )
}

pub(crate) fn identities_service(
    identities: MockIdentitiesService,
    actor: Identity,
    route: Router,
) -> Service {
    service(state_with_identities(identities), actor, route)
}

pub(crate) fn clients_service(clients: MockClientsService, actor: Identity, route: Router) -> Service {
    service(
        state_with(strict_identities_mock(), clients, strict_trackings_mock()),
        actor,
        route,
    )
}

pub(crate) fn trackings_service(
    trackings: MockTrackingsService,
    actor: Identity,
    route: Router,
) -> Service {
    service(
        state_with(strict_identities_mock(), strict_clients_mock(), trackings),
        actor,
        route,
    )
}
