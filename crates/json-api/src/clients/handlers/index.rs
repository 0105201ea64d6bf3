//! Client Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    clients::{errors::into_status_error, models::ClientResponse},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ClientsResponse {
    /// Clients ordered by legal name
    pub clients: Vec<ClientResponse>,
}

/// Client Index Handler
///
/// Admins see every client; client logins see the clients they are linked to.
#[endpoint(
    tags("clients"),
    summary = "List Clients",
    security(("basic_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Clients"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing or wrong credentials"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ClientsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.identity_or_401()?;

    let clients = state
        .app
        .clients
        .list_clients(actor)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ClientsResponse {
        clients: clients.into_iter().map(Into::into).collect(),
    }))
}
