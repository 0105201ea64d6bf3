//! Get Client Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    clients::{errors::into_status_error, models::ClientResponse},
    extensions::*,
    state::State,
};

/// Get Client Handler
#[endpoint(
    tags("clients"),
    summary = "Get Client",
    security(("basic_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Client"),
        (status_code = StatusCode::NOT_FOUND, description = "Client not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ClientResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.identity_or_401()?;

    let client = state
        .app
        .clients
        .get_client(actor, uuid.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(client.into()))
}
