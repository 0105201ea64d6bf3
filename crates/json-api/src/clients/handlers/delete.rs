//! Delete Client Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use brix::dataset::ClientRemoval;

use crate::{clients::errors::into_status_error, extensions::*, state::State};

/// What was removed along with the client
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ClientDeletedResponse {
    pub trackings_removed: usize,

    /// Logins whose only client this was
    pub identities_removed: usize,

    /// Logins that kept access to other clients
    pub identities_narrowed: usize,
}

impl From<ClientRemoval> for ClientDeletedResponse {
    fn from(removal: ClientRemoval) -> Self {
        ClientDeletedResponse {
            trackings_removed: removal.trackings_removed,
            identities_removed: removal.identities_removed,
            identities_narrowed: removal.identities_narrowed,
        }
    }
}

/// Delete Client Handler
///
/// Also deletes the client's tracking records and any login linked only to it.
#[endpoint(
    tags("clients"),
    summary = "Delete Client",
    security(("basic_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Client deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Client not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin only"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ClientDeletedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.identity_or_401()?;

    let removal = state
        .app
        .clients
        .delete_client(actor, uuid.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(removal.into()))
}
