//! Identity Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    identities::{errors::into_status_error, models::IdentityResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct IdentitiesResponse {
    /// Identities ordered by login
    pub identities: Vec<IdentityResponse>,
}

/// Identity Index Handler
#[endpoint(
    tags("identities"),
    summary = "List Identities",
    security(("basic_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Identities"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin only"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<IdentitiesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.identity_or_401()?;

    let identities = state
        .app
        .identities
        .list_identities(actor)
        .await
        .map_err(into_status_error)?;

    Ok(Json(IdentitiesResponse {
        identities: identities.into_iter().map(Into::into).collect(),
    }))
}
