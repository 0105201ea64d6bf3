//! Identity Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    identities::{errors::into_status_error, models::IdentityResponse},
    state::State,
};

use super::parse_login;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct IdentityStatusRequest {
    pub active: bool,
}

/// Identity Status Handler
///
/// Deactivated identities keep their data but can no longer log in.
#[endpoint(
    tags("identities"),
    summary = "Activate or Deactivate Identity",
    security(("basic_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Identity status changed"),
        (status_code = StatusCode::NOT_FOUND, description = "Identity not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin only"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    login: PathParam<String>,
    json: JsonBody<IdentityStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<IdentityResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.identity_or_401()?;
    let target = parse_login(&login.into_inner())?;

    let identity = state
        .app
        .identities
        .set_active(actor, &target, json.into_inner().active)
        .await
        .map_err(into_status_error)?;

    Ok(Json(identity.into()))
}
