//! Delete Identity Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{extensions::*, identities::errors::into_status_error, state::State};

use super::parse_login;

/// Delete Identity Handler
#[endpoint(
    tags("identities"),
    summary = "Delete Identity",
    security(("basic_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Identity deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Identity not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin only"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    login: PathParam<String>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.identity_or_401()?;
    let target = parse_login(&login.into_inner())?;

    state
        .app
        .identities
        .delete_identity(actor, &target)
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}
