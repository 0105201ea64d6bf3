//! Delete Tracking Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{PathParam, QueryParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{extensions::*, state::State, trackings::errors::into_status_error};

/// Delete Tracking Handler
///
/// Pass `version` to refuse the delete if the record changed since it was read.
#[endpoint(
    tags("trackings"),
    summary = "Delete Tracking Record",
    security(("basic_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Tracking record deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Tracking record not found"),
        (status_code = StatusCode::CONFLICT, description = "Tracking record changed since it was read"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin only"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    version: QueryParam<u64, false>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.identity_or_401()?;

    state
        .app
        .trackings
        .delete_tracking(actor, uuid.into_inner().into(), version.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}
