//! Get Tracking Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    state::State,
    trackings::{errors::into_status_error, models::TrackingResponse},
};

/// Get Tracking Handler
///
/// Records outside the caller's scope are reported as not found.
#[endpoint(
    tags("trackings"),
    summary = "Get Tracking Record",
    security(("basic_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Tracking record"),
        (status_code = StatusCode::NOT_FOUND, description = "Tracking record not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<TrackingResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.identity_or_401()?;

    let record = state
        .app
        .trackings
        .get_tracking(actor, uuid.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(record.into()))
}
