//! Create Tracking Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    state::State,
    trackings::{errors::into_status_error, models::TrackingRequest},
};

/// Tracking Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TrackingCreatedResponse {
    /// Created record UUID
    pub uuid: Uuid,

    pub version: u64,
}

/// Create Tracking Handler
#[endpoint(
    tags("trackings"),
    summary = "Create Tracking Record",
    security(("basic_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Tracking record created"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin only"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<TrackingRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<TrackingCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.identity_or_401()?;

    let record = state
        .app
        .trackings
        .create_tracking(actor, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    let uuid = record.uuid;

    res.add_header(LOCATION, format!("/trackings/{uuid}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(TrackingCreatedResponse {
        uuid: uuid.into(),
        version: record.version,
    }))
}
