//! Update Tracking Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use brix_app::domain::trackings::data::TrackingUpdate;

use crate::{
    extensions::*,
    state::State,
    trackings::{
        errors::into_status_error,
        models::{TrackingRequest, TrackingResponse},
    },
};

/// Update Tracking Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateTrackingRequest {
    /// Version returned by the last read of this record
    pub expected_version: u64,

    #[serde(flatten)]
    pub fields: TrackingRequest,
}

impl From<UpdateTrackingRequest> for TrackingUpdate {
    fn from(request: UpdateTrackingRequest) -> Self {
        TrackingUpdate {
            expected_version: request.expected_version,
            draft: request.fields.into(),
        }
    }
}

/// Update Tracking Handler
///
/// Replaces every editable field. Fails with a conflict when the record has
/// changed since `expected_version` was read.
#[endpoint(
    tags("trackings"),
    summary = "Update Tracking Record",
    security(("basic_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Tracking record updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Tracking record not found"),
        (status_code = StatusCode::CONFLICT, description = "Tracking record changed since it was read"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin only"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    json: JsonBody<UpdateTrackingRequest>,
    depot: &mut Depot,
) -> Result<Json<TrackingResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.identity_or_401()?;

    let record = state
        .app
        .trackings
        .update_tracking(actor, uuid.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(record.into()))
}
