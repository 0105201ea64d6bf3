//! Tracking Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use brix::filters::{ChannelFilter, TrackingQuery};

use crate::{
    extensions::*,
    state::State,
    trackings::{errors::into_status_error, models::TrackingResponse},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TrackingsResponse {
    /// Tracking records visible to the caller, in insertion order
    pub trackings: Vec<TrackingResponse>,
}

fn parse_channel(raw: Option<String>) -> Result<Option<ChannelFilter>, StatusError> {
    raw.map(|value| match value.trim().to_ascii_lowercase().as_str() {
        "green" => Ok(ChannelFilter::Green),
        "red" => Ok(ChannelFilter::Red),
        "pending" => Ok(ChannelFilter::Pending),
        _ => Err(StatusError::bad_request()
            .brief("channel must be one of green, red or pending")),
    })
    .transpose()
}

/// Tracking Index Handler
///
/// Returns the tracking records the caller may see, optionally narrowed by
/// client name, container id and customs channel.
#[endpoint(
    tags("trackings"),
    summary = "List Tracking Records",
    security(("basic_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Tracking records"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown channel filter"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing or wrong credentials"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    client: QueryParam<String, false>,
    container: QueryParam<String, false>,
    channel: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<TrackingsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.identity_or_401()?;

    let query = TrackingQuery {
        client: client.into_inner(),
        container: container.into_inner(),
        channel: parse_channel(channel.into_inner())?,
    };

    let trackings = state
        .app
        .trackings
        .list_trackings(actor, query)
        .await
        .map_err(into_status_error)?;

    Ok(Json(TrackingsResponse {
        trackings: trackings.into_iter().map(Into::into).collect(),
    }))
}
