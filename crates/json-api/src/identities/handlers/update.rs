//! Update Identity Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use brix_app::domain::identities::data::IdentityUpdate;

use crate::{
    extensions::*,
    identities::{
        errors::into_status_error,
        models::{IdentityResponse, ProfilePayload},
    },
    state::State,
};

use super::parse_login;

/// Update Identity Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateIdentityRequest {
    #[serde(flatten)]
    pub profile: ProfilePayload,

    /// Replacement secret; omit to keep the current one
    #[serde(default)]
    pub secret: Option<String>,
}

impl From<UpdateIdentityRequest> for IdentityUpdate {
    fn from(request: UpdateIdentityRequest) -> Self {
        IdentityUpdate {
            profile: request.profile.into(),
            secret: request.secret,
        }
    }
}

/// Update Identity Handler
///
/// Admins cannot demote themselves.
#[endpoint(
    tags("identities"),
    summary = "Update Identity",
    security(("basic_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Identity updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Identity not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin only"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    login: PathParam<String>,
    json: JsonBody<UpdateIdentityRequest>,
    depot: &mut Depot,
) -> Result<Json<IdentityResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.identity_or_401()?;
    let target = parse_login(&login.into_inner())?;

    let identity = state
        .app
        .identities
        .update_identity(actor, &target, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(identity.into()))
}
