//! Create Identity Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use brix_app::domain::identities::data::NewIdentity;

use crate::{
    extensions::*,
    identities::{
        errors::into_status_error,
        models::{IdentityResponse, ProfilePayload},
    },
    state::State,
};

/// Create Identity Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateIdentityRequest {
    /// Login id; stored trimmed and lowercased
    pub login: String,

    pub secret: String,

    #[serde(flatten)]
    pub profile: ProfilePayload,
}

impl From<CreateIdentityRequest> for NewIdentity {
    fn from(request: CreateIdentityRequest) -> Self {
        NewIdentity {
            login: request.login,
            secret: request.secret,
            profile: request.profile.into(),
        }
    }
}

/// Create Identity Handler
#[endpoint(
    tags("identities"),
    summary = "Create Identity",
    security(("basic_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Identity created"),
        (status_code = StatusCode::CONFLICT, description = "Login already taken"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin only"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateIdentityRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<IdentityResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.identity_or_401()?;

    let identity = state
        .app
        .identities
        .create_identity(actor, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/identities/{}", identity.login), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(identity.into()))
}
