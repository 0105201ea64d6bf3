//! Create Client Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use brix_app::domain::clients::data::{CreatedClient, NewClient};

use crate::{
    clients::{
        errors::into_status_error,
        models::{ClientDetailsPayload, ClientResponse},
    },
    extensions::*,
    state::State,
};

/// Create Client Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateClientRequest {
    #[serde(flatten)]
    pub details: ClientDetailsPayload,

    /// Also issue a client login derived from the legal name
    #[serde(default)]
    pub create_login: bool,
}

impl From<CreateClientRequest> for NewClient {
    fn from(request: CreateClientRequest) -> Self {
        NewClient {
            details: request.details.into(),
            create_login: request.create_login,
        }
    }
}

/// Login issued for a new client
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct IssuedLoginResponse {
    pub login: String,

    /// Temporary secret. It is not retrievable later.
    pub secret: String,
}

/// Client Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ClientCreatedResponse {
    pub client: ClientResponse,

    /// Present when a login was requested and could be issued
    pub login: Option<IssuedLoginResponse>,
}

impl From<CreatedClient> for ClientCreatedResponse {
    fn from(created: CreatedClient) -> Self {
        ClientCreatedResponse {
            client: created.client.into(),
            login: created.login.map(|issued| IssuedLoginResponse {
                login: issued.login.as_str().to_string(),
                secret: issued.secret.expose().to_string(),
            }),
        }
    }
}

/// Create Client Handler
#[endpoint(
    tags("clients"),
    summary = "Create Client",
    security(("basic_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Client created"),
        (status_code = StatusCode::CONFLICT, description = "Client already exists"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin only"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateClientRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ClientCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.identity_or_401()?;

    let created = state
        .app
        .clients
        .create_client(actor, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    let uuid = created.client.uuid;

    res.add_header(LOCATION, format!("/clients/{uuid}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(created.into()))
}
