//! Update Client Handler

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

use brix_app::domain::clients::data::ClientUpdate;

use crate::{
    clients::{
        errors::into_status_error,
        models::{ClientDetailsPayload, ClientResponse},
    },
    extensions::*,
    state::State,
};

fn active_by_default() -> bool {
    true
}

/// Update Client Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateClientRequest {
    #[serde(flatten)]
    pub details: ClientDetailsPayload,

    #[serde(default = "active_by_default")]
    pub active: bool,
}

impl From<UpdateClientRequest> for ClientUpdate {
    fn from(request: UpdateClientRequest) -> Self {
        ClientUpdate {
            details: request.details.into(),
            active: request.active,
        }
    }
}

/// Update Client Handler
///
/// Renaming a client keeps every tracking record and login linked to it.
#[endpoint(
    tags("clients"),
    summary = "Update Client",
    security(("basic_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Client updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Client not found"),
        (status_code = StatusCode::CONFLICT, description = "Another client has this legal name"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin only"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    json: JsonBody<UpdateClientRequest>,
    depot: &mut Depot,
) -> Result<Json<ClientResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.identity_or_401()?;

    let client = state
        .app
        .clients
        .update_client(actor, uuid.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(client.into()))
}

#[cfg(test)]
mod tests {
    use brix::clients::ClientUuid;
    use brix_app::domain::clients::{ClientsServiceError, MockClientsService};
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{clients_service, test_admin};

    use super::{super::tests::*, *};

    fn make_service(clients: MockClientsService) -> TestResult<Service> {
        Ok(clients_service(
            clients,
            test_admin()?,
            Router::with_path("clients/{uuid}").put(handler),
        ))
    }

    #[tokio::test]
    async fn test_update_client_renames_in_place() -> TestResult {
        let mut client = make_client("MC Confecciones");
        let uuid = client.uuid;

        let mut clients = MockClientsService::new();

        clients
            .expect_update_client()
            .once()
            .withf(move |_, u, update| {
                *u == uuid && update.details.legal_name == "MC Confecções" && !update.active
            })
            .return_once(move |_, _, update| {
                client.apply(update.details, update.active);
                Ok(client)
            });

        let mut res = TestClient::put(format!("http://example.com/clients/{uuid}"))
            .json(&json!({
                "legal_name": "MC Confecções",
                "trade_name": "MC",
                "email": "mc@example.com",
                "active": false,
            }))
            .send(&make_service(clients)?)
            .await;

        let body: ClientResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.uuid, uuid.into_uuid());
        assert_eq!(body.legal_name, "MC Confecções");
        assert!(!body.active);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_client_name_collision_returns_409() -> TestResult {
        let uuid = ClientUuid::new();

        let mut clients = MockClientsService::new();

        clients
            .expect_update_client()
            .once()
            .withf(|_, _, update| update.active)
            .return_once(|_, _, _| Err(ClientsServiceError::AlreadyExists));

        let res = TestClient::put(format!("http://example.com/clients/{uuid}"))
            .json(&json!({
                "legal_name": "Aristide SA",
                "trade_name": "Aristide",
                "email": "contato@aristide.example",
            }))
            .send(&make_service(clients)?)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
