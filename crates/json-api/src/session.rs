//! Session Handler

use salvo::prelude::*;

use crate::{extensions::*, identities::models::IdentityResponse};

/// Session Handler
///
/// Returns the identity the request was authenticated as. Dashboards call this
/// after login to decide which screens to show.
#[endpoint(
    tags("session"),
    summary = "Current Identity",
    security(("basic_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Authenticated identity"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing or wrong credentials"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<IdentityResponse>, StatusError> {
    let actor = depot.identity_or_401()?;

    Ok(Json(actor.into()))
}

#[cfg(test)]
mod tests {
    use brix::clients::ClientUuid;
    use brix_app::domain::identities::MockIdentitiesService;
    use salvo::{
        affix_state::inject,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use crate::{
        identities::models::RolePayload,
        test_helpers::{identities_service, state_with_identities, test_client},
    };

    use super::*;

    #[tokio::test]
    async fn test_session_describes_the_caller() -> TestResult {
        let client = ClientUuid::new();

        let service = identities_service(
            MockIdentitiesService::new(),
            test_client(&[client])?,
            Router::with_path("session").get(handler),
        );

        let mut res = TestClient::get("http://example.com/session")
            .send(&service)
            .await;

        let body: IdentityResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.login, "aristide");
        assert_eq!(body.role, RolePayload::Client);
        assert_eq!(body.clients, Some(vec![client.into_uuid()]));

        Ok(())
    }

    #[tokio::test]
    async fn test_session_without_identity_returns_401() -> TestResult {
        let service = Service::new(
            Router::new()
                .hoop(inject(state_with_identities(MockIdentitiesService::new())))
                .push(Router::with_path("session").get(handler)),
        );

        let res = TestClient::get("http://example.com/session")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
