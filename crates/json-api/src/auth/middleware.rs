//! Auth middleware.

use std::sync::Arc;

use brix_app::domain::identities::IdentitiesServiceError;
use salvo::{
    http::header::{HeaderValue, WWW_AUTHENTICATE},
    prelude::*,
};
use tracing::{error, info};

use crate::{
    auth::credentials::extract_basic_credentials, extensions::*,
    observability::observe_authentication_failure, state::State,
};

const CHALLENGE: &str = r#"Basic realm="brix", charset="UTF-8""#;

fn reject(res: &mut Response, brief: &str) {
    observe_authentication_failure();

    res.headers_mut()
        .insert(WWW_AUTHENTICATE, HeaderValue::from_static(CHALLENGE));
    res.render(StatusError::unauthorized().brief(brief));
}

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(credentials) = extract_basic_credentials(req) else {
        reject(res, "Missing or invalid Authorization header");

        return;
    };

    let state = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => state,
        Err(error) => {
            res.render(error);

            return;
        }
    };

    let identity = match state
        .app
        .identities
        .authenticate(&credentials.login, &credentials.secret)
        .await
    {
        Ok(identity) => identity,
        Err(IdentitiesServiceError::Rejected(_)) => {
            info!("rejected credentials");
            reject(res, "Invalid login or secret");

            return;
        }
        Err(source) => {
            error!("failed to authenticate request: {source}");

            res.render(StatusError::internal_server_error());

            return;
        }
    };

    depot.insert_identity(identity);

    ctrl.call_next(req, depot, res).await;
}

#[cfg(test)]
mod tests {
    use base64::{Engine as _, engine::general_purpose::STANDARD};
    use brix::access::AuthenticationRejected;
    use brix_app::domain::identities::MockIdentitiesService;
    use salvo::{
        affix_state::inject,
        http::header::AUTHORIZATION,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use crate::test_helpers::{state_with_identities, test_admin};

    use super::*;

    #[salvo::handler]
    async fn echo_login(depot: &mut Depot, res: &mut Response) {
        let login = depot
            .identity_or_401()
            .map_or_else(|_| "missing".to_string(), |identity| identity.login.to_string());

        res.render(login);
    }

    fn make_service(identities: MockIdentitiesService) -> Service {
        let router = Router::new()
            .hoop(inject(state_with_identities(identities)))
            .hoop(handler)
            .push(Router::new().get(echo_login));

        Service::new(router)
    }

    fn basic(raw: &str) -> String {
        format!("Basic {}", STANDARD.encode(raw))
    }

    #[tokio::test]
    async fn test_missing_authorization_header_returns_401() -> TestResult {
        let mut identities = MockIdentitiesService::new();

        identities.expect_authenticate().never();

        let res = TestClient::get("http://example.com")
            .send(&make_service(identities))
            .await;

        let challenge = res
            .headers()
            .get(WWW_AUTHENTICATE)
            .and_then(|value| value.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
        assert_eq!(challenge, Some(CHALLENGE));

        Ok(())
    }

    #[tokio::test]
    async fn test_bearer_authorization_header_returns_401() -> TestResult {
        let mut identities = MockIdentitiesService::new();

        identities.expect_authenticate().never();

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer abc123", true)
            .send(&make_service(identities))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_rejected_credentials_return_401() -> TestResult {
        let mut identities = MockIdentitiesService::new();

        identities
            .expect_authenticate()
            .once()
            .withf(|login, secret| login == "admin" && secret == "wrong")
            .return_once(|_, _| Err(AuthenticationRejected.into()));

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, basic("admin:wrong"), true)
            .send(&make_service(identities))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_valid_credentials_inject_identity() -> TestResult {
        let admin = test_admin()?;
        let mut identities = MockIdentitiesService::new();

        identities
            .expect_authenticate()
            .once()
            .withf(|login, secret| login == "Admin" && secret == "admin123")
            .return_once(move |_, _| Ok(admin));

        let mut res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, basic("Admin:admin123"), true)
            .send(&make_service(identities))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "admin");

        Ok(())
    }
}
