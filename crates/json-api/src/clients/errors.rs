//! Client Errors

use salvo::http::StatusError;
use tracing::error;

use brix_app::domain::clients::ClientsServiceError;

pub(crate) fn into_status_error(error: ClientsServiceError) -> StatusError {
    match error {
        ClientsServiceError::AccessDenied(reason) => {
            StatusError::forbidden().brief(reason.to_string())
        }
        ClientsServiceError::NotFound => StatusError::not_found().brief("Client not found"),
        ClientsServiceError::AlreadyExists => {
            StatusError::conflict().brief("A client with this legal name already exists")
        }
        ClientsServiceError::Invalid(source) => StatusError::bad_request()
            .brief("Invalid client")
            .detail(source.to_string()),
        ClientsServiceError::Login(source) => StatusError::bad_request()
            .brief("Could not issue a login for this client")
            .detail(source.to_string()),
        ClientsServiceError::Storage(source) => {
            error!("failed to persist clients: {source}");

            StatusError::internal_server_error()
        }
    }
}
