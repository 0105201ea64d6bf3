//! Identity Errors

use salvo::http::StatusError;
use tracing::error;

use brix_app::domain::identities::IdentitiesServiceError;

pub(crate) fn into_status_error(error: IdentitiesServiceError) -> StatusError {
    match error {
        IdentitiesServiceError::Rejected(_) => StatusError::unauthorized(),
        IdentitiesServiceError::AccessDenied(reason) => {
            StatusError::forbidden().brief(reason.to_string())
        }
        IdentitiesServiceError::NotFound => StatusError::not_found().brief("Identity not found"),
        IdentitiesServiceError::AlreadyExists => {
            StatusError::conflict().brief("An identity with this login already exists")
        }
        IdentitiesServiceError::UnknownClient(client) => {
            StatusError::bad_request().brief(format!("Unknown client {client}"))
        }
        IdentitiesServiceError::Invalid(source) => StatusError::bad_request()
            .brief("Invalid identity")
            .detail(source.to_string()),
        IdentitiesServiceError::Storage(source) => {
            error!("failed to persist identities: {source}");

            StatusError::internal_server_error()
        }
    }
}
