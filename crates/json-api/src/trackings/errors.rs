//! Tracking Errors

use salvo::http::StatusError;
use tracing::error;

use brix_app::domain::trackings::TrackingsServiceError;

pub(crate) fn into_status_error(error: TrackingsServiceError) -> StatusError {
    match error {
        TrackingsServiceError::AccessDenied(reason) => {
            StatusError::forbidden().brief(reason.to_string())
        }
        TrackingsServiceError::NotFound => StatusError::not_found().brief("Tracking record not found"),
        TrackingsServiceError::UnknownClient(client) => {
            StatusError::bad_request().brief(format!("Unknown client {client}"))
        }
        TrackingsServiceError::Invalid(source) => StatusError::bad_request()
            .brief("Invalid tracking record")
            .detail(source.to_string()),
        TrackingsServiceError::VersionConflict { expected, actual } => StatusError::conflict()
            .brief("Tracking record was changed by someone else")
            .detail(format!("expected version {expected}, current version {actual}")),
        TrackingsServiceError::Storage(source) => {
            error!("failed to persist tracking records: {source}");

            StatusError::internal_server_error()
        }
    }
}
