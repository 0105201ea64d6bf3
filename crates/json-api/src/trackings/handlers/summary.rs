//! Tracking Summary Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use brix_app::domain::trackings::data::TrackingOverview;

use crate::{
    extensions::*,
    state::State,
    trackings::{errors::into_status_error, models::TrackingResponse},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SummaryResponse {
    pub total: usize,
    pub green: usize,
    pub red: usize,
    pub pending: usize,

    /// Red channel records needing follow-up
    pub red_channel: Vec<TrackingResponse>,
}

impl From<TrackingOverview> for SummaryResponse {
    fn from(overview: TrackingOverview) -> Self {
        SummaryResponse {
            total: overview.channels.total,
            green: overview.channels.green,
            red: overview.channels.red,
            pending: overview.channels.pending,
            red_channel: overview.red_channel.into_iter().map(Into::into).collect(),
        }
    }
}

/// Tracking Summary Handler
///
/// Counts the caller's visible records by customs channel.
#[endpoint(
    tags("trackings"),
    summary = "Summarize Tracking Records",
    security(("basic_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Channel counts"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing or wrong credentials"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<SummaryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.identity_or_401()?;

    let overview = state
        .app
        .trackings
        .summarize(actor)
        .await
        .map_err(into_status_error)?;

    Ok(Json(overview.into()))
}

#[cfg(test)]
mod tests {
    use brix::{clients::ClientUuid, summary::ChannelSummary};
    use brix_app::domain::trackings::MockTrackingsService;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{test_admin, trackings_service};

    use super::{super::tests::*, *};

    #[tokio::test]
    async fn test_summary_returns_counts_and_red_channel() -> TestResult {
        let record = make_record(ClientUuid::new(), "MSKU9876543");

        let mut trackings = MockTrackingsService::new();

        trackings
            .expect_summarize()
            .once()
            .return_once(move |_| {
                Ok(TrackingOverview {
                    channels: ChannelSummary::from_records(std::slice::from_ref(&record)),
                    red_channel: vec![record],
                })
            });

        let service = trackings_service(
            trackings,
            test_admin()?,
            Router::with_path("trackings/summary").get(handler),
        );

        let mut res = TestClient::get("http://example.com/trackings/summary")
            .send(&service)
            .await;

        let body: SummaryResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!((body.total, body.red, body.green, body.pending), (1, 1, 0, 0));
        assert_eq!(body.red_channel.len(), 1);

        Ok(())
    }
}
