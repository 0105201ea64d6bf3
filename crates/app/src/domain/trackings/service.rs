//! Trackings Service

use async_trait::async_trait;
use brix::{
    access::{Visibility, authorize_mutation, can_view, visible_records},
    dataset::Dataset,
    filters::TrackingQuery,
    identities::Identity,
    summary::{ChannelSummary, red_channel},
    trackings::{TrackingDraft, TrackingRecord, TrackingUuid},
};
use mockall::automock;
use tracing::{info, warn};

use crate::{
    domain::trackings::{
        TrackingsServiceError,
        data::{TrackingOverview, TrackingUpdate},
    },
    store::Store,
};

/// [`TrackingsService`] over the shared [`Store`].
#[derive(Debug, Clone)]
pub struct StoreTrackingsService {
    store: Store,
}

impl StoreTrackingsService {
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

fn visible(dataset: &Dataset, actor: &Identity) -> Vec<TrackingRecord> {
    if let Visibility::Denied(reason) = Visibility::of(actor) {
        warn!(login = %actor.login, %reason, "identity scope is malformed; no records visible");
    }

    visible_records(&dataset.trackings, actor)
}

#[async_trait]
impl TrackingsService for StoreTrackingsService {
    #[tracing::instrument(
        name = "trackings.service.list_trackings",
        skip(self, actor, query),
        fields(login = %actor.login),
        err
    )]
    async fn list_trackings(
        &self,
        actor: &Identity,
        query: TrackingQuery,
    ) -> Result<Vec<TrackingRecord>, TrackingsServiceError> {
        let records = self
            .store
            .read(|dataset| query.apply(visible(dataset, actor), &dataset.clients))
            .await;

        Ok(records)
    }

    #[tracing::instrument(
        name = "trackings.service.get_tracking",
        skip(self, actor),
        fields(login = %actor.login, tracking_uuid = %uuid),
        err
    )]
    async fn get_tracking(
        &self,
        actor: &Identity,
        uuid: TrackingUuid,
    ) -> Result<TrackingRecord, TrackingsServiceError> {
        self.store
            .read(|dataset| {
                dataset
                    .trackings
                    .iter()
                    .find(|record| record.uuid == uuid && can_view(record, actor))
                    .cloned()
            })
            .await
            .ok_or(TrackingsServiceError::NotFound)
    }

    #[tracing::instrument(
        name = "trackings.service.summarize",
        skip(self, actor),
        fields(login = %actor.login),
        err
    )]
    async fn summarize(&self, actor: &Identity) -> Result<TrackingOverview, TrackingsServiceError> {
        let records = self.store.read(|dataset| visible(dataset, actor)).await;

        Ok(TrackingOverview {
            channels: ChannelSummary::from_records(&records),
            red_channel: red_channel(&records).into_iter().cloned().collect(),
        })
    }

    #[tracing::instrument(
        name = "trackings.service.create_tracking",
        skip(self, actor, draft),
        fields(login = %actor.login, client_uuid = %draft.client),
        err
    )]
    async fn create_tracking(
        &self,
        actor: &Identity,
        draft: TrackingDraft,
    ) -> Result<TrackingRecord, TrackingsServiceError> {
        authorize_mutation(actor)?;

        let draft = draft.validate()?;

        let record = self
            .store
            .write(|dataset| {
                if !dataset.clients.contains_key(&draft.client) {
                    return Err(TrackingsServiceError::UnknownClient(draft.client));
                }

                let record = TrackingRecord::new(TrackingUuid::new(), draft);
                dataset.trackings.push(record.clone());

                Ok(record)
            })
            .await?;

        info!(tracking_uuid = %record.uuid, container = %record.container, "created tracking record");

        Ok(record)
    }

    #[tracing::instrument(
        name = "trackings.service.update_tracking",
        skip(self, actor, update),
        fields(login = %actor.login, tracking_uuid = %uuid, expected_version = update.expected_version),
        err
    )]
    async fn update_tracking(
        &self,
        actor: &Identity,
        uuid: TrackingUuid,
        update: TrackingUpdate,
    ) -> Result<TrackingRecord, TrackingsServiceError> {
        authorize_mutation(actor)?;

        let draft = update.draft.validate()?;

        let record = self
            .store
            .write(|dataset| {
                let record = dataset
                    .trackings
                    .iter_mut()
                    .find(|record| record.uuid == uuid)
                    .ok_or(TrackingsServiceError::NotFound)?;

                if record.version != update.expected_version {
                    return Err(TrackingsServiceError::VersionConflict {
                        expected: update.expected_version,
                        actual: record.version,
                    });
                }

                if draft.client != record.client && !dataset.clients.contains_key(&draft.client) {
                    return Err(TrackingsServiceError::UnknownClient(draft.client));
                }

                record.apply(draft);

                Ok(record.clone())
            })
            .await?;

        info!(version = record.version, "updated tracking record");

        Ok(record)
    }

    #[tracing::instrument(
        name = "trackings.service.delete_tracking",
        skip(self, actor),
        fields(login = %actor.login, tracking_uuid = %uuid),
        err
    )]
    async fn delete_tracking(
        &self,
        actor: &Identity,
        uuid: TrackingUuid,
        expected_version: Option<u64>,
    ) -> Result<(), TrackingsServiceError> {
        authorize_mutation(actor)?;

        self.store
            .write(|dataset| {
                let position = dataset
                    .tracking_position(uuid)
                    .ok_or(TrackingsServiceError::NotFound)?;
                let actual = dataset
                    .trackings
                    .get(position)
                    .map_or(0, |record| record.version);

                match expected_version {
                    Some(expected) if expected != actual => {
                        return Err(TrackingsServiceError::VersionConflict { expected, actual });
                    }
                    Some(_) => {}
                    None => warn!(version = actual, "deleting without a version check"),
                }

                dataset.trackings.remove(position);

                Ok(())
            })
            .await?;

        info!("deleted tracking record");

        Ok(())
    }
}

#[automock]
#[async_trait]
/// Tracking record operations, always on behalf of an authenticated identity.
pub trait TrackingsService: Send + Sync {
    /// Records visible to `actor` that match `query`, in stored order.
    async fn list_trackings(
        &self,
        actor: &Identity,
        query: TrackingQuery,
    ) -> Result<Vec<TrackingRecord>, TrackingsServiceError>;

    /// A single record. Records `actor` cannot see are reported as not found.
    async fn get_tracking(
        &self,
        actor: &Identity,
        uuid: TrackingUuid,
    ) -> Result<TrackingRecord, TrackingsServiceError>;

    /// Channel counts and red channel alerts over the visible records.
    async fn summarize(&self, actor: &Identity) -> Result<TrackingOverview, TrackingsServiceError>;

    /// Create a record. Admin only.
    async fn create_tracking(
        &self,
        actor: &Identity,
        draft: TrackingDraft,
    ) -> Result<TrackingRecord, TrackingsServiceError>;

    /// Replace a record's fields if its version still matches. Admin only.
    async fn update_tracking(
        &self,
        actor: &Identity,
        uuid: TrackingUuid,
        update: TrackingUpdate,
    ) -> Result<TrackingRecord, TrackingsServiceError>;

    /// Delete a record, checking its version when one is given. Admin only.
    async fn delete_tracking(
        &self,
        actor: &Identity,
        uuid: TrackingUuid,
        expected_version: Option<u64>,
    ) -> Result<(), TrackingsServiceError>;
}
