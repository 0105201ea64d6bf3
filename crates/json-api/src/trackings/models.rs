//! Tracking Payloads

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use brix::trackings::{CustomsChannel, Milestones, TrackingDraft, TrackingRecord};

/// Customs channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ChannelPayload {
    /// Released without inspection
    Green,

    /// Held for inspection
    Red,
}

impl From<ChannelPayload> for CustomsChannel {
    fn from(channel: ChannelPayload) -> Self {
        match channel {
            ChannelPayload::Green => CustomsChannel::Green,
            ChannelPayload::Red => CustomsChannel::Red,
        }
    }
}

impl From<CustomsChannel> for ChannelPayload {
    fn from(channel: CustomsChannel) -> Self {
        match channel {
            CustomsChannel::Green => ChannelPayload::Green,
            CustomsChannel::Red => ChannelPayload::Red,
        }
    }
}

/// Shipment milestone dates, as entered
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct MilestonesPayload {
    pub loaded_at: Option<String>,
    pub vessel_boarded_at: Option<String>,
    pub vessel_departed_at: Option<String>,
    pub estimated_arrival_at: Option<String>,
    pub arrived_at: Option<String>,
    pub customs_released_at: Option<String>,
    pub destination_arrived_at: Option<String>,
    pub unloaded_at: Option<String>,
}

impl From<MilestonesPayload> for Milestones {
    fn from(payload: MilestonesPayload) -> Self {
        Milestones {
            loaded_at: payload.loaded_at,
            vessel_boarded_at: payload.vessel_boarded_at,
            vessel_departed_at: payload.vessel_departed_at,
            estimated_arrival_at: payload.estimated_arrival_at,
            arrived_at: payload.arrived_at,
            customs_released_at: payload.customs_released_at,
            destination_arrived_at: payload.destination_arrived_at,
            unloaded_at: payload.unloaded_at,
        }
    }
}

impl From<Milestones> for MilestonesPayload {
    fn from(milestones: Milestones) -> Self {
        MilestonesPayload {
            loaded_at: milestones.loaded_at,
            vessel_boarded_at: milestones.vessel_boarded_at,
            vessel_departed_at: milestones.vessel_departed_at,
            estimated_arrival_at: milestones.estimated_arrival_at,
            arrived_at: milestones.arrived_at,
            customs_released_at: milestones.customs_released_at,
            destination_arrived_at: milestones.destination_arrived_at,
            unloaded_at: milestones.unloaded_at,
        }
    }
}

/// Tracking Record Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TrackingRequest {
    /// Owning client UUID
    pub client: Uuid,

    /// Container id
    pub container: String,

    #[serde(default)]
    pub milestones: MilestonesPayload,

    /// Customs channel; omit while pending
    pub customs_channel: Option<ChannelPayload>,

    /// Free-text final status
    pub final_status: Option<String>,
}

impl From<TrackingRequest> for TrackingDraft {
    fn from(request: TrackingRequest) -> Self {
        TrackingDraft {
            client: request.client.into(),
            container: request.container,
            milestones: request.milestones.into(),
            customs_channel: request.customs_channel.map(Into::into),
            final_status: request.final_status,
        }
    }
}

/// Tracking Record Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TrackingResponse {
    pub uuid: Uuid,

    /// Pass back when updating or deleting
    pub version: u64,

    pub client: Uuid,
    pub container: String,
    pub milestones: MilestonesPayload,
    pub customs_channel: Option<ChannelPayload>,
    pub final_status: Option<String>,
}

impl From<TrackingRecord> for TrackingResponse {
    fn from(record: TrackingRecord) -> Self {
        TrackingResponse {
            uuid: record.uuid.into(),
            version: record.version,
            client: record.client.into(),
            container: record.container,
            milestones: record.milestones.into(),
            customs_channel: record.customs_channel.map(Into::into),
            final_status: record.final_status,
        }
    }
}
