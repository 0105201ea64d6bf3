//! Tracking Records
//!
//! One record per container shipment, following it from loading through the
//! vessel leg, customs clearance and unloading at the border destination.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    clients::{ClientUuid, non_blank},
    uuids::TypedUuid,
};

/// Tracking UUID
pub type TrackingUuid = TypedUuid<TrackingRecord>;

/// Tracking validation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrackingError {
    /// Container id was blank after trimming.
    #[error("container id cannot be empty")]
    EmptyContainer,
}

/// Customs channel classification.
///
/// Green shipments are fast-tracked; red ones are held for physical
/// inspection. A record with no channel is still pending classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomsChannel {
    /// Released without inspection.
    Green,

    /// Held for physical inspection.
    Red,
}

impl Display for CustomsChannel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Green => "green",
            Self::Red => "red",
        })
    }
}

/// Shipment milestones.
///
/// Dates are kept as entered; nothing here parses or orders them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Milestones {
    /// Loaded at origin.
    pub loaded_at: Option<String>,

    /// Boarded the vessel.
    pub vessel_boarded_at: Option<String>,

    /// Vessel departed.
    pub vessel_departed_at: Option<String>,

    /// Estimated arrival at the destination port.
    pub estimated_arrival_at: Option<String>,

    /// Arrived at the destination port.
    pub arrived_at: Option<String>,

    /// Released by customs at the destination port.
    pub customs_released_at: Option<String>,

    /// Arrived at the final (border) destination.
    pub destination_arrived_at: Option<String>,

    /// Unloaded at the final destination.
    pub unloaded_at: Option<String>,
}

impl Milestones {
    fn normalized(self) -> Self {
        Self {
            loaded_at: non_blank(self.loaded_at),
            vessel_boarded_at: non_blank(self.vessel_boarded_at),
            vessel_departed_at: non_blank(self.vessel_departed_at),
            estimated_arrival_at: non_blank(self.estimated_arrival_at),
            arrived_at: non_blank(self.arrived_at),
            customs_released_at: non_blank(self.customs_released_at),
            destination_arrived_at: non_blank(self.destination_arrived_at),
            unloaded_at: non_blank(self.unloaded_at),
        }
    }
}

/// Tracking Record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrackingRecord {
    /// Record id.
    pub uuid: TrackingUuid,

    /// Incremented on every update; starts at 1.
    pub version: u64,

    /// Owning client.
    pub client: ClientUuid,

    /// Container id.
    pub container: String,

    /// Milestone dates.
    pub milestones: Milestones,

    /// Customs classification, `None` while pending.
    pub customs_channel: Option<CustomsChannel>,

    /// Free-text final status.
    pub final_status: Option<String>,
}

/// Tracking fields supplied by an admin on create or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingDraft {
    /// Owning client.
    pub client: ClientUuid,

    /// Container id.
    pub container: String,

    /// Milestone dates.
    pub milestones: Milestones,

    /// Customs classification.
    pub customs_channel: Option<CustomsChannel>,

    /// Free-text final status.
    pub final_status: Option<String>,
}

impl TrackingDraft {
    /// Trim text fields, turning blank optionals into `None`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingError::EmptyContainer`] if the container id is blank.
    pub fn validate(self) -> Result<Self, TrackingError> {
        let container = self.container.trim().to_string();

        if container.is_empty() {
            return Err(TrackingError::EmptyContainer);
        }

        Ok(Self {
            client: self.client,
            container,
            milestones: self.milestones.normalized(),
            customs_channel: self.customs_channel,
            final_status: non_blank(self.final_status),
        })
    }
}

impl TrackingRecord {
    /// Create a first-version record from a validated draft.
    #[must_use]
    pub fn new(uuid: TrackingUuid, draft: TrackingDraft) -> Self {
        Self {
            uuid,
            version: 1,
            client: draft.client,
            container: draft.container,
            milestones: draft.milestones,
            customs_channel: draft.customs_channel,
            final_status: draft.final_status,
        }
    }

    /// Replace every editable field and bump the version.
    pub fn apply(&mut self, draft: TrackingDraft) {
        self.client = draft.client;
        self.container = draft.container;
        self.milestones = draft.milestones;
        self.customs_channel = draft.customs_channel;
        self.final_status = draft.final_status;
        self.version += 1;
    }
}
