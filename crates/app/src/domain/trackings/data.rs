//! Tracking Data

use brix::{
    summary::ChannelSummary,
    trackings::{TrackingDraft, TrackingRecord},
};

/// Replacement fields for an existing record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingUpdate {
    /// Version the caller last read. The update is refused if the record has
    /// moved on since.
    pub expected_version: u64,

    /// New field values.
    pub draft: TrackingDraft,
}

/// Dashboard overview of the records an identity can see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingOverview {
    /// Counts by customs channel.
    pub channels: ChannelSummary,

    /// Red channel records needing follow-up.
    pub red_channel: Vec<TrackingRecord>,
}
