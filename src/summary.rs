//! Channel Summary

use serde::{Deserialize, Serialize};

use crate::trackings::{CustomsChannel, TrackingRecord};

/// Record counts by customs channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChannelSummary {
    /// All records.
    pub total: usize,

    /// Green channel.
    pub green: usize,

    /// Red channel.
    pub red: usize,

    /// Not yet classified.
    pub pending: usize,
}

impl ChannelSummary {
    /// Count records by channel.
    pub fn from_records(records: &[TrackingRecord]) -> Self {
        records
            .iter()
            .fold(Self::default(), |mut summary, record| {
                summary.total += 1;

                match record.customs_channel {
                    Some(CustomsChannel::Green) => summary.green += 1,
                    Some(CustomsChannel::Red) => summary.red += 1,
                    None => summary.pending += 1,
                }

                summary
            })
    }
}

/// Red channel records, which need follow-up, in their original order.
pub fn red_channel(records: &[TrackingRecord]) -> Vec<&TrackingRecord> {
    records
        .iter()
        .filter(|record| record.customs_channel == Some(CustomsChannel::Red))
        .collect()
}
