//! Search Filters
//!
//! Narrowing filters applied on top of an already access-filtered record set.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::{
    clients::{Client, ClientUuid},
    trackings::{CustomsChannel, TrackingRecord},
};

/// Customs channel filter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelFilter {
    /// Green channel only.
    Green,

    /// Red channel only.
    Red,

    /// Not yet classified.
    Pending,
}

impl ChannelFilter {
    fn matches(self, channel: Option<CustomsChannel>) -> bool {
        match self {
            Self::Green => channel == Some(CustomsChannel::Green),
            Self::Red => channel == Some(CustomsChannel::Red),
            Self::Pending => channel.is_none(),
        }
    }
}

/// Tracking search criteria. Empty criteria match everything.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrackingQuery {
    /// Case-insensitive substring of the client's legal or trade name.
    pub client: Option<String>,

    /// Case-insensitive substring of the container id.
    pub container: Option<String>,

    /// Exact customs channel.
    pub channel: Option<ChannelFilter>,
}

impl TrackingQuery {
    /// Keep the records matching every criterion, preserving order.
    ///
    /// Takes ownership of an access-filtered set so the result can only ever be
    /// a subset of it. Records whose client is unknown never match a client
    /// name criterion.
    pub fn apply(
        &self,
        mut records: Vec<TrackingRecord>,
        clients: &FxHashMap<ClientUuid, Client>,
    ) -> Vec<TrackingRecord> {
        let client = needle(self.client.as_deref());
        let container = needle(self.container.as_deref());

        records.retain(|record| {
            client.as_deref().is_none_or(|needle| {
                clients
                    .get(&record.client)
                    .is_some_and(|client| client_matches(client, needle))
            }) && container
                .as_deref()
                .is_none_or(|needle| record.container.to_lowercase().contains(needle))
                && self
                    .channel
                    .is_none_or(|channel| channel.matches(record.customs_channel))
        });

        records
    }
}

fn needle(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_lowercase)
}

fn client_matches(client: &Client, needle: &str) -> bool {
    client.legal_name.to_lowercase().contains(needle)
        || client.trade_name.to_lowercase().contains(needle)
}
