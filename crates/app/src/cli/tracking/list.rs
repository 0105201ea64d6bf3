use brix::{
    filters::{ChannelFilter, TrackingQuery},
    trackings::CustomsChannel,
};
use clap::{Args, ValueEnum};
use rustc_hash::FxHashMap;
use tabled::settings::Color;

use crate::cli::{
    args::{CredentialArgs, StorageArgs},
    table::{self, CellColors},
};

#[derive(Debug, Args)]
pub(crate) struct ListTrackingsArgs {
    #[command(flatten)]
    storage: StorageArgs,

    #[command(flatten)]
    credentials: CredentialArgs,

    /// Part of the client's legal or trade name
    #[arg(long)]
    client: Option<String>,

    /// Part of the container id
    #[arg(long)]
    container: Option<String>,

    #[arg(long, value_enum)]
    channel: Option<ChannelArg>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ChannelArg {
    Green,
    Red,
    Pending,
}

impl From<ChannelArg> for ChannelFilter {
    fn from(channel: ChannelArg) -> Self {
        match channel {
            ChannelArg::Green => ChannelFilter::Green,
            ChannelArg::Red => ChannelFilter::Red,
            ChannelArg::Pending => ChannelFilter::Pending,
        }
    }
}

const CHANNEL_COLUMN: usize = 2;

pub(crate) async fn run(args: ListTrackingsArgs) -> Result<(), String> {
    let context = args.storage.open().await?;
    let actor = args.credentials.authenticate(&context).await?;

    let query = TrackingQuery {
        client: args.client,
        container: args.container,
        channel: args.channel.map(Into::into),
    };

    let records = context
        .trackings
        .list_trackings(&actor, query)
        .await
        .map_err(|error| format!("failed to list tracking records: {error}"))?;

    let overview = context
        .trackings
        .summarize(&actor)
        .await
        .map_err(|error| format!("failed to summarize tracking records: {error}"))?;

    let client_names: FxHashMap<_, _> = context
        .clients
        .list_clients(&actor)
        .await
        .map_err(|error| format!("failed to list clients: {error}"))?
        .into_iter()
        .map(|client| (client.uuid, client.legal_name))
        .collect();

    let mut colors = CellColors::new();

    let rows: Vec<_> = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let channel = match record.customs_channel {
                Some(channel) => {
                    let color = match channel {
                        CustomsChannel::Green => Color::FG_GREEN,
                        CustomsChannel::Red => Color::FG_RED,
                    };

                    colors.push((index + 1, CHANNEL_COLUMN, color));

                    channel.to_string()
                }
                None => "pending".to_string(),
            };

            [
                record.container.clone(),
                client_names
                    .get(&record.client)
                    .map_or_else(|| "<unknown>".to_string(), Clone::clone),
                channel,
                table::or_dash(record.milestones.estimated_arrival_at.as_deref()),
                table::or_dash(record.milestones.arrived_at.as_deref()),
                table::or_dash(record.final_status.as_deref()),
            ]
        })
        .collect();

    if rows.is_empty() {
        println!("no tracking records found");
    } else {
        let table = table::render(
            ["Container", "Client", "Channel", "ETA", "Arrived", "Status"].map(String::from),
            rows,
            colors,
        );

        println!("{table}");
    }

    let channels = overview.channels;

    println!(
        "total: {}  green: {}  red: {}  pending: {}",
        channels.total, channels.green, channels.red, channels.pending
    );

    Ok(())
}
