use clap::{Args, Subcommand};

mod list;

#[derive(Debug, Args)]
pub(crate) struct TrackingCommand {
    #[command(subcommand)]
    command: TrackingSubcommand,
}

#[derive(Debug, Subcommand)]
enum TrackingSubcommand {
    List(list::ListTrackingsArgs),
}

pub(crate) async fn run(command: TrackingCommand) -> Result<(), String> {
    match command.command {
        TrackingSubcommand::List(args) => list::run(args).await,
    }
}
