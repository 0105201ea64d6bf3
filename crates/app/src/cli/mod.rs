use clap::{Parser, Subcommand};

mod args;
mod client;
mod identity;
mod init;
mod migrate;
mod table;
mod tracking;

#[derive(Debug, Parser)]
#[command(name = "brix-app", about = "BRIX tracking CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create a data file with a bootstrap admin
    Init(init::InitArgs),
    /// Rewrite a legacy backup in the current snapshot format
    Migrate(migrate::MigrateArgs),
    Identity(identity::IdentityCommand),
    Client(client::ClientCommand),
    Tracking(tracking::TrackingCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Init(args) => init::run(args).await,
            Commands::Migrate(args) => migrate::run(args).await,
            Commands::Identity(command) => identity::run(command).await,
            Commands::Client(command) => client::run(command).await,
            Commands::Tracking(command) => tracking::run(command).await,
        }
    }
}
