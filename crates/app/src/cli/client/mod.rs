use clap::{Args, Subcommand};

mod create;
mod list;

#[derive(Debug, Args)]
pub(crate) struct ClientCommand {
    #[command(subcommand)]
    command: ClientSubcommand,
}

#[derive(Debug, Subcommand)]
enum ClientSubcommand {
    Create(create::CreateClientArgs),
    List(list::ListClientsArgs),
}

pub(crate) async fn run(command: ClientCommand) -> Result<(), String> {
    match command.command {
        ClientSubcommand::Create(args) => create::run(args).await,
        ClientSubcommand::List(args) => list::run(args).await,
    }
}
