use brix::identities::Role;
use clap::{Args, Subcommand, ValueEnum};

mod create;
mod deactivate;
mod list;

#[derive(Debug, Args)]
pub(crate) struct IdentityCommand {
    #[command(subcommand)]
    command: IdentitySubcommand,
}

#[derive(Debug, Subcommand)]
enum IdentitySubcommand {
    Create(create::CreateIdentityArgs),
    List(list::ListIdentitiesArgs),
    Deactivate(deactivate::DeactivateIdentityArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum RoleArg {
    Admin,
    Client,
    Operator,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Admin => Role::Admin,
            RoleArg::Client => Role::Client,
            RoleArg::Operator => Role::Operator,
        }
    }
}

pub(crate) async fn run(command: IdentityCommand) -> Result<(), String> {
    match command.command {
        IdentitySubcommand::Create(args) => create::run(args).await,
        IdentitySubcommand::List(args) => list::run(args).await,
        IdentitySubcommand::Deactivate(args) => deactivate::run(args).await,
    }
}
