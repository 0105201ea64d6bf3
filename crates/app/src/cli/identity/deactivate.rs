use brix::identities::LoginId;
use clap::Args;

use crate::cli::args::{CredentialArgs, StorageArgs};

#[derive(Debug, Args)]
pub(crate) struct DeactivateIdentityArgs {
    #[command(flatten)]
    storage: StorageArgs,

    #[command(flatten)]
    credentials: CredentialArgs,

    /// Login id to deactivate
    #[arg(long)]
    target: String,
}

pub(crate) async fn run(args: DeactivateIdentityArgs) -> Result<(), String> {
    let target =
        LoginId::parse(&args.target).map_err(|error| format!("invalid target login: {error}"))?;

    let context = args.storage.open().await?;
    let actor = args.credentials.authenticate(&context).await?;

    let identity = context
        .identities
        .set_active(&actor, &target, false)
        .await
        .map_err(|error| format!("failed to deactivate identity: {error}"))?;

    println!("login: {}", identity.login);
    println!("active: {}", identity.active);

    Ok(())
}
