use brix::{clients::ClientUuid, identities::IdentityProfile, logins::temporary_secret};
use brix_app::domain::identities::data::NewIdentity;
use clap::Args;

use super::RoleArg;
use crate::cli::args::{CredentialArgs, StorageArgs};

#[derive(Debug, Args)]
pub(crate) struct CreateIdentityArgs {
    #[command(flatten)]
    storage: StorageArgs,

    #[command(flatten)]
    credentials: CredentialArgs,

    /// Login id for the new identity
    #[arg(long)]
    new_login: String,

    /// Secret for the new identity; a temporary one is generated when omitted
    #[arg(long)]
    new_secret: Option<String>,

    /// Name shown in the dashboard header
    #[arg(long)]
    display_name: String,

    /// Contact email
    #[arg(long)]
    email: Option<String>,

    #[arg(long, value_enum)]
    role: RoleArg,

    /// Client UUID the identity may read; repeat for operators
    #[arg(long = "client")]
    clients: Vec<ClientUuid>,
}

pub(crate) async fn run(args: CreateIdentityArgs) -> Result<(), String> {
    let context = args.storage.open().await?;
    let actor = args.credentials.authenticate(&context).await?;

    let (secret, generated) = match args.new_secret {
        Some(secret) => (secret, false),
        None => (temporary_secret().expose().to_string(), true),
    };

    let identity = context
        .identities
        .create_identity(
            &actor,
            NewIdentity {
                login: args.new_login,
                secret: secret.clone(),
                profile: IdentityProfile {
                    display_name: args.display_name,
                    email: args.email,
                    role: args.role.into(),
                    clients: args.clients.into_iter().collect(),
                },
            },
        )
        .await
        .map_err(|error| format!("failed to create identity: {error}"))?;

    println!("login: {}", identity.login);
    println!("role: {}", identity.role);
    if generated {
        println!("secret: {secret}");
        println!("store this secret now; it is only shown once");
    }

    Ok(())
}
