use brix::clients::ClientDetails;
use brix_app::domain::clients::data::NewClient;
use clap::Args;

use crate::cli::args::{CredentialArgs, StorageArgs};

#[derive(Debug, Args)]
pub(crate) struct CreateClientArgs {
    #[command(flatten)]
    storage: StorageArgs,

    #[command(flatten)]
    credentials: CredentialArgs,

    /// Registered legal name
    #[arg(long)]
    legal_name: String,

    /// Trading name shown to users
    #[arg(long)]
    trade_name: String,

    /// Contact email
    #[arg(long)]
    email: String,

    /// Tax registration number
    #[arg(long)]
    tax_id: Option<String>,

    #[arg(long)]
    phone: Option<String>,

    #[arg(long)]
    address: Option<String>,

    /// Contact person
    #[arg(long)]
    contact: Option<String>,

    /// Also issue a client login derived from the legal name
    #[arg(long)]
    create_login: bool,
}

pub(crate) async fn run(args: CreateClientArgs) -> Result<(), String> {
    let context = args.storage.open().await?;
    let actor = args.credentials.authenticate(&context).await?;

    let created = context
        .clients
        .create_client(
            &actor,
            NewClient {
                details: ClientDetails {
                    legal_name: args.legal_name,
                    trade_name: args.trade_name,
                    tax_id: args.tax_id,
                    email: args.email,
                    phone: args.phone,
                    address: args.address,
                    contact: args.contact,
                },
                create_login: args.create_login,
            },
        )
        .await
        .map_err(|error| format!("failed to create client: {error}"))?;

    println!("client_uuid: {}", created.client.uuid);
    println!("legal_name: {}", created.client.legal_name);

    match created.login {
        Some(issued) => {
            println!("login: {}", issued.login);
            println!("secret: {}", issued.secret.expose());
            println!("store this secret now; it is only shown once");
        }
        None if args.create_login => {
            println!("no login issued; the derived login is unusable or already taken");
        }
        None => {}
    }

    Ok(())
}
