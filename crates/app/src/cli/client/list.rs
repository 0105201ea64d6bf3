use clap::Args;

use crate::cli::{
    args::{CredentialArgs, StorageArgs},
    table::{self, CellColors},
};

#[derive(Debug, Args)]
pub(crate) struct ListClientsArgs {
    #[command(flatten)]
    storage: StorageArgs,

    #[command(flatten)]
    credentials: CredentialArgs,
}

pub(crate) async fn run(args: ListClientsArgs) -> Result<(), String> {
    let context = args.storage.open().await?;
    let actor = args.credentials.authenticate(&context).await?;

    let clients = context
        .clients
        .list_clients(&actor)
        .await
        .map_err(|error| format!("failed to list clients: {error}"))?;

    if clients.is_empty() {
        println!("no clients found");
        return Ok(());
    }

    let rows = clients.iter().map(|client| {
        [
            client.uuid.to_string(),
            client.legal_name.clone(),
            client.trade_name.clone(),
            client.email.clone(),
            table::or_dash(client.contact.as_deref()),
            if client.active { "yes" } else { "no" }.to_string(),
        ]
    });

    let table = table::render(
        ["UUID", "Legal name", "Trade name", "Email", "Contact", "Active"].map(String::from),
        rows,
        CellColors::new(),
    );

    println!("{table}");

    Ok(())
}
