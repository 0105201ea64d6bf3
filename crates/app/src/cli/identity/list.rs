use brix::identities::OwnedScope;
use clap::Args;
use rustc_hash::FxHashMap;

use crate::cli::{
    args::{CredentialArgs, StorageArgs},
    table::{self, CellColors},
};

#[derive(Debug, Args)]
pub(crate) struct ListIdentitiesArgs {
    #[command(flatten)]
    storage: StorageArgs,

    #[command(flatten)]
    credentials: CredentialArgs,
}

pub(crate) async fn run(args: ListIdentitiesArgs) -> Result<(), String> {
    let context = args.storage.open().await?;
    let actor = args.credentials.authenticate(&context).await?;

    let identities = context
        .identities
        .list_identities(&actor)
        .await
        .map_err(|error| format!("failed to list identities: {error}"))?;

    let client_names: FxHashMap<_, _> = context
        .clients
        .list_clients(&actor)
        .await
        .map_err(|error| format!("failed to list clients: {error}"))?
        .into_iter()
        .map(|client| (client.uuid, client.legal_name))
        .collect();

    let rows = identities.iter().map(|identity| {
        let scope = match &identity.scope {
            OwnedScope::Unrestricted => "all".to_string(),
            OwnedScope::Clients(clients) => clients
                .iter()
                .map(|uuid| {
                    client_names
                        .get(uuid)
                        .map_or_else(|| uuid.to_string(), Clone::clone)
                })
                .collect::<Vec<_>>()
                .join(", "),
        };

        [
            identity.login.to_string(),
            identity.display_name.clone(),
            identity.role.to_string(),
            scope,
            if identity.active { "yes" } else { "no" }.to_string(),
        ]
    });

    let table = table::render(
        ["Login", "Name", "Role", "Clients", "Active"].map(String::from),
        rows,
        CellColors::new(),
    );

    println!("{table}");

    Ok(())
}
