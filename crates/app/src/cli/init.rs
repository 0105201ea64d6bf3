use std::sync::Arc;

use brix::identities::{LoginId, Secret};
use brix_app::{
    context::AppContext,
    storage::{JsonFileStore, SnapshotStore},
    store::BootstrapAdmin,
};
use clap::Args;

use super::args::StorageArgs;

#[derive(Debug, Args)]
pub(crate) struct InitArgs {
    #[command(flatten)]
    storage: StorageArgs,

    /// Login id for the first admin
    #[arg(long, env = "BRIX_ADMIN_LOGIN")]
    admin_login: String,

    /// Secret for the first admin
    #[arg(long, env = "BRIX_ADMIN_SECRET", hide_env_values = true)]
    admin_secret: String,
}

pub(crate) async fn run(args: InitArgs) -> Result<(), String> {
    let persistence = Arc::new(JsonFileStore::new(&args.storage.data_file));

    let existing = persistence
        .load()
        .await
        .map_err(|error| format!("failed to read {}: {error}", persistence.path().display()))?;

    if existing.is_some() {
        return Err(format!(
            "{} already holds data; refusing to overwrite it",
            persistence.path().display()
        ));
    }

    let admin = BootstrapAdmin {
        login: LoginId::parse(&args.admin_login)
            .map_err(|error| format!("invalid admin login: {error}"))?,
        secret: Secret::new(&args.admin_secret)
            .map_err(|error| format!("invalid admin secret: {error}"))?,
    };
    let login = admin.login.clone();

    AppContext::open(persistence.clone(), Some(admin))
        .await
        .map_err(|error| format!("failed to initialize storage: {error}"))?;

    println!("data_file: {}", persistence.path().display());
    println!("admin_login: {login}");

    Ok(())
}
