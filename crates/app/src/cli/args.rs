use std::{path::PathBuf, sync::Arc};

use brix::identities::Identity;
use brix_app::{context::AppContext, storage::JsonFileStore, store::StoreError};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct StorageArgs {
    /// Snapshot file holding identities, clients and tracking records
    #[arg(long, env = "BRIX_DATA_FILE")]
    pub(crate) data_file: PathBuf,
}

impl StorageArgs {
    pub(crate) async fn open(&self) -> Result<AppContext, String> {
        AppContext::open_current(Arc::new(JsonFileStore::new(&self.data_file)))
            .await
            .map_err(|error| match error {
                StoreError::LegacyFormat => format!(
                    "{} is a legacy backup; convert it with `brix-app migrate --input {}` first",
                    self.data_file.display(),
                    self.data_file.display()
                ),
                error => format!("failed to open {}: {error}", self.data_file.display()),
            })
    }
}

#[derive(Debug, Args)]
pub(crate) struct CredentialArgs {
    /// Login id to act as
    #[arg(long, env = "BRIX_LOGIN")]
    login: String,

    /// Secret for the login
    #[arg(long, env = "BRIX_SECRET", hide_env_values = true)]
    secret: String,
}

impl CredentialArgs {
    pub(crate) async fn authenticate(&self, context: &AppContext) -> Result<Identity, String> {
        context
            .identities
            .authenticate(&self.login, &self.secret)
            .await
            .map_err(|error| format!("failed to log in: {error}"))
    }
}
