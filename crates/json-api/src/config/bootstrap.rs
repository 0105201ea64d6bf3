//! Bootstrap Config

use brix::identities::{IdentityError, LoginId, Secret};
use brix_app::store::BootstrapAdmin;
use clap::Args;

/// Admin seeded into empty storage.
#[derive(Debug, Args)]
pub struct BootstrapConfig {
    /// Login id for the bootstrap admin
    #[arg(long, env = "BRIX_ADMIN_LOGIN", requires = "admin_secret")]
    pub admin_login: Option<String>,

    /// Secret for the bootstrap admin
    #[arg(long, env = "BRIX_ADMIN_SECRET", hide_env_values = true, requires = "admin_login")]
    pub admin_secret: Option<String>,
}

impl BootstrapConfig {
    /// The configured admin, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the login or secret is blank.
    pub fn admin(&self) -> Result<Option<BootstrapAdmin>, IdentityError> {
        let (Some(login), Some(secret)) = (&self.admin_login, &self.admin_secret) else {
            return Ok(None);
        };

        Ok(Some(BootstrapAdmin {
            login: LoginId::parse(login)?,
            secret: Secret::new(secret)?,
        }))
    }
}
