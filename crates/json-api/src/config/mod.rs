//! Server configuration module

use clap::Parser;

use crate::config::{
    bootstrap::BootstrapConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
    storage::StorageConfig,
};

pub(crate) mod bootstrap;
pub(crate) mod observability;
pub(crate) mod server;
pub(crate) mod storage;

/// BRIX JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "brix-json", about = "BRIX JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Request observability settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Snapshot storage settings.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// First admin for empty storage.
    #[command(flatten)]
    pub bootstrap: BootstrapConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}
