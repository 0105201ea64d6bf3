//! Storage Config

use std::path::PathBuf;

use clap::Args;

/// Snapshot storage settings.
#[derive(Debug, Args)]
pub struct StorageConfig {
    /// Snapshot file; without one, data lives in memory and is lost on exit
    #[arg(long, env = "BRIX_DATA_FILE")]
    pub data_file: Option<PathBuf>,
}
