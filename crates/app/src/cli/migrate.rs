use std::path::PathBuf;

use brix::snapshot::{self, Format};
use brix_app::storage::{JsonFileStore, SnapshotStore};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct MigrateArgs {
    /// Backup file written by the previous dashboard
    #[arg(long)]
    input: PathBuf,

    /// Where to write the migrated snapshot; defaults to overwriting the input
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) async fn run(args: MigrateArgs) -> Result<(), String> {
    let json = tokio::fs::read_to_string(&args.input)
        .await
        .map_err(|error| format!("failed to read {}: {error}", args.input.display()))?;

    let loaded = snapshot::parse(&json)
        .map_err(|error| format!("failed to parse {}: {error}", args.input.display()))?;

    for warning in &loaded.warnings {
        println!("warning: {warning}");
    }

    if loaded.format == Format::Current {
        println!("{} is already in the current format", args.input.display());
        return Ok(());
    }

    let output = JsonFileStore::new(args.output.unwrap_or(args.input));

    output
        .save(&loaded.dataset)
        .await
        .map_err(|error| format!("failed to write {}: {error}", output.path().display()))?;

    println!("data_file: {}", output.path().display());
    println!(
        "legacy_version: {}",
        loaded.metadata.version.as_deref().unwrap_or("unknown")
    );
    println!("identities: {}", loaded.dataset.identities.len());
    println!("clients: {}", loaded.dataset.clients.len());
    println!("trackings: {}", loaded.dataset.trackings.len());

    Ok(())
}
