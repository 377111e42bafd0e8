//! Snapshot import for CLI.

use std::path::{Path, PathBuf};

use clap::Args;
use kinline_core::{SqliteStore, StoreSnapshot};

use super::default_store_path;

#[derive(Args)]
pub struct ImportArgs {
    /// JSON snapshot to read
    snapshot: PathBuf,
}

pub fn run(store: Option<&Path>, args: ImportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let path = match store {
        Some(path) => path.to_path_buf(),
        None => default_store_path()?,
    };
    let snapshot = StoreSnapshot::from_path(&args.snapshot)?;
    let db = SqliteStore::open(&path)?;
    let summary = db.import(&snapshot)?;
    println!(
        "imported {} people, {} families, {} events, {} citations into {}",
        summary.people,
        summary.families,
        summary.events,
        summary.citations,
        path.display()
    );
    Ok(())
}
