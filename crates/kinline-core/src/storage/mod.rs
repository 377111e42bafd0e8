//! Genealogical store read interface, store backends and configuration.
//!
//! Both engines only read through [`GenealogyStore`]. Two backends are
//! provided: an in-memory store loaded from a JSON snapshot and a SQLite
//! store holding one JSON record per row.

mod config;
pub mod database;
pub mod memory;
pub mod migrations;

pub use config::{Config, StatusConfig, TimelineConfig};
pub use database::SqliteStore;
pub use memory::MemoryStore;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result, StoreError};
use crate::model::{Citation, Event, Family, Handle, Person};

/// Read access to a genealogical database.
///
/// Every lookup fails with [`StoreError::NotFound`] when the handle does not
/// resolve; callers propagate that unchanged.
pub trait GenealogyStore {
    fn person(&self, handle: &Handle) -> Result<Person, StoreError>;
    fn family(&self, handle: &Handle) -> Result<Family, StoreError>;
    fn event(&self, handle: &Handle) -> Result<Event, StoreError>;
    fn citation(&self, handle: &Handle) -> Result<Citation, StoreError>;

    /// Names of the custom (non-standard) event types in use.
    fn custom_event_types(&self) -> Result<BTreeSet<String>, StoreError>;
}

/// Serializable dump of every record in a store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub people: Vec<Person>,
    #[serde(default)]
    pub families: Vec<Family>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub citations: Vec<Citation>,
}

impl StoreSnapshot {
    /// Read a snapshot from a JSON file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a valid snapshot.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the snapshot as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// Open a store file, picking the backend from its extension.
///
/// `.json` files are loaded into a [`MemoryStore`]; anything else is opened
/// as a SQLite database.
///
/// # Errors
/// Returns an error if the file cannot be read or opened.
pub fn open_store(path: &Path) -> Result<Box<dyn GenealogyStore>> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if is_json {
        tracing::debug!(path = %path.display(), "opening JSON snapshot store");
        Ok(Box::new(MemoryStore::from_path(path)?))
    } else {
        tracing::debug!(path = %path.display(), "opening SQLite store");
        Ok(Box::new(SqliteStore::open(path)?))
    }
}

/// Returns `~/.config/kinline[-dev]/` based on KINLINE_ENV.
///
/// Set KINLINE_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("KINLINE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("kinline-dev")
    } else {
        base_dir.join("kinline")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::NoDataDir(e.to_string()))?;
    Ok(dir)
}
