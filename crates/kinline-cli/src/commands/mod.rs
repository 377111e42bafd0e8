pub mod config;
pub mod import;
pub mod status;
pub mod timeline;

use std::path::{Path, PathBuf};

use kinline_core::storage::data_dir;
use kinline_core::{open_store, GenealogyStore};

/// Store file used when `--store` is not given.
pub fn default_store_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    Ok(data_dir()?.join("tree.sqlite"))
}

pub fn open(store: Option<&Path>) -> Result<Box<dyn GenealogyStore>, Box<dyn std::error::Error>> {
    let path = match store {
        Some(path) => path.to_path_buf(),
        None => default_store_path()?,
    };
    tracing::debug!(path = %path.display(), "using store");
    Ok(open_store(&path)?)
}

/// Split a comma-separated list, dropping empty items.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
