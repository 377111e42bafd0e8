//! Core error types for kinline-core.
//!
//! This module defines the error hierarchy using thiserror. Store lookup
//! failures are propagated unchanged to callers; configuration and filter
//! errors are raised at setup time.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::model::Handle;

/// Core error type for kinline-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Genealogical store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Timeline filter and date-range input errors
    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Kind of record held by a genealogical store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Person,
    Family,
    Event,
    Citation,
}

impl ObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Family => "family",
            Self::Event => "event",
            Self::Citation => "citation",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Store-specific errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Handle does not resolve to a record
    #[error("No {kind} found for handle '{handle}'")]
    NotFound { kind: ObjectKind, handle: Handle },

    /// Failed to open the backing database
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,

    /// Stored record could not be decoded
    #[error("Corrupt {kind} record '{handle}': {message}")]
    Corrupt {
        kind: ObjectKind,
        handle: Handle,
        message: String,
    },
}

impl StoreError {
    pub fn not_found(kind: ObjectKind, handle: &Handle) -> Self {
        Self::NotFound {
            kind,
            handle: handle.clone(),
        }
    }
}

/// Timeline configuration input errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// Token is neither an event type nor an event category
    #[error("{0} is not a valid event or event category")]
    UnknownEventFilter(String),

    /// Malformed date or date range text
    #[error("Invalid date '{value}': {message}")]
    InvalidDate { value: String, message: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Configuration directory could not be resolved
    #[error("Configuration directory unavailable: {0}")]
    NoDataDir(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    StoreError::Locked
                } else {
                    StoreError::QueryFailed(err.to_string())
                }
            }
            _ => StoreError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
