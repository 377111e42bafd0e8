//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Default timeline filters and expansion depth
//! - Status indicator options (confidence ranking, citation alerts,
//!   required events)
//!
//! Configuration is stored at `~/.config/kinline/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::status::RankOptions;

/// Timeline defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    /// Event types or categories shown for the subject; empty shows all.
    #[serde(default)]
    pub events: Vec<String>,
    /// Relationship labels eligible for relative expansion.
    #[serde(default = "default_relatives")]
    pub relatives: Vec<String>,
    /// Event types or categories shown for relatives.
    #[serde(default = "default_relative_events")]
    pub relative_events: Vec<String>,
    #[serde(default = "default_generations")]
    pub ancestors: u32,
    #[serde(default = "default_generations")]
    pub offspring: u32,
    /// Age span precision: 1 = years, 2 = months, 3 = days.
    #[serde(default = "default_precision")]
    pub precision: u8,
    /// Optional `YYYY/MM/DD-YYYY/MM/DD` bounds.
    #[serde(default)]
    pub dates: Option<String>,
    /// Maximum entries returned per timeline.
    #[serde(default)]
    pub max_events: Option<usize>,
}

/// Status indicator options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusConfig {
    #[serde(default = "default_true")]
    pub confidence_ranking: bool,
    #[serde(default)]
    pub rank: RankOptions,
    /// Additional event types ranked; Birth and Death are implicit.
    #[serde(default = "default_rank_events")]
    pub rank_events: Vec<String>,
    #[serde(default = "default_true")]
    pub citation_alert: bool,
    /// Minimum confidence level required before an alert is raised.
    #[serde(default)]
    pub citation_alert_minimum: u32,
    #[serde(default = "default_alert_events")]
    pub alert_events: Vec<String>,
    #[serde(default = "default_true")]
    pub missing_alert: bool,
    #[serde(default = "default_missing_events")]
    pub missing_events: Vec<String>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/kinline/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timeline: TimelineConfig,
    #[serde(default)]
    pub status: StatusConfig,
}

// Default functions
fn default_true() -> bool {
    true
}
fn default_generations() -> u32 {
    1
}
fn default_precision() -> u8 {
    1
}
fn default_relatives() -> Vec<String> {
    crate::relationship::RELATIVES
        .iter()
        .map(|r| r.to_string())
        .collect()
}
fn default_relative_events() -> Vec<String> {
    vec!["vital".into()]
}
fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
fn default_rank_events() -> Vec<String> {
    strings(&[
        "Baptism",
        "Christening",
        "Marriage Banns",
        "Marriage",
        "Divorce",
        "Will",
        "Burial",
        "Cremation",
        "Probate",
    ])
}
fn default_alert_events() -> Vec<String> {
    strings(&[
        "Birth",
        "Baptism",
        "Christening",
        "Marriage Banns",
        "Marriage",
        "Divorce",
        "Will",
        "Death",
        "Burial",
        "Cremation",
        "Probate",
    ])
}
fn default_missing_events() -> Vec<String> {
    strings(&["Birth", "Marriage", "Death", "Burial"])
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            events: Vec::new(),
            relatives: default_relatives(),
            relative_events: default_relative_events(),
            ancestors: default_generations(),
            offspring: default_generations(),
            precision: default_precision(),
            dates: None,
            max_events: None,
        }
    }
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            confidence_ranking: true,
            rank: RankOptions::default(),
            rank_events: default_rank_events(),
            citation_alert: true,
            citation_alert_minimum: 0,
            alert_events: default_alert_events(),
            missing_alert: true,
            missing_events: default_missing_events(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() || key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value.parse::<u64>().map_err(|e| invalid(e.to_string()))?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Array(_) => serde_json::Value::Array(
                        value
                            .split(',')
                            .map(str::trim)
                            .filter(|v| !v.is_empty())
                            .map(|v| serde_json::Value::String(v.to_string()))
                            .collect(),
                    ),
                    serde_json::Value::Object(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    // Optional fields serialize as null; numbers and strings are both accepted.
                    serde_json::Value::Null => match value.parse::<u64>() {
                        Ok(n) => serde_json::Value::Number(n.into()),
                        Err(_) => serde_json::Value::String(value.into()),
                    },
                    serde_json::Value::String(_) => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from `~/.config/kinline/config.toml`, writing defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults if the file is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed, or if the
    /// defaults cannot be written.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Array(items) => Some(
                items
                    .iter()
                    .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without saving. List values are comma separated.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Set a config value by key and save. Returns error if key is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}
