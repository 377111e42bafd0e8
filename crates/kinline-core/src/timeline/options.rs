//! Caller configuration for timeline construction.

use crate::date::{DateRange, Locale};
use crate::error::FilterError;
use crate::model::Handle;
use crate::storage::TimelineConfig;

/// Timeline configuration. Never modified by a traversal run.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineOptions {
    /// Inclusive bounds, compared against event sort keys.
    pub range: DateRange,
    /// Event types or categories for the subject; empty accepts all.
    pub events: Vec<String>,
    /// Relationship labels eligible for expansion; empty disables it.
    pub relatives: Vec<String>,
    /// Event types or categories accepted for relatives.
    pub relative_events: Vec<String>,
    pub precision: u8,
    pub locale: Locale,
    /// Reference person for labeling relatives in family timelines.
    pub reference_person: Option<Handle>,
    pub max_events: Option<usize>,
}

impl Default for TimelineOptions {
    fn default() -> Self {
        Self {
            range: DateRange::default(),
            events: Vec::new(),
            relatives: Vec::new(),
            relative_events: Vec::new(),
            precision: 1,
            locale: Locale::default(),
            reference_person: None,
            max_events: None,
        }
    }
}

impl TimelineOptions {
    /// Options from the persisted timeline defaults.
    ///
    /// # Errors
    /// Returns an error if the configured date range is malformed.
    pub fn from_config(config: &TimelineConfig) -> Result<Self, FilterError> {
        let range = match &config.dates {
            Some(text) => DateRange::parse(text)?,
            None => DateRange::default(),
        };
        Ok(Self {
            range,
            events: config.events.clone(),
            relatives: config.relatives.clone(),
            relative_events: config.relative_events.clone(),
            precision: config.precision,
            locale: Locale::default(),
            reference_person: None,
            max_events: config.max_events,
        })
    }
}
