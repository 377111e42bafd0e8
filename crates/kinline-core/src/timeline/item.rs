//! Timeline output records.

use serde::{Deserialize, Serialize};

use crate::model::{Event, Person};

/// Relation label of the timeline subject's own events.
pub const SELF_RELATION: &str = "self";

/// An event placed on a timeline together with the person it was collected
/// for and that person's relationship to the reference person.
///
/// `person` is always set: family events are attributed to the spouse whose
/// traversal collected them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineItem {
    pub event: Event,
    pub person: Person,
    pub relation: String,
}

impl TimelineItem {
    pub fn is_self(&self) -> bool {
        self.relation == SELF_RELATION
    }
}

/// A [`TimelineItem`] with the key it was ordered by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub sort_key: i64,
    pub item: TimelineItem,
}

/// An event with its native or synthetic sort key, before filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedEvent {
    pub sort_key: i64,
    pub event: Event,
}
