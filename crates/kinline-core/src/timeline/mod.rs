//! Chronological event timelines.
//!
//! This module provides:
//! - Event filters built from type and category tokens
//! - Sort keys for undated events, placed by list position and children's births
//! - Person, family and group timelines with relative expansion
//!
//! Each run owns a [`TraversalContext`]; the visited-person set in that
//! context is what stops expansion on cyclic family data.

mod builder;
mod context;
mod filter;
mod item;
mod keys;
mod options;

pub use builder::{PersonEvents, Timeline};
pub use context::TraversalContext;
pub use filter::EventFilter;
pub use item::{KeyedEvent, TimelineEntry, TimelineItem, SELF_RELATION};
pub use keys::prepare_event_sortvals;
pub use options::TimelineOptions;
