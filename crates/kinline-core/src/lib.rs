//! # Kinline Core Library
//!
//! This library provides the genealogy engines behind the `kinline` CLI.
//! All operations read from a genealogical store and return fully
//! materialized results; nothing is written back to the store.
//!
//! ## Architecture
//!
//! - **Timeline**: chronological event timelines for a person, family or
//!   group, expanded through relatives up and down the family tree
//! - **Status**: citation-confidence ranking, citation alerts and missing
//!   required events for a person or family
//! - **Storage**: the store read interface, JSON snapshot and SQLite
//!   backends, and TOML-based configuration
//!
//! ## Key Components
//!
//! - [`Timeline`]: timeline builder
//! - [`get_status_ranking`]: status ranking entry point
//! - [`GenealogyStore`]: read interface over a genealogical database
//! - [`Config`]: Application configuration management

pub mod date;
pub mod error;
pub mod event_type;
pub mod lifespan;
pub mod model;
pub mod relationship;
pub mod status;
pub mod storage;
pub mod timeline;

pub use date::{Date, DateRange, Locale, Span};
pub use error::{ConfigError, CoreError, FilterError, ObjectKind, StoreError};
pub use event_type::{EventCategory, EventType};
pub use lifespan::{LifespanEstimator, ProbablyAlive};
pub use model::{Citation, Event, Family, Gender, Handle, Person};
pub use relationship::{KinshipCalculator, RelationshipCalculator, RELATIVES};
pub use status::{
    get_status_ranking, rank_status, PrimaryObject, RankOptions, StatusQuery, StatusRanking,
    StatusReport,
};
pub use storage::{
    open_store, Config, GenealogyStore, MemoryStore, SqliteStore, StatusConfig, StoreSnapshot,
    TimelineConfig,
};
pub use timeline::{Timeline, TimelineEntry, TimelineItem, TimelineOptions, TraversalContext};
