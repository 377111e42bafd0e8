//! Citation-confidence status ranking.
//!
//! Collects citation metrics for a person or family and the objects
//! reachable from it, then derives:
//! - A mean-confidence rank score and one of four tiers
//! - Alerts for key events with no or weak citations
//! - The list of required event types that are missing

mod collect;
mod options;
mod ranking;
mod report;

pub use collect::{
    collect, Buckets, CitationMetrics, EventRow, ObjectCategory, ObjectRow, PrimaryObject,
};
pub use options::{RankOptions, StatusQuery};
pub use ranking::{
    confidence_label, get_status_ranking, rank_status, ConfidenceAlert, StatusRanking,
};
pub use report::{RankIndicator, StatusReport};
