//! Confidence ranking and citation alerts.

use serde::Serialize;

use super::collect::{collect, PrimaryObject};
use super::options::StatusQuery;
use crate::error::Result;
use crate::model::Event;
use crate::storage::GenealogyStore;

/// Birth and Death always count toward the ranked item total.
const VITAL_SLOTS: i32 = 2;

/// Display label of a citation confidence level.
pub fn confidence_label(level: u32) -> &'static str {
    match level {
        0 => "Very Low",
        1 => "Low",
        2 => "Normal",
        3 => "High",
        _ => "Very High",
    }
}

/// A primary event with no citations or only weak ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfidenceAlert {
    pub event: Event,
    /// `"<type>: Missing"` or `"<type>: <confidence label>"`.
    pub text: String,
}

/// Aggregate ranking of one object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatusRanking {
    pub total_items: u32,
    pub total_confidence: u32,
    /// Required event types never seen as a primary event.
    pub missing_alerts: Vec<String>,
    pub confidence_alerts: Vec<ConfidenceAlert>,
}

impl StatusRanking {
    /// Mean confidence of the ranked items, `None` when nothing was cited.
    pub fn score(&self) -> Option<f64> {
        if self.total_confidence == 0 || self.total_items == 0 {
            return None;
        }
        Some(f64::from(self.total_confidence) / f64::from(self.total_items))
    }

    /// Rank tier 1 (lowest) to 4 (highest), the truncated score.
    pub fn tier(&self) -> Option<u8> {
        let tier = self.score()?.trunc();
        (1.0..=4.0).contains(&tier).then_some(tier as u8)
    }
}

/// Rank `object` with string token lists.
///
/// `rank_list` mixes category keywords (`object`, `names`, `events`,
/// `spouses`, ...) with event type names. Alerts fire for primary events in
/// `alert_list` whose best citation is below `alert_minimum`.
///
/// # Errors
/// Returns an error if any handle reached does not resolve.
pub fn get_status_ranking(
    store: &dyn GenealogyStore,
    object: &PrimaryObject,
    rank_list: &[String],
    alert_list: &[String],
    alert_minimum: u32,
    required_list: &[String],
) -> Result<StatusRanking> {
    let query = StatusQuery::from_tokens(rank_list, alert_list, alert_minimum, required_list);
    rank_status(store, object, &query)
}

/// Rank `object` with a parsed query.
///
/// # Errors
/// Returns an error if any handle reached does not resolve.
pub fn rank_status(
    store: &dyn GenealogyStore,
    object: &PrimaryObject,
    query: &StatusQuery,
) -> Result<StatusRanking> {
    let buckets = collect(store, object, &query.rank)?;
    let mut ranking = StatusRanking::default();
    let mut found: Vec<&str> = Vec::new();
    let mut vital_slots = VITAL_SLOTS;

    for row in &buckets.events {
        let event_type = &row.event.event_type;
        if event_type.is_birth() || event_type.is_death() {
            vital_slots -= 1;
        }
        if !row.primary {
            continue;
        }
        let name = event_type.xml_str();

        if query.alert_events.contains(name) {
            if row.metrics.count == 0 {
                ranking.confidence_alerts.push(ConfidenceAlert {
                    event: row.event.clone(),
                    text: format!("{event_type}: Missing"),
                });
            } else if row.metrics.highest_confidence < query.alert_minimum {
                ranking.confidence_alerts.push(ConfidenceAlert {
                    event: row.event.clone(),
                    text: format!(
                        "{event_type}: {}",
                        confidence_label(row.metrics.highest_confidence)
                    ),
                });
            }
        }

        if query.required_events.iter().any(|r| r == name) && !found.contains(&name) {
            found.push(name);
        }

        if query.rank.events || query.rank_events.contains(name) {
            ranking.total_items += 1;
            ranking.total_confidence += row.metrics.highest_confidence;
        }
    }

    if vital_slots > 0 {
        ranking.total_items += vital_slots.unsigned_abs();
    }

    ranking.missing_alerts = query
        .required_events
        .iter()
        .filter(|r| !found.contains(&r.as_str()))
        .cloned()
        .collect();

    for row in &buckets.objects {
        ranking.total_items += 1;
        ranking.total_confidence += row.metrics.highest_confidence;
    }

    tracing::debug!(
        object = %object.handle(),
        items = ranking.total_items,
        confidence = ranking.total_confidence,
        missing = ranking.missing_alerts.len(),
        alerts = ranking.confidence_alerts.len(),
        "status ranking"
    );
    Ok(ranking)
}
