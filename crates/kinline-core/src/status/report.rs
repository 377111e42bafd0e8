//! Status indicators driven by the persisted status configuration.

use serde::Serialize;

use super::collect::PrimaryObject;
use super::ranking::{get_status_ranking, ConfidenceAlert, StatusRanking};
use crate::error::Result;
use crate::event_type::EventType;
use crate::storage::{GenealogyStore, StatusConfig};

/// Confidence ranking indicator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankIndicator {
    pub score: f64,
    pub tier: u8,
    pub text: String,
}

/// Indicators for one object, each present only when enabled and triggered.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatusReport {
    pub ranking: StatusRanking,
    pub rank: Option<RankIndicator>,
    pub citation_alerts: Vec<ConfidenceAlert>,
    pub missing_text: Option<String>,
}

impl StatusReport {
    /// Rank `object` using `config`.
    ///
    /// Birth and Death are always ranked, and alerts fire below the
    /// configured minimum plus one.
    ///
    /// # Errors
    /// Returns an error if any handle reached does not resolve.
    pub fn evaluate(
        store: &dyn GenealogyStore,
        object: &PrimaryObject,
        config: &StatusConfig,
    ) -> Result<Self> {
        if !config.citation_alert && !config.confidence_ranking {
            return Ok(Self::default());
        }

        let mut rank_list = config.rank_events.clone();
        for vital in [EventType::Birth, EventType::Death] {
            let name = vital.xml_str();
            if !rank_list.iter().any(|r| r == name) {
                rank_list.push(name.to_string());
            }
        }
        rank_list.extend(config.rank.keywords().into_iter().map(str::to_string));

        let ranking = get_status_ranking(
            store,
            object,
            &rank_list,
            &config.alert_events,
            config.citation_alert_minimum.saturating_add(1),
            &config.missing_events,
        )?;

        let rank = if config.confidence_ranking {
            ranking.score().zip(ranking.tier()).map(|(score, tier)| RankIndicator {
                score,
                tier,
                text: format!("Confidence Ranking: {score}"),
            })
        } else {
            None
        };
        let citation_alerts = if config.citation_alert {
            ranking.confidence_alerts.clone()
        } else {
            Vec::new()
        };
        let missing_text = (config.missing_alert && !ranking.missing_alerts.is_empty())
            .then(|| format!("Missing Events: {}", ranking.missing_alerts.join(", ")));

        Ok(Self {
            ranking,
            rank,
            citation_alerts,
            missing_text,
        })
    }
}
