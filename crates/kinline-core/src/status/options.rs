//! Structured ranking options parsed from keyword lists.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Which object categories contribute to the confidence ranking.
///
/// Stored in configuration under the keyword names (`object`, `names`,
/// `events`, ...); the same keywords are accepted in rank lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankOptions {
    #[serde(default = "default_true")]
    pub object: bool,
    #[serde(default = "default_true")]
    pub names: bool,
    /// Rank every primary event, not only the listed event types.
    #[serde(default = "default_true")]
    pub events: bool,
    #[serde(default = "default_true")]
    pub ordinances: bool,
    #[serde(default = "default_true")]
    pub attributes: bool,
    #[serde(default = "default_true")]
    pub associations: bool,
    #[serde(default = "default_true")]
    pub addresses: bool,
    #[serde(default)]
    pub media: bool,
    #[serde(default = "default_true")]
    pub spouses: bool,
    #[serde(default = "default_true")]
    pub children: bool,
}

fn default_true() -> bool {
    true
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            media: false,
            ..Self::all()
        }
    }
}

impl RankOptions {
    pub const KEYWORDS: [&'static str; 10] = [
        "object",
        "names",
        "events",
        "ordinances",
        "attributes",
        "associations",
        "addresses",
        "media",
        "spouses",
        "children",
    ];

    pub fn none() -> Self {
        Self {
            object: false,
            names: false,
            events: false,
            ordinances: false,
            attributes: false,
            associations: false,
            addresses: false,
            media: false,
            spouses: false,
            children: false,
        }
    }

    pub fn all() -> Self {
        Self {
            object: true,
            names: true,
            events: true,
            ordinances: true,
            attributes: true,
            associations: true,
            addresses: true,
            media: true,
            spouses: true,
            children: true,
        }
    }

    fn flag_mut(&mut self, keyword: &str) -> Option<&mut bool> {
        Some(match keyword {
            "object" => &mut self.object,
            "names" => &mut self.names,
            "events" => &mut self.events,
            "ordinances" => &mut self.ordinances,
            "attributes" => &mut self.attributes,
            "associations" => &mut self.associations,
            "addresses" => &mut self.addresses,
            "media" => &mut self.media,
            "spouses" => &mut self.spouses,
            "children" => &mut self.children,
            _ => return None,
        })
    }

    /// Enable `keyword`. Returns `false` if it is not a rank keyword.
    pub fn enable(&mut self, keyword: &str) -> bool {
        match self.flag_mut(keyword) {
            Some(flag) => {
                *flag = true;
                true
            }
            None => false,
        }
    }

    /// Enabled keywords in canonical order.
    pub fn keywords(&self) -> Vec<&'static str> {
        let flags = [
            self.object,
            self.names,
            self.events,
            self.ordinances,
            self.attributes,
            self.associations,
            self.addresses,
            self.media,
            self.spouses,
            self.children,
        ];
        Self::KEYWORDS
            .iter()
            .zip(flags)
            .filter(|(_, on)| *on)
            .map(|(k, _)| *k)
            .collect()
    }
}

/// Parsed form of the string lists accepted by
/// [`get_status_ranking`](super::get_status_ranking).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusQuery {
    pub rank: RankOptions,
    /// Event type names ranked even when `rank.events` is off.
    pub rank_events: BTreeSet<String>,
    pub alert_events: BTreeSet<String>,
    /// Alerts fire for highest confidence strictly below this level.
    pub alert_minimum: u32,
    /// Required event type names, in reporting order.
    pub required_events: Vec<String>,
}

impl StatusQuery {
    /// Split `rank_list` into keywords and event type names.
    pub fn from_tokens(
        rank_list: &[String],
        alert_list: &[String],
        alert_minimum: u32,
        required_list: &[String],
    ) -> Self {
        let mut rank = RankOptions::none();
        let mut rank_events = BTreeSet::new();
        for token in rank_list {
            if !rank.enable(token) {
                rank_events.insert(token.clone());
            }
        }
        let mut required_events: Vec<String> = Vec::with_capacity(required_list.len());
        for name in required_list {
            if !required_events.contains(name) {
                required_events.push(name.clone());
            }
        }
        Self {
            rank,
            rank_events,
            alert_events: alert_list.iter().cloned().collect(),
            alert_minimum,
            required_events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn keywords_become_flags() {
        let query = StatusQuery::from_tokens(
            &tokens(&["events", "spouses", "Birth", "Marriage"]),
            &[],
            0,
            &[],
        );
        assert!(query.rank.events);
        assert!(query.rank.spouses);
        assert!(!query.rank.object);
        assert_eq!(
            query.rank_events.into_iter().collect::<Vec<_>>(),
            vec!["Birth", "Marriage"]
        );
    }

    #[test]
    fn default_excludes_media() {
        let options = RankOptions::default();
        assert!(!options.media);
        assert_eq!(options.keywords().len(), 9);
        assert!(!options.keywords().contains(&"media"));
    }

    #[test]
    fn required_events_keep_order_without_duplicates() {
        let query = StatusQuery::from_tokens(&[], &[], 0, &tokens(&["Death", "Birth", "Death"]));
        assert_eq!(query.required_events, vec!["Death", "Birth"]);
    }
}
