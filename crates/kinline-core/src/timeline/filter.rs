//! Event eligibility filters.

use std::collections::BTreeSet;

use crate::error::FilterError;
use crate::event_type::{EventCategory, EventType, CUSTOM_CATEGORY};

/// A prepared set of eligible event type names.
///
/// Built from filter tokens, each naming a standard type, a custom type in
/// use by the store, one of the fixed categories, or `custom` for every
/// custom type. Birth and Death are always eligible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    tokens: Vec<String>,
    eligible: BTreeSet<String>,
}

impl EventFilter {
    /// Validate and expand `tokens`.
    ///
    /// # Errors
    /// Returns [`FilterError::UnknownEventFilter`] for the first token that is
    /// neither an event type nor a category.
    pub fn prepare(tokens: &[String], custom_types: &BTreeSet<String>) -> Result<Self, FilterError> {
        let mut eligible = BTreeSet::new();
        eligible.insert(EventType::Birth.xml_str().to_string());
        eligible.insert(EventType::Death.xml_str().to_string());

        for token in tokens {
            if EventType::from_standard(token).is_some() || custom_types.contains(token) {
                eligible.insert(token.clone());
                continue;
            }
            if let Some(category) = EventCategory::parse(token) {
                eligible.extend(category.members().iter().map(|t| t.xml_str().to_string()));
                continue;
            }
            if token == CUSTOM_CATEGORY {
                eligible.extend(custom_types.iter().cloned());
                continue;
            }
            return Err(FilterError::UnknownEventFilter(token.clone()));
        }

        Ok(Self {
            tokens: tokens.to_vec(),
            eligible,
        })
    }

    /// True when no tokens were configured.
    pub fn is_unfiltered(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn contains(&self, event_type: &EventType) -> bool {
        self.eligible.contains(event_type.xml_str())
    }

    pub fn eligible(&self) -> &BTreeSet<String> {
        &self.eligible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn birth_and_death_always_eligible() {
        let filter = EventFilter::prepare(&[], &BTreeSet::new()).unwrap();
        assert!(filter.is_unfiltered());
        assert!(filter.contains(&EventType::Birth));
        assert!(filter.contains(&EventType::Death));
        assert!(!filter.contains(&EventType::Census));
    }

    #[test]
    fn vital_category_expands_to_members() {
        let filter = EventFilter::prepare(&tokens(&["vital"]), &BTreeSet::new()).unwrap();
        for member in EventCategory::Vital.members() {
            assert!(filter.contains(member), "{member} missing");
        }
        for other in EventType::standard() {
            let expected = EventCategory::Vital.members().contains(other)
                || other.is_birth()
                || other.is_death();
            assert_eq!(filter.contains(other), expected, "{other}");
        }
    }

    #[test]
    fn custom_token_adds_store_types() {
        let custom: BTreeSet<String> = ["Shipwreck".to_string()].into();
        let filter = EventFilter::prepare(&tokens(&["custom"]), &custom).unwrap();
        assert!(filter.contains(&EventType::from("Shipwreck")));

        let named = EventFilter::prepare(&tokens(&["Shipwreck", "Census"]), &custom).unwrap();
        assert!(named.contains(&EventType::from("Shipwreck")));
        assert!(named.contains(&EventType::Census));
    }

    #[test]
    fn unknown_token_is_rejected() {
        let err = EventFilter::prepare(&tokens(&["NotARealType"]), &BTreeSet::new()).unwrap_err();
        assert_eq!(err, FilterError::UnknownEventFilter("NotARealType".into()));
    }
}
