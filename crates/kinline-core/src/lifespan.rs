//! Probable lifespan estimation.
//!
//! Used by the timeline to bound relative expansion when the subject's own
//! vital dates are missing.

use crate::date::Date;
use crate::error::Result;
use crate::model::{Event, Person};
use crate::storage::GenealogyStore;

/// Default upper bound on a human lifespan, in years.
pub const MAX_AGE_YEARS: i32 = 110;

/// Estimates the range of dates during which a person was probably alive.
pub trait LifespanEstimator {
    /// Earliest and latest plausible dates; either side may be unknown.
    fn probably_alive_range(
        &self,
        store: &dyn GenealogyStore,
        person: &Person,
    ) -> Result<(Option<Date>, Option<Date>)>;
}

/// Estimator based on vital events and a maximum age.
#[derive(Debug, Clone, Copy)]
pub struct ProbablyAlive {
    pub max_age_years: i32,
}

impl Default for ProbablyAlive {
    fn default() -> Self {
        Self {
            max_age_years: MAX_AGE_YEARS,
        }
    }
}

fn dated(event: &Event) -> Option<Date> {
    (!event.date.is_empty()).then_some(event.date)
}

impl LifespanEstimator for ProbablyAlive {
    fn probably_alive_range(
        &self,
        store: &dyn GenealogyStore,
        person: &Person,
    ) -> Result<(Option<Date>, Option<Date>)> {
        let mut events = Vec::with_capacity(person.event_refs.len());
        for handle in &person.event_refs {
            events.push(store.event(handle)?);
        }

        let mut birth = None;
        if let Some(handle) = &person.birth_ref {
            birth = dated(&store.event(handle)?);
        }
        if birth.is_none() {
            birth = events
                .iter()
                .filter(|e| e.event_type.is_birth_fallback())
                .find_map(dated);
        }

        let mut death = None;
        if let Some(handle) = &person.death_ref {
            death = dated(&store.event(handle)?);
        }
        if death.is_none() {
            death = events
                .iter()
                .filter(|e| e.event_type.is_death_indicator())
                .find_map(dated);
        }

        let range = match (birth, death) {
            (Some(b), Some(d)) => (Some(b), Some(d)),
            (Some(b), None) => (Some(b), Some(b.add_years(self.max_age_years))),
            (None, Some(d)) => (Some(d.add_years(-self.max_age_years)), Some(d)),
            (None, None) => {
                let mut dates: Vec<Date> = events.iter().filter_map(dated).collect();
                dates.sort_by_key(Date::sortval);
                match (dates.first(), dates.last()) {
                    (Some(earliest), Some(latest)) => (
                        Some(latest.add_years(-self.max_age_years)),
                        Some(earliest.add_years(self.max_age_years)),
                    ),
                    _ => (None, None),
                }
            }
        };
        tracing::trace!(person = %person.handle, ?range, "probable lifespan");
        Ok(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_type::EventType;
    use crate::model::Gender;
    use crate::storage::MemoryStore;

    fn person_with(store: &mut MemoryStore, events: Vec<Event>) -> Person {
        let mut person = Person::new("I1", Gender::Female);
        for event in events {
            person.event_refs.push(event.handle.clone());
            store.insert_event(event);
        }
        person
    }

    #[test]
    fn birth_only_extends_by_max_age() {
        let mut store = MemoryStore::new();
        let mut person = person_with(
            &mut store,
            vec![Event::new("E1", EventType::Birth, Date::new(1850, 4, 2))],
        );
        person.birth_ref = Some("E1".into());
        let range = ProbablyAlive::default()
            .probably_alive_range(&store, &person)
            .unwrap();
        assert_eq!(range, (Some(Date::new(1850, 4, 2)), Some(Date::new(1960, 4, 2))));
    }

    #[test]
    fn death_indicator_stands_in_for_death() {
        let mut store = MemoryStore::new();
        let person = person_with(
            &mut store,
            vec![Event::new("E1", EventType::Burial, Date::year_only(1900))],
        );
        let range = ProbablyAlive::default()
            .probably_alive_range(&store, &person)
            .unwrap();
        assert_eq!(range, (Some(Date::year_only(1790)), Some(Date::year_only(1900))));
    }

    #[test]
    fn other_events_bound_both_sides() {
        let mut store = MemoryStore::new();
        let person = person_with(
            &mut store,
            vec![
                Event::new("E1", EventType::Census, Date::year_only(1881)),
                Event::new("E2", EventType::Residence, Date::year_only(1871)),
            ],
        );
        let range = ProbablyAlive { max_age_years: 100 }
            .probably_alive_range(&store, &person)
            .unwrap();
        assert_eq!(range, (Some(Date::year_only(1781)), Some(Date::year_only(1971))));
    }

    #[test]
    fn nothing_dated_is_unknown() {
        let mut store = MemoryStore::new();
        let person = person_with(
            &mut store,
            vec![Event::new("E1", EventType::Occupation, Date::empty())],
        );
        let range = ProbablyAlive::default()
            .probably_alive_range(&store, &person)
            .unwrap();
        assert_eq!(range, (None, None));
    }
}
