//! Timeline construction and relative expansion.

use std::collections::{BTreeSet, HashMap};

use super::context::TraversalContext;
use super::filter::EventFilter;
use super::item::{KeyedEvent, TimelineEntry, TimelineItem, SELF_RELATION};
use super::keys::prepare_event_sortvals;
use super::options::TimelineOptions;
use crate::date::{Date, DateRange, Span};
use crate::error::{FilterError, Result};
use crate::lifespan::{LifespanEstimator, ProbablyAlive};
use crate::model::{Event, Family, Handle, Person};
use crate::relationship::{KinshipCalculator, RelationshipCalculator};
use crate::storage::GenealogyStore;

/// A person's keyed events with the chosen birth and death.
///
/// Birth is the first exact birth event, otherwise the first birth
/// fallback. Death is the first exact death event, otherwise the first
/// death indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonEvents {
    pub keyed: Vec<KeyedEvent>,
    pub birth: Option<Event>,
    pub death: Option<Event>,
}

/// Builds chronological event timelines for a person, a family or an
/// arbitrary group, optionally expanded to relatives.
pub struct Timeline<'s> {
    store: &'s dyn GenealogyStore,
    options: TimelineOptions,
    custom_types: BTreeSet<String>,
    eligible_events: EventFilter,
    eligible_relative_events: EventFilter,
    calculator: Box<dyn RelationshipCalculator>,
    estimator: Box<dyn LifespanEstimator>,
    entries: Vec<TimelineEntry>,
    births: HashMap<Handle, Option<Date>>,
}

impl<'s> Timeline<'s> {
    /// Create a timeline over `store`, preparing both event filters.
    ///
    /// # Errors
    /// Returns an error if a filter token is unknown or the store's custom
    /// event types cannot be read.
    pub fn new(store: &'s dyn GenealogyStore, options: TimelineOptions) -> Result<Self> {
        let custom_types = store.custom_event_types()?;
        let eligible_events = EventFilter::prepare(&options.events, &custom_types)?;
        let eligible_relative_events =
            EventFilter::prepare(&options.relative_events, &custom_types)?;
        Ok(Self {
            store,
            options,
            custom_types,
            eligible_events,
            eligible_relative_events,
            calculator: Box::new(KinshipCalculator),
            estimator: Box::new(ProbablyAlive::default()),
            entries: Vec::new(),
            births: HashMap::new(),
        })
    }

    pub fn with_calculator(mut self, calculator: impl RelationshipCalculator + 'static) -> Self {
        self.calculator = Box::new(calculator);
        self
    }

    pub fn with_estimator(mut self, estimator: impl LifespanEstimator + 'static) -> Self {
        self.estimator = Box::new(estimator);
        self
    }

    pub fn options(&self) -> &TimelineOptions {
        &self.options
    }

    /// Set bounds from `YYYY/MM/DD-YYYY/MM/DD` text.
    ///
    /// # Errors
    /// Returns an error if either side is malformed.
    pub fn set_date_range(&mut self, text: &str) -> Result<(), FilterError> {
        self.options.range = DateRange::parse(text)?;
        Ok(())
    }

    pub fn set_start_date(&mut self, date: Option<Date>) {
        self.options.range.start = date;
    }

    pub fn set_end_date(&mut self, date: Option<Date>) {
        self.options.range.end = date;
    }

    pub fn set_precision(&mut self, precision: u8) {
        self.options.precision = precision;
    }

    pub fn set_relatives(&mut self, relatives: Vec<String>) {
        self.options.relatives = relatives;
    }

    pub fn set_reference_person(&mut self, reference: Option<Handle>) {
        self.options.reference_person = reference;
    }

    pub fn set_max_events(&mut self, max_events: Option<usize>) {
        self.options.max_events = max_events;
    }

    /// # Errors
    /// Returns an error if a token is unknown; the previous filter is kept.
    pub fn set_event_filters(&mut self, filters: Vec<String>) -> Result<(), FilterError> {
        self.eligible_events = EventFilter::prepare(&filters, &self.custom_types)?;
        self.options.events = filters;
        Ok(())
    }

    /// # Errors
    /// Returns an error if a token is unknown; the previous filter is kept.
    pub fn set_relative_event_filters(&mut self, filters: Vec<String>) -> Result<(), FilterError> {
        self.eligible_relative_events = EventFilter::prepare(&filters, &self.custom_types)?;
        self.options.relative_events = filters;
        Ok(())
    }

    /// Whether `event` passes the relative or primary event filter.
    pub fn is_eligible(&self, event: &Event, relative: bool) -> bool {
        if relative {
            return self.eligible_relative_events.contains(&event.event_type);
        }
        if self.eligible_events.is_unfiltered() {
            return true;
        }
        self.eligible_events.contains(&event.event_type)
    }

    /// Key `events` owned by `family` (or by a person when `None`).
    ///
    /// # Errors
    /// Returns an error if a child lookup fails.
    pub fn prepare_event_sortvals(
        &self,
        events: Vec<Event>,
        family: Option<&Family>,
    ) -> Result<Vec<KeyedEvent>> {
        prepare_event_sortvals(self.store, events, family)
    }

    /// Keyed personal events followed by the keyed events of each family the
    /// person is a spouse in, plus the chosen birth and death.
    ///
    /// # Errors
    /// Returns an error if an event or family lookup fails.
    pub fn extract_person_events(&self, person: &Person) -> Result<PersonEvents> {
        let mut birth = None;
        let mut birth_fallback = None;
        let mut death = None;
        let mut death_fallback = None;
        let mut events = Vec::with_capacity(person.event_refs.len());

        for handle in &person.event_refs {
            let event = self.store.event(handle)?;
            let kind = &event.event_type;
            if kind.is_birth() && birth.is_none() {
                birth = Some(event.clone());
            } else if kind.is_birth_fallback() && birth_fallback.is_none() {
                birth_fallback = Some(event.clone());
            }
            if kind.is_death() && death.is_none() {
                death = Some(event.clone());
            } else if kind.is_death_indicator() && death_fallback.is_none() {
                death_fallback = Some(event.clone());
            }
            events.push(event);
        }

        let mut keyed = self.prepare_event_sortvals(events, None)?;
        for family_handle in &person.family_list {
            let family = self.store.family(family_handle)?;
            let mut family_events = Vec::with_capacity(family.event_refs.len());
            for handle in &family.event_refs {
                family_events.push(self.store.event(handle)?);
            }
            keyed.extend(self.prepare_event_sortvals(family_events, Some(&family))?);
        }

        Ok(PersonEvents {
            keyed,
            birth: birth.or(birth_fallback),
            death: death.or(death_fallback),
        })
    }

    /// Append eligible, in-range, not yet seen events to the run.
    ///
    /// The chosen birth and death bypass the event filters but not the
    /// date bounds.
    pub fn merge(
        &self,
        ctx: &mut TraversalContext,
        person: &Person,
        extracted: &PersonEvents,
        relation: &str,
        relative: bool,
    ) {
        let is_vital = |event: &Event| {
            let same = |chosen: &Option<Event>| {
                chosen.as_ref().is_some_and(|c| c.handle == event.handle)
            };
            same(&extracted.birth) || same(&extracted.death)
        };

        for KeyedEvent { sort_key, event } in &extracted.keyed {
            if ctx.events.contains(&event.handle) {
                continue;
            }
            if !self.is_eligible(event, relative) && !is_vital(event) {
                tracing::debug!(relation, event = %event.handle, "not eligible");
                continue;
            }
            if ctx.start_key.is_some_and(|start| *sort_key < start) {
                tracing::debug!(relation, event = %event.handle, "before start");
                continue;
            }
            if ctx.end_key.is_some_and(|end| *sort_key > end) {
                tracing::debug!(relation, event = %event.handle, "after end");
                continue;
            }
            ctx.events.insert(event.handle.clone());
            ctx.entries.push(TimelineEntry {
                sort_key: *sort_key,
                item: TimelineItem {
                    event: event.clone(),
                    person: person.clone(),
                    relation: relation.to_string(),
                },
            });
        }
    }

    fn collect(
        &self,
        ctx: &mut TraversalContext,
        person: &Person,
        relation: &str,
        relative: bool,
    ) -> Result<PersonEvents> {
        let extracted = self.extract_person_events(person)?;
        self.merge(ctx, person, &extracted, relation, relative);
        ctx.record_birth(&person.handle, extracted.birth.as_ref().map(|b| b.date));
        Ok(extracted)
    }

    /// Fresh per-run state honoring the configured date range.
    pub fn new_context(&self) -> TraversalContext {
        tracing::debug!(
            events = ?self.eligible_events.eligible(),
            relatives = ?self.options.relatives,
            relative_events = ?self.eligible_relative_events.eligible(),
            "starting timeline run"
        );
        TraversalContext::new(&self.options.range)
    }

    /// Sort the run's entries and make them this timeline's result.
    pub fn finish(&mut self, ctx: TraversalContext) {
        let mut entries = ctx.entries;
        entries.sort_by_key(|e| e.sort_key);
        if let Some(max) = self.options.max_events {
            entries.truncate(max);
        }
        self.entries = entries;
        self.births = ctx.people;
    }

    /// Timeline of a person, expanded `ancestors` generations up and
    /// `offspring` generations down through eligible relatives.
    ///
    /// # Errors
    /// Returns an error if any handle reached during traversal does not
    /// resolve.
    pub fn set_person(&mut self, handle: &Handle, ancestors: u32, offspring: u32) -> Result<()> {
        let mut ctx = self.new_context();
        let person = self.store.person(handle)?;
        ctx.visit(&person.handle);
        let extracted = self.collect(&mut ctx, &person, SELF_RELATION, false)?;

        if ancestors > 0 || offspring > 0 {
            ctx.set_reference(person.handle.clone(), ancestors.max(offspring) + 1);

            let lifespan = if extracted.birth.is_none() || extracted.death.is_none() {
                self.estimator.probably_alive_range(self.store, &person)?
            } else {
                (None, None)
            };
            ctx.derive_start(match &extracted.birth {
                Some(birth) => Some(birth.date),
                None => lifespan.0,
            });
            ctx.derive_end_key(match &extracted.death {
                Some(_) => extracted.keyed.iter().map(|k| k.sort_key).max(),
                None => lifespan.1.map(|d| d.sortval()),
            });
            tracing::debug!(person = %person.handle, bounds = ?ctx.bounds(), "expanding relatives");

            for family in &person.parent_family_list {
                self.add_family(&mut ctx, family, ancestors, 0, true)?;
            }
            for family in &person.family_list {
                self.add_family(&mut ctx, family, ancestors, offspring, true)?;
            }
        }

        self.finish(ctx);
        Ok(())
    }

    /// Timeline of a family's parents and children. With a configured
    /// reference person, members are labeled and expanded as relatives.
    ///
    /// # Errors
    /// Returns an error if any handle reached during traversal does not
    /// resolve.
    pub fn set_family(&mut self, handle: &Handle, ancestors: u32, offspring: u32) -> Result<()> {
        let mut ctx = self.new_context();
        if let Some(reference) = self.options.reference_person.clone() {
            ctx.set_reference(reference, ancestors.max(offspring) + 1);
        }
        self.add_family(&mut ctx, handle, ancestors, offspring, true)?;
        self.finish(ctx);
        Ok(())
    }

    /// Timeline of an arbitrary set of people and families.
    ///
    /// # Errors
    /// Returns an error if any handle does not resolve.
    pub fn set_group(&mut self, people: &[Handle], families: &[Handle]) -> Result<()> {
        let mut ctx = self.new_context();
        for person in people {
            self.add_person(&mut ctx, person)?;
        }
        for family in families {
            self.add_family(&mut ctx, family, 0, 0, true)?;
        }
        self.finish(ctx);
        Ok(())
    }

    /// Merge a person's own events under the `self` relation.
    ///
    /// # Errors
    /// Returns an error if the person or one of their events does not resolve.
    pub fn add_person(&self, ctx: &mut TraversalContext, handle: &Handle) -> Result<()> {
        if !ctx.visit(handle) {
            return Ok(());
        }
        let person = self.store.person(handle)?;
        self.collect(ctx, &person, SELF_RELATION, false)?;
        Ok(())
    }

    /// Merge a relative's events if their relationship to the reference
    /// person matches an eligible label, then continue down through their
    /// spousal families and up through their parent families.
    ///
    /// # Errors
    /// Returns an error if any handle reached does not resolve.
    pub fn add_relative(
        &self,
        ctx: &mut TraversalContext,
        handle: &Handle,
        ancestors: u32,
        offspring: u32,
    ) -> Result<()> {
        if self.options.relatives.is_empty() {
            return Ok(());
        }
        if !ctx.visit(handle) {
            return Ok(());
        }
        let person = self.store.person(handle)?;
        let Some(reference) = ctx.reference.clone() else {
            self.collect(ctx, &person, SELF_RELATION, false)?;
            return Ok(());
        };

        let relationship =
            self.calculator
                .get_one_relationship(self.store, &reference, handle, ctx.depth)?;
        let eligible = !relationship.is_empty()
            && self
                .options
                .relatives
                .iter()
                .any(|r| relationship.contains(r.as_str()));
        if !eligible {
            tracing::debug!(person = %handle, relationship = %relationship, "relative not eligible");
            return Ok(());
        }
        tracing::debug!(person = %handle, relationship = %relationship, "found relative");
        self.collect(ctx, &person, &relationship, true)?;

        if offspring > 0 {
            for family_handle in &person.family_list {
                let family = self.store.family(family_handle)?;
                for parent in family.parents() {
                    self.add_relative(ctx, parent, 1, offspring - 1)?;
                }
                for child in &family.child_refs {
                    self.add_relative(ctx, &child.child, 1, offspring - 1)?;
                }
            }
        }

        if ancestors > 1 && (relationship.contains("father") || relationship.contains("mother")) {
            for family_handle in &person.parent_family_list {
                self.add_family(ctx, family_handle, ancestors - 1, 0, false)?;
            }
        }
        Ok(())
    }

    /// Add a family's parents and, if `include_children`, its children:
    /// as relatives when the run has a reference person, directly otherwise.
    ///
    /// # Errors
    /// Returns an error if any handle reached does not resolve.
    pub fn add_family(
        &self,
        ctx: &mut TraversalContext,
        handle: &Handle,
        ancestors: u32,
        offspring: u32,
        include_children: bool,
    ) -> Result<()> {
        let family = self.store.family(handle)?;
        if ctx.reference.is_some() {
            for parent in family.parents() {
                self.add_relative(ctx, parent, ancestors, 1)?;
            }
            if include_children {
                for child in &family.child_refs {
                    self.add_relative(ctx, &child.child, 1, offspring)?;
                }
            }
        } else {
            for parent in family.parents() {
                self.add_person(ctx, parent)?;
            }
            for child in &family.child_refs {
                self.add_person(ctx, &child.child)?;
            }
        }
        Ok(())
    }

    /// Sorted items of the last run.
    pub fn events(&self) -> Vec<&TimelineItem> {
        self.entries.iter().map(|e| &e.item).collect()
    }

    /// Sorted items of the last run with their sort keys.
    pub fn raw_events(&self) -> &[TimelineEntry] {
        &self.entries
    }

    /// Chosen birth date of a person visited by the last run.
    pub fn birth_date(&self, handle: &Handle) -> Option<Date> {
        self.births.get(handle).copied().flatten()
    }

    /// Chosen birth date of `handle`, read from the store so it works for
    /// people the last run never visited.
    ///
    /// # Errors
    /// Returns an error if the person or one of their events does not
    /// resolve.
    pub fn subject_birth(&self, handle: &Handle) -> Result<Option<Date>> {
        let person = self.store.person(handle)?;
        Ok(self.extract_person_events(&person)?.birth.map(|b| b.date))
    }

    /// Span from `start` to `date` at the configured precision, empty when
    /// either is missing or `date` precedes `start`.
    pub fn age(&self, start: Option<&Date>, date: &Date) -> String {
        start
            .and_then(|start| Span::between(start, date))
            .map(|span| span.format(self.options.precision, &self.options.locale))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_type::EventType;
    use crate::model::Gender;
    use crate::storage::MemoryStore;

    fn store() -> MemoryStore {
        let mut store = MemoryStore::new();
        let mut person = Person::new("I1", Gender::Male);
        person.event_refs = ["E1", "E2", "E3", "E4"].map(Handle::from).to_vec();
        store
            .insert_person(person)
            .insert_event(Event::new("E1", EventType::Baptism, Date::new(1900, 2, 1)))
            .insert_event(Event::new("E2", EventType::Birth, Date::new(1900, 1, 15)))
            .insert_event(Event::new("E3", EventType::Census, Date::new(1911, 4, 2)))
            .insert_event(Event::new("E4", EventType::Burial, Date::new(1960, 8, 1)));
        store
    }

    #[test]
    fn exact_birth_beats_earlier_fallback() {
        let store = store();
        let timeline = Timeline::new(&store, TimelineOptions::default()).unwrap();
        let person = store.person(&"I1".into()).unwrap();
        let extracted = timeline.extract_person_events(&person).unwrap();
        assert_eq!(extracted.birth.unwrap().handle, Handle::from("E2"));
        assert_eq!(extracted.death.unwrap().handle, Handle::from("E4"));
    }

    #[test]
    fn filtered_timeline_keeps_vital_events() {
        let store = store();
        let options = TimelineOptions {
            events: vec!["residence".into()],
            ..TimelineOptions::default()
        };
        let mut timeline = Timeline::new(&store, options).unwrap();
        timeline.set_person(&"I1".into(), 0, 0).unwrap();
        let handles: Vec<&str> = timeline
            .events()
            .iter()
            .map(|i| i.event.handle.as_str())
            .collect();
        assert_eq!(handles, vec!["E2", "E3", "E4"]);
        assert!(timeline.events().iter().all(|i| i.is_self()));
    }

    #[test]
    fn max_events_truncates_sorted_output() {
        let store = store();
        let options = TimelineOptions {
            max_events: Some(2),
            ..TimelineOptions::default()
        };
        let mut timeline = Timeline::new(&store, options).unwrap();
        timeline.set_person(&"I1".into(), 0, 0).unwrap();
        let keys: Vec<i64> = timeline.raw_events().iter().map(|e| e.sort_key).collect();
        assert_eq!(
            keys,
            vec![Date::new(1900, 1, 15).sortval(), Date::new(1900, 2, 1).sortval()]
        );
    }

    #[test]
    fn age_uses_configured_precision() {
        let store = store();
        let mut timeline = Timeline::new(&store, TimelineOptions::default()).unwrap();
        timeline.set_person(&"I1".into(), 0, 0).unwrap();
        let birth = timeline.birth_date(&"I1".into());
        assert_eq!(birth, Some(Date::new(1900, 1, 15)));
        assert_eq!(timeline.age(birth.as_ref(), &Date::new(1911, 4, 2)), "11 years");
        timeline.set_precision(2);
        assert_eq!(
            timeline.age(birth.as_ref(), &Date::new(1911, 4, 2)),
            "11 years, 2 months"
        );
        assert_eq!(timeline.age(None, &Date::new(1911, 4, 2)), "");
    }

    #[test]
    fn subject_birth_reads_unvisited_people() {
        let store = store();
        let timeline = Timeline::new(&store, TimelineOptions::default()).unwrap();
        assert_eq!(
            timeline.subject_birth(&"I1".into()).unwrap(),
            Some(Date::new(1900, 1, 15))
        );
        assert!(timeline.subject_birth(&"I9".into()).is_err());
    }

    #[test]
    fn unknown_filter_token_fails_construction() {
        let store = store();
        let options = TimelineOptions {
            relative_events: vec!["NotARealType".into()],
            ..TimelineOptions::default()
        };
        assert!(Timeline::new(&store, options).is_err());
    }

    #[test]
    fn rejected_filter_keeps_previous_one() {
        let store = store();
        let mut timeline = Timeline::new(&store, TimelineOptions::default()).unwrap();
        assert!(timeline.set_event_filters(vec!["bogus".into()]).is_err());
        assert!(timeline.options().events.is_empty());
        let census = Event::new("X", EventType::Census, Date::empty());
        assert!(timeline.is_eligible(&census, false));
        assert!(!timeline.is_eligible(&census, true));
    }
}
