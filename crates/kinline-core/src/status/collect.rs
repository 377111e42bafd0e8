//! Citation metric collection over a person or family graph.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use super::options::RankOptions;
use crate::error::Result;
use crate::model::{Event, Family, Handle, HasCitations, Person};
use crate::storage::GenealogyStore;

/// Object whose status is being ranked.
#[derive(Debug, Clone, PartialEq)]
pub enum PrimaryObject {
    Person(Person),
    Family(Family),
}

impl PrimaryObject {
    pub fn handle(&self) -> &Handle {
        match self {
            Self::Person(person) => &person.handle,
            Self::Family(family) => &family.handle,
        }
    }
}

/// Kind of sub-object an object-bucket row describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ObjectCategory {
    Person,
    Family,
    Child,
    Name,
    Ordinance,
    Attribute,
    Association,
    Address,
    Media,
}

impl ObjectCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Person => "Person",
            Self::Family => "Family",
            Self::Child => "Child",
            Self::Name => "Name",
            Self::Ordinance => "Ordinance",
            Self::Attribute => "Attribute",
            Self::Association => "Association",
            Self::Address => "Address",
            Self::Media => "Media",
        }
    }
}

impl fmt::Display for ObjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Citation count, summed confidence and highest confidence of one object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CitationMetrics {
    pub count: usize,
    pub total_confidence: u32,
    pub highest_confidence: u32,
}

impl CitationMetrics {
    /// # Errors
    /// Returns an error if a citation handle does not resolve.
    pub fn gather(store: &dyn GenealogyStore, citations: &[Handle]) -> Result<Self> {
        let mut metrics = Self {
            count: citations.len(),
            ..Self::default()
        };
        for handle in citations {
            let confidence = store.citation(handle)?.confidence;
            metrics.total_confidence += confidence;
            metrics.highest_confidence = metrics.highest_confidence.max(confidence);
        }
        Ok(metrics)
    }
}

/// One ranked sub-object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectRow {
    /// Person or family owning the sub-object.
    pub owner: Handle,
    pub category: ObjectCategory,
    pub metrics: CitationMetrics,
}

/// One event reached from the ranked object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRow {
    pub event: Event,
    /// First occurrence of its type on the owning object.
    pub primary: bool,
    pub metrics: CitationMetrics,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Buckets {
    pub objects: Vec<ObjectRow>,
    pub events: Vec<EventRow>,
}

/// Walk `object` and everything `options` reaches from it.
///
/// # Errors
/// Returns an error if any handle reached does not resolve.
pub fn collect(
    store: &dyn GenealogyStore,
    object: &PrimaryObject,
    options: &RankOptions,
) -> Result<Buckets> {
    let mut collector = Collector {
        store,
        options,
        buckets: Buckets::default(),
    };
    match object {
        PrimaryObject::Person(person) => collector.person(person, true)?,
        PrimaryObject::Family(family) => collector.family(family)?,
    }
    Ok(collector.buckets)
}

struct Collector<'a> {
    store: &'a dyn GenealogyStore,
    options: &'a RankOptions,
    buckets: Buckets,
}

impl Collector<'_> {
    fn rows<'c, T: HasCitations + 'c>(
        &mut self,
        owner: &Handle,
        category: ObjectCategory,
        items: impl IntoIterator<Item = &'c T>,
    ) -> Result<()> {
        for item in items {
            let metrics = CitationMetrics::gather(self.store, item.citations())?;
            self.buckets.objects.push(ObjectRow {
                owner: owner.clone(),
                category,
                metrics,
            });
        }
        Ok(())
    }

    fn person_objects(&mut self, person: &Person) -> Result<()> {
        let handle = &person.handle;
        if self.options.object {
            self.rows(handle, ObjectCategory::Person, [person])?;
        }
        if self.options.names {
            self.rows(handle, ObjectCategory::Name, person.names())?;
        }
        if self.options.ordinances {
            self.rows(handle, ObjectCategory::Ordinance, &person.ordinances)?;
        }
        if self.options.attributes {
            self.rows(handle, ObjectCategory::Attribute, &person.attributes)?;
        }
        if self.options.associations {
            self.rows(handle, ObjectCategory::Association, &person.associations)?;
        }
        if self.options.addresses {
            self.rows(handle, ObjectCategory::Address, &person.addresses)?;
        }
        if self.options.media {
            self.rows(handle, ObjectCategory::Media, &person.media)?;
        }
        Ok(())
    }

    fn family_objects(&mut self, family: &Family) -> Result<()> {
        let handle = &family.handle;
        if self.options.object {
            self.rows(handle, ObjectCategory::Family, [family])?;
        }
        if self.options.ordinances {
            self.rows(handle, ObjectCategory::Ordinance, &family.ordinances)?;
        }
        if self.options.attributes {
            self.rows(handle, ObjectCategory::Attribute, &family.attributes)?;
        }
        if self.options.media {
            self.rows(handle, ObjectCategory::Media, &family.media)?;
        }
        Ok(())
    }

    /// Event rows for one owner. `vital` holds the designated birth and
    /// death handles; Birth and Death events are primary only if listed.
    fn events(&mut self, event_refs: &[Handle], vital: &[&Handle]) -> Result<()> {
        let mut seen = HashSet::new();
        for handle in event_refs {
            let event = self.store.event(handle)?;
            let metrics = CitationMetrics::gather(self.store, &event.citations)?;
            let first = seen.insert(event.event_type.xml_str().to_string());
            let primary = first
                && (!(event.event_type.is_birth() || event.event_type.is_death())
                    || vital.contains(&handle));
            self.buckets.events.push(EventRow {
                event,
                primary,
                metrics,
            });
        }
        Ok(())
    }

    fn person(&mut self, person: &Person, include_family: bool) -> Result<()> {
        self.person_objects(person)?;
        let vital: Vec<&Handle> = person.birth_ref.iter().chain(&person.death_ref).collect();
        self.events(&person.event_refs, &vital)?;

        if !include_family {
            return Ok(());
        }
        if self.options.object {
            for handle in &person.parent_family_list {
                let family = self.store.family(handle)?;
                if let Some(child_ref) = family.child_refs.iter().find(|c| c.child == person.handle) {
                    self.rows(&family.handle, ObjectCategory::Child, [child_ref])?;
                }
            }
        }
        for handle in &person.family_list {
            let family = self.store.family(handle)?;
            self.family_objects(&family)?;
            self.events(&family.event_refs, &[])?;
        }
        Ok(())
    }

    fn family(&mut self, family: &Family) -> Result<()> {
        self.family_objects(family)?;
        self.events(&family.event_refs, &[])?;

        if self.options.spouses {
            for handle in family.parents() {
                let spouse = self.store.person(handle)?;
                self.person(&spouse, false)?;
            }
        }
        if self.options.children {
            for child_ref in &family.child_refs {
                let child = self.store.person(&child_ref.child)?;
                self.person(&child, false)?;
            }
        }
        Ok(())
    }
}
