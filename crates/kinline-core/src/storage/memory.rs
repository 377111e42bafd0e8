//! In-memory genealogical store.
//!
//! Backed by ordered maps so iteration is deterministic. Loaded from a JSON
//! [`StoreSnapshot`] or built record by record in tests.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use super::{GenealogyStore, StoreSnapshot};
use crate::error::{ObjectKind, Result, StoreError};
use crate::model::{Citation, Event, Family, Handle, Person};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    people: BTreeMap<Handle, Person>,
    families: BTreeMap<Handle, Family>,
    events: BTreeMap<Handle, Event>,
    citations: BTreeMap<Handle, Citation>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON snapshot file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self> {
        Ok(Self::from_snapshot(StoreSnapshot::from_path(path)?))
    }

    /// Parse a JSON snapshot.
    ///
    /// # Errors
    /// Returns an error if the text is not a valid snapshot.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let snapshot: StoreSnapshot = serde_json::from_str(json)?;
        Ok(Self::from_snapshot(snapshot))
    }

    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        let mut store = Self::new();
        for person in snapshot.people {
            store.insert_person(person);
        }
        for family in snapshot.families {
            store.insert_family(family);
        }
        for event in snapshot.events {
            store.insert_event(event);
        }
        for citation in snapshot.citations {
            store.insert_citation(citation);
        }
        store
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            people: self.people.values().cloned().collect(),
            families: self.families.values().cloned().collect(),
            events: self.events.values().cloned().collect(),
            citations: self.citations.values().cloned().collect(),
        }
    }

    pub fn insert_person(&mut self, person: Person) -> &mut Self {
        self.people.insert(person.handle.clone(), person);
        self
    }

    pub fn insert_family(&mut self, family: Family) -> &mut Self {
        self.families.insert(family.handle.clone(), family);
        self
    }

    pub fn insert_event(&mut self, event: Event) -> &mut Self {
        self.events.insert(event.handle.clone(), event);
        self
    }

    pub fn insert_citation(&mut self, citation: Citation) -> &mut Self {
        self.citations.insert(citation.handle.clone(), citation);
        self
    }

    pub fn person_count(&self) -> usize {
        self.people.len()
    }
}

fn lookup<T: Clone>(
    map: &BTreeMap<Handle, T>,
    kind: ObjectKind,
    handle: &Handle,
) -> Result<T, StoreError> {
    map.get(handle)
        .cloned()
        .ok_or_else(|| StoreError::not_found(kind, handle))
}

impl GenealogyStore for MemoryStore {
    fn person(&self, handle: &Handle) -> Result<Person, StoreError> {
        lookup(&self.people, ObjectKind::Person, handle)
    }

    fn family(&self, handle: &Handle) -> Result<Family, StoreError> {
        lookup(&self.families, ObjectKind::Family, handle)
    }

    fn event(&self, handle: &Handle) -> Result<Event, StoreError> {
        lookup(&self.events, ObjectKind::Event, handle)
    }

    fn citation(&self, handle: &Handle) -> Result<Citation, StoreError> {
        lookup(&self.citations, ObjectKind::Citation, handle)
    }

    fn custom_event_types(&self) -> Result<BTreeSet<String>, StoreError> {
        Ok(self
            .events
            .values()
            .filter(|e| e.event_type.is_custom())
            .map(|e| e.event_type.to_string())
            .collect())
    }
}
