//! Shared fixtures for kinline-core integration tests.

#![allow(dead_code)]

use kinline_core::{Date, Event, EventType, Family, Gender, Handle, MemoryStore, Person};
use kinline_core::model::ChildRef;

/// Builds a [`MemoryStore`] keeping family links on both sides consistent.
#[derive(Default)]
pub struct TreeBuilder {
    store: MemoryStore,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a person with events `(handle, type, date)`. The first Birth and
    /// Death become the designated vital events.
    pub fn person(&mut self, handle: &str, gender: Gender, events: &[(&str, EventType, Date)]) -> &mut Self {
        let mut person = Person::new(handle, gender).with_name(handle, "Fixture");
        for (event_handle, event_type, date) in events {
            let event = Event::new(*event_handle, event_type.clone(), *date);
            if event_type.is_birth() && person.birth_ref.is_none() {
                person.birth_ref = Some(event.handle.clone());
            }
            if event_type.is_death() && person.death_ref.is_none() {
                person.death_ref = Some(event.handle.clone());
            }
            person.event_refs.push(event.handle.clone());
            self.store.insert_event(event);
        }
        self.store.insert_person(person);
        self
    }

    /// Add a family and link its members back to it.
    pub fn family(
        &mut self,
        handle: &str,
        father: Option<&str>,
        mother: Option<&str>,
        children: &[&str],
        events: &[(&str, EventType, Date)],
    ) -> &mut Self {
        use kinline_core::GenealogyStore;

        let mut family = Family::new(handle);
        family.father = father.map(Handle::from);
        family.mother = mother.map(Handle::from);
        for child in children {
            family.child_refs.push(ChildRef::new(*child));
        }
        for (event_handle, event_type, date) in events {
            let event = Event::new(*event_handle, event_type.clone(), *date);
            family.event_refs.push(event.handle.clone());
            self.store.insert_event(event);
        }

        let parents: Vec<Handle> = family.parents().cloned().collect();
        for parent in parents {
            let mut person = self.store.person(&parent).expect("parent exists");
            person.family_list.push(family.handle.clone());
            self.store.insert_person(person);
        }
        for child in children {
            let mut person = self.store.person(&Handle::from(*child)).expect("child exists");
            person.parent_family_list.push(family.handle.clone());
            self.store.insert_person(person);
        }
        self.store.insert_family(family);
        self
    }

    pub fn build(&mut self) -> MemoryStore {
        std::mem::take(&mut self.store)
    }
}

/// Four generations around `Me`:
///
/// ```text
/// GF + GM (F_GP, married 1865)
///  ├── Dad + Mom (F_P, undated marriage)
///  │    ├── Me + Wife (F_S, married 1924)
///  │    │    └── Kid
///  │    └── Sis
///  └── Aunt
/// ```
pub fn family_tree() -> MemoryStore {
    use EventType::*;
    let d = Date::new;
    TreeBuilder::new()
        .person("GF", Gender::Male, &[("GF_B", Birth, d(1840, 3, 1)), ("GF_D", Death, d(1910, 4, 4))])
        .person("GM", Gender::Female, &[("GM_B", Birth, d(1845, 7, 10)), ("GM_BUR", Burial, d(1920, 1, 5))])
        .person("Dad", Gender::Male, &[
            ("DAD_B", Birth, d(1870, 2, 2)),
            ("DAD_OCC", Occupation, Date::empty()),
            ("DAD_CEN", Census, d(1901, 3, 31)),
            ("DAD_D", Death, d(1940, 11, 11)),
        ])
        .person("Mom", Gender::Female, &[("MOM_CHR", Christening, d(1872, 4, 4)), ("MOM_D", Death, d(1950, 6, 6))])
        .person("Aunt", Gender::Female, &[("AUNT_B", Birth, d(1875, 1, 1))])
        .person("Me", Gender::Male, &[
            ("ME_B", Birth, d(1900, 1, 15)),
            ("ME_BAP", Baptism, d(1900, 2, 1)),
            ("ME_OCC", Occupation, d(1925, 1, 1)),
            ("ME_RES", Residence, Date::empty()),
            ("ME_CEN", Census, d(1911, 4, 2)),
            ("ME_D", Death, d(1970, 12, 24)),
            ("ME_BUR", Burial, d(1970, 12, 30)),
        ])
        .person("Sis", Gender::Female, &[("SIS_B", Birth, d(1903, 5, 5))])
        .person("Wife", Gender::Female, &[("WIFE_B", Birth, d(1902, 9, 9))])
        .person("Kid", Gender::Male, &[("KID_B", Birth, d(1926, 8, 8))])
        .family("F_GP", Some("GF"), Some("GM"), &["Dad", "Aunt"], &[("GP_M", Marriage, d(1865, 5, 1))])
        .family("F_P", Some("Dad"), Some("Mom"), &["Me", "Sis"], &[("P_M", Marriage, Date::empty())])
        .family("F_S", Some("Me"), Some("Wife"), &["Kid"], &[("S_M", Marriage, d(1924, 6, 14))])
        .build()
}

pub fn handle(value: &str) -> Handle {
    Handle::from(value)
}
