//! Genealogical record types.
//!
//! These are read-only views over a store. The engines never mutate them;
//! they are fetched by [`Handle`] through [`GenealogyStore`](crate::storage::GenealogyStore).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::date::Date;
use crate::event_type::EventType;

/// Opaque stable identifier of a stored record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Handle(String);

impl Handle {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Handle {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Handle {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Objects that carry a citation list.
pub trait HasCitations {
    fn citations(&self) -> &[Handle];
}

macro_rules! impl_has_citations {
    ($($ty:ty),* $(,)?) => {
        $(
            impl HasCitations for $ty {
                fn citations(&self) -> &[Handle] {
                    &self.citations
                }
            }
        )*
    };
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Name {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub citations: Vec<Handle>,
}

impl Name {
    pub fn new(first_name: impl Into<String>, surname: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            surname: surname.into(),
            citations: Vec::new(),
        }
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.first_name.is_empty(), self.surname.is_empty()) {
            (false, false) => write!(f, "{} {}", self.first_name, self.surname),
            (false, true) => f.write_str(&self.first_name),
            _ => f.write_str(&self.surname),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub kind: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub citations: Vec<Handle>,
}

/// Association with another person, e.g. a godparent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonRef {
    pub person: Handle,
    #[serde(default)]
    pub relation: String,
    #[serde(default)]
    pub citations: Vec<Handle>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub date: Date,
    #[serde(default)]
    pub citations: Vec<Handle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRef {
    pub media: Handle,
    #[serde(default)]
    pub citations: Vec<Handle>,
}

/// Religious ordinance record (baptism, endowment, sealing...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ordinance {
    pub kind: String,
    #[serde(default)]
    pub date: Date,
    #[serde(default)]
    pub citations: Vec<Handle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildRef {
    pub child: Handle,
    #[serde(default)]
    pub citations: Vec<Handle>,
}

impl ChildRef {
    pub fn new(child: impl Into<Handle>) -> Self {
        Self {
            child: child.into(),
            citations: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub handle: Handle,
    #[serde(default)]
    pub gramps_id: String,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub primary_name: Name,
    #[serde(default)]
    pub alternate_names: Vec<Name>,
    /// Event handles in the order the user arranged them.
    #[serde(default)]
    pub event_refs: Vec<Handle>,
    #[serde(default)]
    pub birth_ref: Option<Handle>,
    #[serde(default)]
    pub death_ref: Option<Handle>,
    /// Families in which this person is a spouse.
    #[serde(default)]
    pub family_list: Vec<Handle>,
    /// Families in which this person is a child.
    #[serde(default)]
    pub parent_family_list: Vec<Handle>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub associations: Vec<PersonRef>,
    #[serde(default)]
    pub addresses: Vec<Address>,
    #[serde(default)]
    pub media: Vec<MediaRef>,
    #[serde(default)]
    pub ordinances: Vec<Ordinance>,
    #[serde(default)]
    pub citations: Vec<Handle>,
}

impl Person {
    pub fn new(handle: impl Into<Handle>, gender: Gender) -> Self {
        Self {
            handle: handle.into(),
            gramps_id: String::new(),
            gender,
            primary_name: Name::default(),
            alternate_names: Vec::new(),
            event_refs: Vec::new(),
            birth_ref: None,
            death_ref: None,
            family_list: Vec::new(),
            parent_family_list: Vec::new(),
            attributes: Vec::new(),
            associations: Vec::new(),
            addresses: Vec::new(),
            media: Vec::new(),
            ordinances: Vec::new(),
            citations: Vec::new(),
        }
    }

    pub fn with_name(mut self, first_name: &str, surname: &str) -> Self {
        self.primary_name = Name::new(first_name, surname);
        self
    }

    /// Primary name followed by alternate names.
    pub fn names(&self) -> impl Iterator<Item = &Name> {
        std::iter::once(&self.primary_name).chain(self.alternate_names.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Family {
    pub handle: Handle,
    #[serde(default)]
    pub gramps_id: String,
    #[serde(default)]
    pub father: Option<Handle>,
    #[serde(default)]
    pub mother: Option<Handle>,
    #[serde(default)]
    pub child_refs: Vec<ChildRef>,
    #[serde(default)]
    pub event_refs: Vec<Handle>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub media: Vec<MediaRef>,
    #[serde(default)]
    pub ordinances: Vec<Ordinance>,
    #[serde(default)]
    pub citations: Vec<Handle>,
}

impl Family {
    pub fn new(handle: impl Into<Handle>) -> Self {
        Self {
            handle: handle.into(),
            gramps_id: String::new(),
            father: None,
            mother: None,
            child_refs: Vec::new(),
            event_refs: Vec::new(),
            attributes: Vec::new(),
            media: Vec::new(),
            ordinances: Vec::new(),
            citations: Vec::new(),
        }
    }

    /// Father and mother handles that are set.
    pub fn parents(&self) -> impl Iterator<Item = &Handle> {
        self.father.iter().chain(self.mother.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub handle: Handle,
    #[serde(default)]
    pub gramps_id: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(default)]
    pub date: Date,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub citations: Vec<Handle>,
}

impl Event {
    pub fn new(handle: impl Into<Handle>, event_type: EventType, date: Date) -> Self {
        Self {
            handle: handle.into(),
            gramps_id: String::new(),
            event_type,
            date,
            description: String::new(),
            citations: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_citations(mut self, citations: &[&str]) -> Self {
        self.citations = citations.iter().map(|c| Handle::from(*c)).collect();
        self
    }
}

/// Source citation with an ordered confidence level (0 = very low, 4 = very high).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub handle: Handle,
    #[serde(default)]
    pub gramps_id: String,
    #[serde(default)]
    pub confidence: u32,
    #[serde(default)]
    pub page: String,
}

impl Citation {
    pub fn new(handle: impl Into<Handle>, confidence: u32) -> Self {
        Self {
            handle: handle.into(),
            gramps_id: String::new(),
            confidence,
            page: String::new(),
        }
    }
}

impl_has_citations!(Person, Family, Event, Name, Attribute, PersonRef, Address, MediaRef, Ordinance, ChildRef);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn person_json_uses_defaults() {
        let person: Person = serde_json::from_str(
            r#"{"handle": "I0001", "gender": "female", "event_refs": ["E1", "E2"]}"#,
        )
        .unwrap();
        assert_eq!(person.handle, Handle::from("I0001"));
        assert_eq!(person.gender, Gender::Female);
        assert_eq!(person.event_refs.len(), 2);
        assert!(person.birth_ref.is_none());
        assert!(person.citations.is_empty());
    }

    #[test]
    fn event_type_field_is_named_type() {
        let event: Event = serde_json::from_str(
            r#"{"handle": "E1", "type": "Birth", "date": {"year": 1900, "month": 4}}"#,
        )
        .unwrap();
        assert!(event.event_type.is_birth());
        assert_eq!(event.date, Date::new(1900, 4, 0));
    }

    #[test]
    fn names_yields_primary_first() {
        let mut person = Person::new("I1", Gender::Male).with_name("John", "Smith");
        person.alternate_names.push(Name::new("Johann", "Schmidt"));
        let names: Vec<String> = person.names().map(|n| n.to_string()).collect();
        assert_eq!(names, vec!["John Smith", "Johann Schmidt"]);
    }

    #[test]
    fn family_parents_skips_missing() {
        let mut family = Family::new("F1");
        family.mother = Some(Handle::from("I2"));
        assert_eq!(family.parents().collect::<Vec<_>>(), vec![&Handle::from("I2")]);
    }
}
