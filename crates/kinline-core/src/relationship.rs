//! Relationship labels between two people.
//!
//! [`KinshipCalculator`] finds the nearest common ancestor within a bounded
//! number of generations and names the relationship in English, e.g.
//! `"grandmother"`, `"nephew"`, `"2nd cousin 1 time removed"`.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::model::{Gender, Handle, Person};
use crate::storage::GenealogyStore;

/// Relationship labels offered for timeline expansion.
pub const RELATIVES: [&str; 8] = [
    "father", "mother", "brother", "sister", "wife", "husband", "son", "daughter",
];

/// Computes a single relationship label from `reference` to `person`.
pub trait RelationshipCalculator {
    /// Label describing what `person` is to `reference`, searching at most
    /// `depth` generations. Empty when unrelated within that depth.
    fn get_one_relationship(
        &self,
        store: &dyn GenealogyStore,
        reference: &Handle,
        person: &Handle,
        depth: u32,
    ) -> Result<String>;
}

/// Blood and marriage relationships through the nearest common ancestor.
#[derive(Debug, Clone, Copy, Default)]
pub struct KinshipCalculator;

impl KinshipCalculator {
    /// Every ancestor of `start` within `depth` generations, with the
    /// smallest generation distance at which it was reached. `start` is
    /// its own ancestor at distance 0.
    fn ancestors(
        store: &dyn GenealogyStore,
        start: &Handle,
        depth: u32,
    ) -> Result<BTreeMap<Handle, u32>> {
        let mut seen = BTreeMap::new();
        seen.insert(start.clone(), 0);
        let mut frontier = vec![start.clone()];

        for generation in 1..=depth {
            let mut next = Vec::new();
            for handle in &frontier {
                let person = store.person(handle)?;
                for family_handle in &person.parent_family_list {
                    let family = store.family(family_handle)?;
                    for parent in family.parents() {
                        if !seen.contains_key(parent) {
                            seen.insert(parent.clone(), generation);
                            next.push(parent.clone());
                        }
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            frontier = next;
        }
        Ok(seen)
    }

    fn spouse_label(
        store: &dyn GenealogyStore,
        reference: &Person,
        person: &Person,
    ) -> Result<Option<&'static str>> {
        for family_handle in &reference.family_list {
            let family = store.family(family_handle)?;
            let married = family.parents().any(|p| *p == person.handle)
                && family.parents().any(|p| *p == reference.handle);
            if married {
                return Ok(Some(gendered(person.gender, "husband", "wife", "spouse")));
            }
        }
        Ok(None)
    }
}

fn gendered(gender: Gender, male: &'static str, female: &'static str, neutral: &'static str) -> &'static str {
    match gender {
        Gender::Male => male,
        Gender::Female => female,
        Gender::Unknown => neutral,
    }
}

fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// `""`, `"grand"`, `"great-grand"`, `"2nd great-grand"`, ... for a
/// distance of `generations` (at least 1).
fn grand_prefix(generations: u32) -> String {
    match generations {
        0 | 1 => String::new(),
        2 => "grand".to_string(),
        3 => "great-grand".to_string(),
        n => format!("{} great-grand", ordinal(n - 2)),
    }
}

fn join_prefix(prefix: &str, noun: &str) -> String {
    format!("{prefix}{noun}")
}

/// Label for `person` given the generation distances from the reference
/// (`ga`) and from `person` (`gb`) to their common ancestor.
fn blood_label(gender: Gender, ga: u32, gb: u32) -> String {
    match (ga, gb) {
        (0, 0) => String::new(),
        (g, 0) => join_prefix(&grand_prefix(g), gendered(gender, "father", "mother", "parent")),
        (0, g) => join_prefix(&grand_prefix(g), gendered(gender, "son", "daughter", "child")),
        (1, 1) => gendered(gender, "brother", "sister", "sibling").to_string(),
        (1, g) => join_prefix(
            &grand_prefix(g - 1),
            gendered(gender, "nephew", "niece", "nephew or niece"),
        ),
        (g, 1) => join_prefix(
            &grand_prefix(g - 1),
            gendered(gender, "uncle", "aunt", "uncle or aunt"),
        ),
        (ga, gb) => {
            let degree = ga.min(gb) - 1;
            let removed = ga.abs_diff(gb);
            match removed {
                0 => format!("{} cousin", ordinal(degree)),
                1 => format!("{} cousin 1 time removed", ordinal(degree)),
                r => format!("{} cousin {r} times removed", ordinal(degree)),
            }
        }
    }
}

impl RelationshipCalculator for KinshipCalculator {
    fn get_one_relationship(
        &self,
        store: &dyn GenealogyStore,
        reference: &Handle,
        person: &Handle,
        depth: u32,
    ) -> Result<String> {
        if reference == person {
            return Ok(String::new());
        }
        let reference_person = store.person(reference)?;
        let other = store.person(person)?;

        if let Some(label) = Self::spouse_label(store, &reference_person, &other)? {
            return Ok(label.to_string());
        }

        let from_reference = Self::ancestors(store, reference, depth)?;
        let from_person = Self::ancestors(store, person, depth)?;

        let nearest = from_reference
            .iter()
            .filter_map(|(handle, ga)| from_person.get(handle).map(|gb| (*ga, *gb)))
            .min_by_key(|(ga, gb)| (ga + gb, *ga));

        let label = nearest
            .map(|(ga, gb)| blood_label(other.gender, ga, gb))
            .unwrap_or_default();
        tracing::trace!(%reference, %person, %label, "relationship");
        Ok(label)
    }
}
