//! Sort keys for dated and undated events.
//!
//! Dated events sort by their Julian day number. Undated events get a
//! synthetic key: one past the key of the event before them in the list,
//! so they keep the position the user gave them. An undated marriage is
//! placed just before the first child's birth and an undated divorce just
//! after the last child's birth, when those are known.

use super::item::KeyedEvent;
use crate::error::Result;
use crate::model::{Event, Family};
use crate::storage::GenealogyStore;

/// Assign a sort key to every event, synthesizing keys for undated ones.
///
/// `family` is the family owning the events, used to place undated
/// marriages and divorces relative to the children's births.
///
/// # Errors
/// Returns an error if a child or child event lookup fails.
pub fn prepare_event_sortvals(
    store: &dyn GenealogyStore,
    events: Vec<Event>,
    family: Option<&Family>,
) -> Result<Vec<KeyedEvent>> {
    let mut lastval = 0;
    if events.first().is_some_and(|e| e.date.sortval() == 0) {
        if let Some((index, event)) = events
            .iter()
            .enumerate()
            .find(|(_, e)| e.date.sortval() != 0)
        {
            // Undated events ahead of the first dated one count up to it.
            lastval = event.date.sortval() - index as i64;
        }
    }

    let mut keyed = Vec::with_capacity(events.len());
    for event in events {
        let mut sortval = event.date.sortval();
        if sortval == 0 {
            if let Some(family) = family {
                if event.event_type.is_marriage() {
                    sortval = union_event_sortval(store, family, true)?;
                }
                if event.event_type.is_divorce() {
                    sortval = union_event_sortval(store, family, false)?;
                }
            }
            if sortval == 0 {
                sortval = lastval + 1;
            }
            tracing::trace!(event = %event.handle, sortval, "synthetic sort key");
        }
        lastval = sortval;
        keyed.push(KeyedEvent {
            sort_key: sortval,
            event,
        });
    }
    Ok(keyed)
}

/// Key for an undated union (first child's birth − 1) or dissolution (last
/// child's birth + 1). `0` when there is no child or no dated birth.
fn union_event_sortval(store: &dyn GenealogyStore, family: &Family, union: bool) -> Result<i64> {
    let child_ref = if union {
        family.child_refs.first()
    } else {
        family.child_refs.last()
    };
    let Some(child_ref) = child_ref else {
        return Ok(0);
    };

    let child = store.person(&child_ref.child)?;
    let mut birth = None;
    for handle in &child.event_refs {
        let event = store.event(handle)?;
        if event.event_type.is_birth() || event.event_type.is_birth_fallback() {
            birth = Some(event);
            break;
        }
    }

    let sortval = birth.map(|b| b.date.sortval()).unwrap_or(0);
    if sortval == 0 {
        return Ok(0);
    }
    Ok(if union { sortval - 1 } else { sortval + 1 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::Date;
    use crate::event_type::EventType;
    use crate::model::{ChildRef, Gender, Person};
    use crate::storage::MemoryStore;

    fn keys(keyed: &[KeyedEvent]) -> Vec<i64> {
        keyed.iter().map(|k| k.sort_key).collect()
    }

    #[test]
    fn leading_undated_events_count_up_to_first_dated() {
        let store = MemoryStore::new();
        let dated = Date::new(1900, 1, 10);
        let events = vec![
            Event::new("E1", EventType::Occupation, Date::empty()),
            Event::new("E2", EventType::Residence, Date::empty()),
            Event::new("E3", EventType::Census, dated),
            Event::new("E4", EventType::Will, Date::empty()),
        ];
        let keyed = prepare_event_sortvals(&store, events, None).unwrap();
        let base = dated.sortval();
        assert_eq!(keys(&keyed), vec![base - 1, base, base, base + 1]);
    }

    #[test]
    fn all_undated_events_count_from_one() {
        let store = MemoryStore::new();
        let events = vec![
            Event::new("E1", EventType::Occupation, Date::empty()),
            Event::new("E2", EventType::Residence, Date::empty()),
        ];
        let keyed = prepare_event_sortvals(&store, events, None).unwrap();
        assert_eq!(keys(&keyed), vec![1, 2]);
    }

    fn family_with_children(store: &mut MemoryStore) -> Family {
        let births = [("C1", Date::new(1902, 3, 1)), ("C2", Date::new(1908, 6, 1))];
        let mut family = Family::new("F1");
        for (i, (handle, date)) in births.into_iter().enumerate() {
            let event_handle = format!("B{i}");
            let mut child = Person::new(handle, Gender::Unknown);
            child.event_refs.push(event_handle.as_str().into());
            store
                .insert_person(child)
                .insert_event(Event::new(event_handle.as_str(), EventType::Birth, date));
            family.child_refs.push(ChildRef::new(handle));
        }
        family
    }

    #[test]
    fn undated_marriage_precedes_first_child() {
        let mut store = MemoryStore::new();
        let family = family_with_children(&mut store);
        let events = vec![
            Event::new("M", EventType::Marriage, Date::empty()),
            Event::new("D", EventType::Divorce, Date::empty()),
        ];
        let keyed = prepare_event_sortvals(&store, events, Some(&family)).unwrap();
        assert_eq!(
            keys(&keyed),
            vec![
                Date::new(1902, 3, 1).sortval() - 1,
                Date::new(1908, 6, 1).sortval() + 1
            ]
        );
    }

    #[test]
    fn childless_marriage_falls_back_to_counter() {
        let store = MemoryStore::new();
        let family = Family::new("F1");
        let dated = Date::new(1890, 1, 1);
        let events = vec![
            Event::new("E1", EventType::Engagement, dated),
            Event::new("M", EventType::Marriage, Date::empty()),
        ];
        let keyed = prepare_event_sortvals(&store, events, Some(&family)).unwrap();
        assert_eq!(keys(&keyed), vec![dated.sortval(), dated.sortval() + 1]);
    }
}
