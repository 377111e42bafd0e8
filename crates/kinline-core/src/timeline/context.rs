//! Per-run traversal state.

use std::collections::{HashMap, HashSet};

use super::item::TimelineEntry;
use crate::date::{Date, DateRange};
use crate::model::Handle;

/// State accumulated by one timeline run.
///
/// Every `set_*` call on a [`Timeline`](super::Timeline) starts from a fresh
/// context. Callers composing their own run with `add_person`,
/// `add_relative` and `add_family` create one with
/// [`Timeline::new_context`](super::Timeline::new_context) and hand it back
/// through [`Timeline::finish`](super::Timeline::finish).
#[derive(Debug, Clone, Default)]
pub struct TraversalContext {
    pub(super) entries: Vec<TimelineEntry>,
    /// Visited people with their chosen birth date, if any.
    pub(super) people: HashMap<Handle, Option<Date>>,
    pub(super) events: HashSet<Handle>,
    pub(super) reference: Option<Handle>,
    pub(super) depth: u32,
    pub(super) start_key: Option<i64>,
    pub(super) end_key: Option<i64>,
}

fn bound(date: Option<Date>) -> Option<i64> {
    date.map(|d| d.sortval()).filter(|key| *key != 0)
}

impl TraversalContext {
    pub(super) fn new(range: &DateRange) -> Self {
        Self {
            start_key: bound(range.start),
            end_key: bound(range.end),
            ..Self::default()
        }
    }

    /// Set the person relatives are labeled against and the relationship
    /// search depth.
    pub fn set_reference(&mut self, reference: Handle, depth: u32) {
        self.reference = Some(reference);
        self.depth = depth;
    }

    pub fn reference(&self) -> Option<&Handle> {
        self.reference.as_ref()
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Inclusive sort-key bounds in effect for this run.
    pub fn bounds(&self) -> (Option<i64>, Option<i64>) {
        (self.start_key, self.end_key)
    }

    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    pub fn has_person(&self, handle: &Handle) -> bool {
        self.people.contains_key(handle)
    }

    pub fn has_event(&self, handle: &Handle) -> bool {
        self.events.contains(handle)
    }

    /// Record a visited person. Returns `false` if already visited.
    pub(super) fn visit(&mut self, handle: &Handle) -> bool {
        if self.people.contains_key(handle) {
            return false;
        }
        self.people.insert(handle.clone(), None);
        true
    }

    pub(super) fn record_birth(&mut self, handle: &Handle, birth: Option<Date>) {
        self.people.insert(handle.clone(), birth);
    }

    pub(super) fn derive_start(&mut self, date: Option<Date>) {
        if self.start_key.is_none() {
            self.start_key = bound(date);
        }
    }

    pub(super) fn derive_end_key(&mut self, key: Option<i64>) {
        if self.end_key.is_none() {
            self.end_key = key.filter(|k| *k != 0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_dates_give_no_bound() {
        let range = DateRange {
            start: Some(Date::empty()),
            end: Some(Date::new(1950, 12, 31)),
        };
        let ctx = TraversalContext::new(&range);
        assert_eq!(ctx.bounds(), (None, Some(Date::new(1950, 12, 31).sortval())));
    }

    #[test]
    fn derived_bounds_do_not_replace_configured_ones() {
        let range = DateRange {
            start: Some(Date::new(1900, 1, 1)),
            end: None,
        };
        let mut ctx = TraversalContext::new(&range);
        ctx.derive_start(Some(Date::new(1850, 1, 1)));
        ctx.derive_end_key(Some(42));
        assert_eq!(ctx.bounds(), (Some(Date::new(1900, 1, 1).sortval()), Some(42)));
    }

    #[test]
    fn visit_registers_once() {
        let mut ctx = TraversalContext::default();
        let handle = Handle::from("I1");
        assert!(ctx.visit(&handle));
        assert!(!ctx.visit(&handle));
        assert!(ctx.has_person(&handle));
    }
}
