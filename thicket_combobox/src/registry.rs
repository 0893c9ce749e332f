// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The ordered set of options mounted under one combobox.
//!
//! Options can mount in any order (conditional rendering, async children,
//! keyed list reshuffles), but keyboard navigation has to follow what the user
//! sees. After every insertion the registry asks a [`DocumentOrder`] where
//! each option sits in the rendered output and re-sorts by that rank.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;

/// Identifier of a registered option.
///
/// Ids are handed out by [`Combobox::next_option_id`](crate::Combobox::next_option_id)
/// from a per-instance counter, so a larger id was allocated later.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OptionId(pub u64);

/// Application data for one option.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionData<V> {
    /// The value committed when this option is selected.
    pub value: V,
    /// Text matched by typeahead search.
    pub label: String,
    /// Whether the option can be activated or selected.
    pub disabled: bool,
    /// Element id of the rendered option. When `None`, the combobox derives
    /// one from its listbox id.
    pub dom_id: Option<String>,
}

impl<V> OptionData<V> {
    /// An enabled option with an empty label.
    pub fn new(value: V) -> Self {
        Self {
            value,
            label: String::new(),
            disabled: false,
            dom_id: None,
        }
    }

    /// Set the typeahead label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the disabled flag.
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the rendered element id.
    #[must_use]
    pub fn with_dom_id(mut self, dom_id: impl Into<String>) -> Self {
        self.dom_id = Some(dom_id.into());
        self
    }
}

/// A registered option.
#[derive(Clone, Debug)]
pub struct OptionEntry<V> {
    pub(crate) id: OptionId,
    pub(crate) dom_id: String,
    pub(crate) data: OptionData<V>,
}

impl<V> OptionEntry<V> {
    /// The option id.
    pub fn id(&self) -> OptionId {
        self.id
    }

    /// The rendered element id.
    pub fn dom_id(&self) -> &str {
        &self.dom_id
    }

    /// The option value.
    pub fn value(&self) -> &V {
        &self.data.value
    }

    /// The typeahead label.
    pub fn label(&self) -> &str {
        &self.data.label
    }

    /// Whether the option is disabled.
    pub fn is_disabled(&self) -> bool {
        self.data.disabled
    }
}

/// Where options sit in the rendered output.
///
/// Hosts implement this by scanning their rendered option elements in order.
/// Options the host does not know about yet rank after all known ones and keep
/// their relative registration order.
pub trait DocumentOrder {
    /// Rank of an option in rendered order, smaller first.
    fn rank(&self, id: OptionId) -> Option<usize>;
}

impl<F> DocumentOrder for F
where
    F: Fn(OptionId) -> Option<usize>,
{
    fn rank(&self, id: OptionId) -> Option<usize> {
        self(id)
    }
}

/// A [`DocumentOrder`] that knows nothing, leaving registration order intact.
#[derive(Copy, Clone, Debug, Default)]
pub struct RegistrationOrder;

impl DocumentOrder for RegistrationOrder {
    fn rank(&self, _id: OptionId) -> Option<usize> {
        None
    }
}

/// Ordered, duplicate-free list of options.
#[derive(Clone, Debug)]
pub(crate) struct Registry<V> {
    entries: Vec<OptionEntry<V>>,
    positions: HashMap<OptionId, usize>,
}

impl<V> Default for Registry<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }
}

impl<V> Registry<V> {
    /// Create an empty registry.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Insert an option, then restore rendered order.
    ///
    /// Registering an id that is already present replaces its data in place.
    pub(crate) fn register(
        &mut self,
        id: OptionId,
        dom_id: String,
        data: OptionData<V>,
        order: &dyn DocumentOrder,
    ) {
        match self.positions.get(&id) {
            Some(&index) => {
                let entry = &mut self.entries[index];
                entry.dom_id = dom_id;
                entry.data = data;
            }
            None => self.entries.push(OptionEntry { id, dom_id, data }),
        }
        self.sort(order);
    }

    /// Remove an option. Unknown ids are ignored.
    pub(crate) fn unregister(&mut self, id: OptionId) -> Option<OptionEntry<V>> {
        let index = self.positions.get(&id).copied()?;
        let entry = self.entries.remove(index);
        self.reindex();
        Some(entry)
    }

    /// Re-query rendered order for every entry.
    pub(crate) fn sort(&mut self, order: &dyn DocumentOrder) {
        self.entries
            .sort_by_cached_key(|entry| order.rank(entry.id).unwrap_or(usize::MAX));
        self.reindex();
    }

    fn reindex(&mut self) {
        self.positions.clear();
        self.positions
            .extend(self.entries.iter().enumerate().map(|(i, e)| (e.id, i)));
    }

    /// Entries in rendered order.
    pub(crate) fn entries(&self) -> &[OptionEntry<V>] {
        &self.entries
    }

    /// Number of entries.
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Current index of an option.
    pub(crate) fn index_of(&self, id: OptionId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    /// Look up an option by id.
    pub(crate) fn get(&self, id: OptionId) -> Option<&OptionEntry<V>> {
        self.index_of(id).map(|i| &self.entries[i])
    }

    pub(crate) fn data_mut(&mut self, id: OptionId) -> Option<&mut OptionData<V>> {
        let index = self.index_of(id)?;
        Some(&mut self.entries[index].data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use core::cell::RefCell;

    fn data(n: u64) -> OptionData<u64> {
        OptionData::new(n).with_label(format!("option {n}"))
    }

    fn ids<V>(registry: &Registry<V>) -> Vec<u64> {
        registry.entries().iter().map(|e| e.id().0).collect()
    }

    #[test]
    fn registration_order_appends() {
        let mut registry = Registry::new();
        for n in [3, 1, 2] {
            registry.register(OptionId(n), format!("o{n}"), data(n), &RegistrationOrder);
        }
        assert_eq!(ids(&registry), [3, 1, 2]);
        assert_eq!(registry.index_of(OptionId(1)), Some(1));
    }

    #[test]
    fn document_order_wins_over_arrival_order() {
        // Rendered order is 1, 2, 3 but the options mount as 3, 1, 2.
        let rendered = [OptionId(1), OptionId(2), OptionId(3)];
        let order = |id: OptionId| rendered.iter().position(|r| *r == id);
        let mut registry = Registry::new();
        for n in [3, 1, 2] {
            registry.register(OptionId(n), format!("o{n}"), data(n), &order);
        }
        assert_eq!(ids(&registry), [1, 2, 3]);
        assert_eq!(registry.index_of(OptionId(3)), Some(2));
    }

    #[test]
    fn unknown_ranks_sort_last_and_stay_stable() {
        let order = |id: OptionId| (id.0 == 9).then_some(0);
        let mut registry = Registry::new();
        for n in [1, 2, 9] {
            registry.register(OptionId(n), format!("o{n}"), data(n), &order);
        }
        assert_eq!(ids(&registry), [9, 1, 2]);
    }

    #[test]
    fn duplicates_replace_in_place() {
        let mut registry = Registry::new();
        registry.register(OptionId(1), "a".into(), data(1), &RegistrationOrder);
        registry.register(OptionId(1), "b".into(), data(5), &RegistrationOrder);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(OptionId(1)).map(|e| *e.value()), Some(5));
        assert_eq!(registry.get(OptionId(1)).map(OptionEntry::dom_id), Some("b"));
    }

    #[test]
    fn unregister_is_idempotent() {
        let mut registry = Registry::new();
        registry.register(OptionId(1), "a".into(), data(1), &RegistrationOrder);
        registry.register(OptionId(2), "b".into(), data(2), &RegistrationOrder);
        assert!(registry.unregister(OptionId(1)).is_some());
        assert!(registry.unregister(OptionId(1)).is_none());
        assert_eq!(registry.index_of(OptionId(2)), Some(0));
    }

    #[test]
    fn resort_follows_moved_elements() {
        let rendered = RefCell::new(alloc::vec![OptionId(1), OptionId(2)]);
        let order = |id: OptionId| rendered.borrow().iter().position(|r| *r == id);
        let mut registry = Registry::new();
        registry.register(OptionId(1), "a".into(), data(1), &order);
        registry.register(OptionId(2), "b".into(), data(2), &order);
        rendered.borrow_mut().reverse();
        registry.sort(&order);
        assert_eq!(ids(&registry), [2, 1]);
    }
}
