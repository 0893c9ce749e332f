// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Options supplied as data instead of registered one by one.
//!
//! Long option lists are usually rendered through a windowing list that only
//! mounts the rows on screen. Those rows come and go with scrolling, so they
//! cannot be the source of truth for navigation. In virtual mode the combobox
//! navigates over the full option list it was given, and option ids are plain
//! indices into that list.

use alloc::borrow::Cow;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// The full option list for a virtual combobox.
pub struct VirtualOptions<V> {
    options: Vec<V>,
    disabled: Rc<dyn Fn(&V) -> bool>,
    label: Option<Rc<dyn Fn(&V) -> String>>,
}

impl<V> Clone for VirtualOptions<V>
where
    V: Clone,
{
    fn clone(&self) -> Self {
        Self {
            options: self.options.clone(),
            disabled: Rc::clone(&self.disabled),
            label: self.label.clone(),
        }
    }
}

impl<V> fmt::Debug for VirtualOptions<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualOptions")
            .field("len", &self.options.len())
            .field("label", &self.label.is_some())
            .finish_non_exhaustive()
    }
}

impl<V> VirtualOptions<V> {
    /// Options with every entry enabled and no typeahead labels.
    pub fn new(options: Vec<V>) -> Self {
        Self {
            options,
            disabled: Rc::new(|_: &V| false),
            label: None,
        }
    }

    /// Decide per value whether an option is disabled.
    #[must_use]
    pub fn with_disabled(mut self, disabled: impl Fn(&V) -> bool + 'static) -> Self {
        self.disabled = Rc::new(disabled);
        self
    }

    /// Provide typeahead labels.
    #[must_use]
    pub fn with_label(mut self, label: impl Fn(&V) -> String + 'static) -> Self {
        self.label = Some(Rc::new(label));
        self
    }

    /// The option values.
    pub fn options(&self) -> &[V] {
        &self.options
    }

    /// Replace the option values, for example after filtering.
    pub fn set_options(&mut self, options: Vec<V>) {
        self.options = options;
    }

    /// Number of options.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Whether there are no options.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Whether `value` is disabled.
    pub fn is_disabled(&self, value: &V) -> bool {
        (self.disabled)(value)
    }

    /// Typeahead label of `value`, if labels were provided.
    pub fn label<'a>(&self, value: &'a V) -> Option<Cow<'a, str>> {
        self.label.as_ref().map(|label| Cow::Owned(label(value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::vec;

    #[test]
    fn disabled_and_label_callbacks() {
        let options = VirtualOptions::new(vec![1_u32, 2, 3])
            .with_disabled(|v| *v == 2)
            .with_label(|v| format!("item {v}"));
        assert!(options.is_disabled(&2));
        assert!(!options.is_disabled(&3));
        assert_eq!(options.label(&3).as_deref(), Some("item 3"));
        assert_eq!(VirtualOptions::new(vec![1_u32]).label(&1), None);
    }
}
