// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Committed combobox values.

use alloc::vec::Vec;

/// The value a combobox reflects: one optional value, or a collection.
///
/// The application owns the committed value. The combobox keeps a snapshot
/// and reports changes through [`ComboboxEvent::Change`](crate::ComboboxEvent::Change).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value<V> {
    /// Single-select mode. `None` means nothing is selected.
    Single(Option<V>),
    /// Multi-select mode, in toggle order.
    Multiple(Vec<V>),
}

impl<V> Default for Value<V> {
    fn default() -> Self {
        Self::Single(None)
    }
}

impl<V> Value<V> {
    /// A single selected value.
    pub fn single(value: V) -> Self {
        Self::Single(Some(value))
    }

    /// A collection of selected values.
    pub fn multiple(values: impl IntoIterator<Item = V>) -> Self {
        Self::Multiple(values.into_iter().collect())
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(v) => v.is_none(),
            Self::Multiple(vs) => vs.is_empty(),
        }
    }

    /// Whether this is a multi-select value.
    pub fn is_multiple(&self) -> bool {
        matches!(self, Self::Multiple(_))
    }

    /// The single selected value, if this is a single-select value.
    pub fn as_single(&self) -> Option<&V> {
        match self {
            Self::Single(v) => v.as_ref(),
            Self::Multiple(_) => None,
        }
    }

    /// All selected values, in order.
    pub fn iter(&self) -> impl Iterator<Item = &V> {
        let (single, many) = match self {
            Self::Single(v) => (v.as_ref(), &[][..]),
            Self::Multiple(vs) => (None, vs.as_slice()),
        };
        single.into_iter().chain(many)
    }

    /// Convert to the shape required by a combobox mode.
    ///
    /// A single value becomes a one-element collection; a collection keeps its
    /// first element when converted to single mode.
    pub fn into_mode(self, multiple: bool) -> Self {
        match (self, multiple) {
            (Self::Single(v), true) => Self::Multiple(v.into_iter().collect()),
            (Self::Multiple(vs), false) => Self::Single(vs.into_iter().next()),
            (value, _) => value,
        }
    }
}
