// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deciding whether a candidate value is the committed value.

use alloc::rc::Rc;
use core::fmt;

use crate::Value;

type Comparator<V> = Rc<dyn Fn(&V, &V) -> bool>;

enum Strategy<V> {
    Equal,
    Key(Comparator<V>),
    Custom(Comparator<V>),
}

/// Equality strategy between option values and the committed value.
///
/// - [`By::equal`] (the default) uses `PartialEq`. Two values that differ in
///   any field are different, even if they share an id.
/// - [`By::key`] compares a projection of each value, typically an id field.
/// - [`By::custom`] hands both values to an application comparator.
///
/// Comparisons happen between `Option<&V>` because a single-select combobox
/// may have no value. Whenever either side is absent the strategy is not
/// consulted and plain presence decides: two absent values are equal, an
/// absent and a present value are not.
///
/// Application comparators are trusted; if one panics, the panic propagates.
///
/// ```rust
/// use thicket_combobox::By;
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Person {
///     id: u32,
///     name: &'static str,
/// }
///
/// let bob = Person { id: 2, name: "Bob" };
/// let fresh = Person { id: 2, name: "bob" };
///
/// assert!(!By::equal().compare(Some(&bob), Some(&fresh)));
/// assert!(By::key(|p: &Person| p.id).compare(Some(&bob), Some(&fresh)));
/// assert!(By::key(|p: &Person| p.id).compare(None, None));
/// ```
pub struct By<V> {
    strategy: Strategy<V>,
}

impl<V> Clone for By<V> {
    fn clone(&self) -> Self {
        let strategy = match &self.strategy {
            Strategy::Equal => Strategy::Equal,
            Strategy::Key(f) => Strategy::Key(Rc::clone(f)),
            Strategy::Custom(f) => Strategy::Custom(Rc::clone(f)),
        };
        Self { strategy }
    }
}

impl<V> fmt::Debug for By<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.strategy {
            Strategy::Equal => "equal",
            Strategy::Key(_) => "key",
            Strategy::Custom(_) => "custom",
        };
        f.debug_tuple("By").field(&name).finish()
    }
}

impl<V: PartialEq> Default for By<V> {
    fn default() -> Self {
        Self::equal()
    }
}

impl<V: PartialEq> By<V> {
    /// Compare with `PartialEq`.
    pub fn equal() -> Self {
        Self {
            strategy: Strategy::Equal,
        }
    }

    /// Compare the keys extracted by `key`.
    pub fn key<K, F>(key: F) -> Self
    where
        K: PartialEq,
        F: Fn(&V) -> K + 'static,
    {
        Self {
            strategy: Strategy::Key(Rc::new(move |a: &V, z: &V| key(a) == key(z))),
        }
    }

    /// Compare with an application-supplied function.
    pub fn custom<F>(compare: F) -> Self
    where
        F: Fn(&V, &V) -> bool + 'static,
    {
        Self {
            strategy: Strategy::Custom(Rc::new(compare)),
        }
    }

    /// Whether `a` and `z` denote the same value.
    pub fn compare(&self, a: Option<&V>, z: Option<&V>) -> bool {
        let (Some(a), Some(z)) = (a, z) else {
            return a.is_none() && z.is_none();
        };
        match &self.strategy {
            Strategy::Equal => a == z,
            Strategy::Key(f) | Strategy::Custom(f) => f(a, z),
        }
    }

    /// Position of `candidate` in `values`, if it is a member.
    pub fn position(&self, values: &[V], candidate: &V) -> Option<usize> {
        values
            .iter()
            .position(|v| self.compare(Some(v), Some(candidate)))
    }

    /// Whether `candidate` is (or, for collections, is a member of) `value`.
    pub fn is_selected(&self, value: &Value<V>, candidate: &V) -> bool {
        match value {
            Value::Single(v) => self.compare(v.as_ref(), Some(candidate)),
            Value::Multiple(vs) => self.position(vs, candidate).is_some(),
        }
    }
}
