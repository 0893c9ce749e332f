// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thicket Active: active-item navigation for list-like widgets.
//!
//! Listboxes, comboboxes, menus, and tab lists all keep track of one
//! "active" (highlighted) item inside an ordered list, some of whose entries
//! may be disabled. This crate computes where the highlight should move for a
//! given navigation intent:
//!
//! - **Navigation intents** ([`Focus`]) such as [`Focus::First`], [`Focus::Next`],
//!   or [`Focus::Specific`].
//! - A **read-only view of the list** ([`ActiveResolvers`]) that answers what
//!   the items are, which one is currently active, what each item's id is, and
//!   whether an item is disabled.
//! - A single pure function, [`calculate_active_index`], that combines the two.
//!
//! Navigation never wraps around. When no enabled item exists in the requested
//! direction the previous active index is returned unchanged, so pressing
//! "down" on the last item is a no-op rather than a jump to the top.
//!
//! ## Minimal example
//!
//! ```rust
//! use thicket_active::{Focus, SliceResolvers, calculate_active_index};
//!
//! // (id, disabled)
//! let items = [(10_u32, false), (11, true), (12, false)];
//! let resolvers = SliceResolvers::new(&items, Some(0), |_, i| i.0, |_, i| i.1);
//!
//! // Next skips the disabled item 11.
//! assert_eq!(calculate_active_index(Focus::Next, &resolvers), Some(2));
//!
//! // From the last enabled item, Next stays put.
//! let resolvers = SliceResolvers::new(&items, Some(2), |_, i| i.0, |_, i| i.1);
//! assert_eq!(calculate_active_index(Focus::Next, &resolvers), Some(2));
//! ```
//!
//! The function keeps no state. Callers own the active index and decide what
//! to do when the result equals the current value (typically nothing).
//!
//! This crate is `no_std`.

#![no_std]

/// A navigation intent for the active item.
///
/// `Id` is the caller's item identifier, used only by [`Focus::Specific`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Focus<Id> {
    /// The first enabled item.
    First,
    /// The nearest enabled item before the active one.
    ///
    /// With no active item this behaves like [`Focus::Last`].
    Previous,
    /// The nearest enabled item after the active one.
    ///
    /// With no active item this behaves like [`Focus::First`].
    Next,
    /// The last enabled item.
    Last,
    /// The item whose id matches exactly.
    ///
    /// Disabled state is not consulted here; callers that must not activate
    /// disabled items check before asking.
    Specific(Id),
    /// Clear the active item.
    Nothing,
}

/// Read-only view of an ordered item list for [`calculate_active_index`].
pub trait ActiveResolvers {
    /// Item type stored in the list.
    type Item;
    /// Identifier type compared by [`Focus::Specific`].
    type Id: PartialEq;

    /// Items in display order.
    fn items(&self) -> &[Self::Item];

    /// Index of the currently active item, if any.
    fn active_index(&self) -> Option<usize>;

    /// Identifier of the item at `index`.
    fn id(&self, index: usize, item: &Self::Item) -> Self::Id;

    /// Whether the item at `index` is disabled.
    fn is_disabled(&self, index: usize, item: &Self::Item) -> bool;
}

/// Compute the index of the item that should become active for `focus`.
///
/// Returns:
/// - `None` for an empty list, whatever the intent;
/// - `None` for [`Focus::Nothing`];
/// - the index of the target item when one exists;
/// - otherwise the current active index unchanged.
///
/// Directional intents only ever land on enabled items. The unchanged
/// fallback may still point at a disabled item if the caller's own state did.
pub fn calculate_active_index<R>(focus: Focus<R::Id>, resolvers: &R) -> Option<usize>
where
    R: ActiveResolvers + ?Sized,
{
    let items = resolvers.items();
    if items.is_empty() {
        return None;
    }

    let current = resolvers.active_index();
    let enabled = |i: &usize| !resolvers.is_disabled(*i, &items[*i]);

    let found = match focus {
        Focus::First => (0..items.len()).find(enabled),
        Focus::Previous => {
            let upper = current.map_or(items.len(), |c| c.min(items.len()));
            (0..upper).rev().find(enabled)
        }
        Focus::Next => {
            let lower = current.map_or(0, |c| c + 1);
            (lower..items.len()).find(enabled)
        }
        Focus::Last => (0..items.len()).rev().find(enabled),
        Focus::Specific(id) => items
            .iter()
            .enumerate()
            .position(|(i, item)| resolvers.id(i, item) == id),
        Focus::Nothing => return None,
    };

    found.or(current)
}

/// An [`ActiveResolvers`] over a borrowed slice and two accessor closures.
///
/// Both closures receive the item's index along with the item. Handy for
/// hosts that keep their items in a plain `Vec` and do not want to implement
/// the trait by hand.
pub struct SliceResolvers<'a, T, I, D> {
    items: &'a [T],
    active: Option<usize>,
    id_of: I,
    disabled_of: D,
}

impl<T, I, D> core::fmt::Debug for SliceResolvers<'_, T, I, D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SliceResolvers")
            .field("len", &self.items.len())
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

impl<'a, T, Id, I, D> SliceResolvers<'a, T, I, D>
where
    Id: PartialEq,
    I: Fn(usize, &T) -> Id,
    D: Fn(usize, &T) -> bool,
{
    /// Wrap `items` with the current `active` index and item accessors.
    pub fn new(items: &'a [T], active: Option<usize>, id_of: I, disabled_of: D) -> Self {
        Self {
            items,
            active,
            id_of,
            disabled_of,
        }
    }
}

impl<T, Id, I, D> ActiveResolvers for SliceResolvers<'_, T, I, D>
where
    Id: PartialEq,
    I: Fn(usize, &T) -> Id,
    D: Fn(usize, &T) -> bool,
{
    type Item = T;
    type Id = Id;

    fn items(&self) -> &[T] {
        self.items
    }

    fn active_index(&self) -> Option<usize> {
        self.active
    }

    fn id(&self, index: usize, item: &T) -> Id {
        (self.id_of)(index, item)
    }

    fn is_disabled(&self, index: usize, item: &T) -> bool {
        (self.disabled_of)(index, item)
    }
}
