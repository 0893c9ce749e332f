// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thicket ARIA: plumbing shared by the Thicket widget state machines.
//!
//! None of the types here know about any particular widget. They describe
//! the pieces every accessible widget needs from its host:
//!
//! - [`IdSource`] / [`SequentialIds`]: fresh element ids following the
//!   `<namespace>-<component>-<n>` pattern, overridable for deterministic tests.
//! - [`Props`] / [`Attr`] / [`Role`]: ARIA attribute bags that widgets compute
//!   and hosts copy onto whatever element they render.
//! - [`Key`] / [`KeyEvent`] / [`Modifiers`] / [`KeyOutcome`] / [`Orientation`]: a small
//!   keyboard vocabulary so widget logic does not depend on a windowing crate.
//! - [`MissingAncestor`]: the error returned when a widget part is created
//!   without the parent state it belongs to.
//! - [`IdRegistry`]: ordered id sets behind `aria-labelledby` and
//!   `aria-describedby`.
//!
//! ```rust
//! use thicket_aria::{Attr, IdSource, Props, Role, SequentialIds};
//!
//! let mut ids = SequentialIds::new("app");
//! let button = ids.next_id("disclosure-button");
//! assert_eq!(button, "app-disclosure-button-1");
//!
//! let props = Props::new()
//!     .with(Attr::Id(button))
//!     .with(Attr::Role(Role::Button))
//!     .with(Attr::Expanded(false));
//! assert_eq!(props.value("aria-expanded").as_deref(), Some("false"));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod context;
mod id;
mod keyboard;
mod props;
mod registry;

pub use context::{MissingAncestor, require};
pub use id::{IdSource, SequentialIds};
pub use keyboard::{Key, KeyEvent, KeyOutcome, Modifiers, Orientation};
pub use props::{Attr, Props, Role};
pub use registry::IdRegistry;
