// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thicket Combobox: a headless combobox state machine.
//!
//! A combobox pairs a text input with a popup list of options. This crate
//! owns everything about it except rendering:
//!
//! - the open/closed state and the active (highlighted) option,
//! - an option registry kept in rendered order as options mount and unmount,
//! - selection in single or multiple mode with pluggable equality ([`By`]),
//! - typeahead search with a timeout,
//! - syncing the input text with the committed value,
//! - ARIA attributes for every part ([`Props`](thicket_aria::Props)).
//!
//! The host owns the committed value. The combobox reports changes as
//! [`ComboboxEvent::Change`] and the host writes the accepted value back with
//! [`Combobox::set_value`] (or simply leaves the snapshot as is, which is what
//! an uncontrolled combobox does).
//!
//! ## Minimal example
//!
//! ```rust
//! use thicket_aria::{Key, KeyOutcome, SequentialIds};
//! use thicket_combobox::{Combobox, ComboboxConfig, ComboboxEvent, OptionData, Value};
//!
//! let mut ids = SequentialIds::new("demo");
//! let mut cb = Combobox::new(ComboboxConfig::default(), Value::Single(None), &mut ids);
//!
//! for name in ["Alice", "Bob", "Charlie"] {
//!     let id = cb.next_option_id();
//!     cb.register_option(id, OptionData::new(name).with_label(name));
//! }
//!
//! // ArrowDown on the input opens the list and highlights the first option
//! // once the host has rendered it.
//! assert_eq!(cb.input_keydown(Key::ArrowDown.into()), KeyOutcome::Handled);
//! cb.run_deferred();
//! assert_eq!(cb.active_index(), Some(0));
//!
//! cb.input_keydown(Key::ArrowDown.into());
//! cb.input_keydown(Key::Enter.into());
//!
//! assert!(!cb.is_open());
//! assert_eq!(cb.value(), &Value::single("Bob"));
//! assert_eq!(cb.input_text(), "Bob");
//! assert_eq!(cb.take_events(), [ComboboxEvent::Change(Value::single("Bob"))]);
//! ```
//!
//! Hosts with a component tree build parts with the wrappers in this crate
//! ([`ComboboxInput`], [`ComboboxOption`], ...), which fail with
//! [`MissingAncestor`](thicket_aria::MissingAncestor) when created without a
//! combobox and unregister themselves when dropped.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod combobox;
mod equality;
mod input;
mod parts;
mod registry;
mod typeahead;
mod value;
mod virtual_options;

pub use combobox::{
    ActivationTrigger, Combobox, ComboboxConfig, ComboboxEvent, ComboboxIds, ComboboxState,
    DeferredTask, OptionState, Part,
};
pub use equality::By;
pub use input::{DisplayValue, InputText, display_text};
pub use parts::{
    ComboboxButton, ComboboxHandle, ComboboxInput, ComboboxLabel, ComboboxOption, ComboboxOptions,
};
pub use registry::{DocumentOrder, OptionData, OptionEntry, OptionId, RegistrationOrder};
pub use typeahead::{DEFAULT_SEARCH_TIMEOUT_MS, Typeahead, find_match, starts_with_ignore_case};
pub use value::Value;
pub use virtual_options::VirtualOptions;
