// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Part handles for hosts with a component tree.
//!
//! Each part is created from its parent's shared [`ComboboxHandle`], as found
//! by walking up the host's tree. Creating a part with no parent in reach is
//! a host bug and fails with [`MissingAncestor`]. Parts that register with the
//! combobox undo that registration when dropped.

use alloc::rc::Rc;
use alloc::string::String;
use core::cell::RefCell;

use thicket_aria::{IdSource, KeyEvent, KeyOutcome, MissingAncestor, Props, require};

use crate::{Combobox, OptionData, OptionId, OptionState, Part};

/// Combobox state shared between its parts.
pub type ComboboxHandle<V> = Rc<RefCell<Combobox<V>>>;

const ANCESTOR: &str = "Combobox";

// Never a valid virtual position.
const DETACHED: OptionId = OptionId(u64::MAX);

fn parent<V>(
    handle: Option<&ComboboxHandle<V>>,
    part: &'static str,
) -> Result<ComboboxHandle<V>, MissingAncestor> {
    require(handle, part, ANCESTOR).map(Rc::clone)
}

/// The text input.
#[derive(Debug)]
pub struct ComboboxInput<V> {
    combobox: ComboboxHandle<V>,
}

impl<V: Clone + PartialEq + 'static> ComboboxInput<V> {
    /// Attach to the nearest combobox.
    pub fn new(combobox: Option<&ComboboxHandle<V>>) -> Result<Self, MissingAncestor> {
        Ok(Self {
            combobox: parent(combobox, "ComboboxInput")?,
        })
    }

    /// Attributes to render.
    pub fn props(&self) -> Props {
        self.combobox.borrow().input_props()
    }

    /// Text to render.
    pub fn text(&self) -> String {
        String::from(self.combobox.borrow().input_text())
    }

    /// Forward a key press.
    pub fn keydown(&self, event: KeyEvent) -> KeyOutcome {
        self.combobox.borrow_mut().input_keydown(event)
    }

    /// Forward a text edit.
    pub fn change(&self, text: impl Into<String>) {
        self.combobox.borrow_mut().input_change(text);
    }

    /// Forward a focus gain.
    pub fn focus(&self) {
        self.combobox.borrow_mut().input_focus();
    }

    /// Forward a focus loss.
    pub fn blur(&self, related: Option<Part>) {
        self.combobox.borrow_mut().input_blur(related);
    }
}

/// The toggle button.
#[derive(Debug)]
pub struct ComboboxButton<V> {
    combobox: ComboboxHandle<V>,
}

impl<V: Clone + PartialEq + 'static> ComboboxButton<V> {
    /// Attach to the nearest combobox.
    pub fn new(combobox: Option<&ComboboxHandle<V>>) -> Result<Self, MissingAncestor> {
        Ok(Self {
            combobox: parent(combobox, "ComboboxButton")?,
        })
    }

    /// Attributes to render.
    pub fn props(&self) -> Props {
        self.combobox.borrow().button_props()
    }

    /// Forward a key press.
    pub fn keydown(&self, event: KeyEvent) -> KeyOutcome {
        self.combobox.borrow_mut().button_keydown(event)
    }

    /// Forward a click.
    pub fn click(&self) {
        self.combobox.borrow_mut().button_click();
    }
}

/// The popup option list.
#[derive(Debug)]
pub struct ComboboxOptions<V> {
    combobox: ComboboxHandle<V>,
}

impl<V: Clone + PartialEq + 'static> ComboboxOptions<V> {
    /// Attach to the nearest combobox.
    pub fn new(combobox: Option<&ComboboxHandle<V>>) -> Result<Self, MissingAncestor> {
        Ok(Self {
            combobox: parent(combobox, "ComboboxOptions")?,
        })
    }

    /// Attributes to render.
    pub fn props(&self) -> Props {
        self.combobox.borrow().options_props()
    }

    /// Whether the list should be rendered at all.
    pub fn is_visible(&self) -> bool {
        self.combobox.borrow().is_open()
    }

    /// Forward a key press.
    pub fn keydown(&self, event: KeyEvent) -> KeyOutcome {
        self.combobox.borrow_mut().options_keydown(event)
    }
}

/// A label naming the combobox. Registered for `aria-labelledby` while alive.
#[derive(Debug)]
pub struct ComboboxLabel<V: Clone + PartialEq + 'static> {
    combobox: ComboboxHandle<V>,
    id: String,
}

impl<V: Clone + PartialEq + 'static> ComboboxLabel<V> {
    /// Attach to the nearest combobox and register.
    pub fn new(
        combobox: Option<&ComboboxHandle<V>>,
        ids: &mut impl IdSource,
    ) -> Result<Self, MissingAncestor> {
        let combobox = parent(combobox, "ComboboxLabel")?;
        let id = combobox.borrow_mut().register_label(ids);
        Ok(Self { combobox, id })
    }

    /// Element id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Attributes to render.
    pub fn props(&self) -> Props {
        self.combobox.borrow().label_props(&self.id)
    }
}

impl<V: Clone + PartialEq + 'static> Drop for ComboboxLabel<V> {
    fn drop(&mut self) {
        if let Ok(mut combobox) = self.combobox.try_borrow_mut() {
            combobox.unregister_label(&self.id);
        }
    }
}

/// One option. Registered with the combobox while alive.
#[derive(Debug)]
pub struct ComboboxOption<V: Clone + PartialEq + 'static> {
    combobox: ComboboxHandle<V>,
    id: OptionId,
}

impl<V: Clone + PartialEq + 'static> ComboboxOption<V> {
    /// Attach to the nearest combobox and register `data`.
    ///
    /// When `data` carries no element id one is drawn from `ids`.
    pub fn new(
        combobox: Option<&ComboboxHandle<V>>,
        mut data: OptionData<V>,
        ids: &mut impl IdSource,
    ) -> Result<Self, MissingAncestor> {
        let combobox = parent(combobox, "ComboboxOption")?;
        if combobox.borrow().is_virtual() {
            let index = combobox.borrow().virtual_position(&data.value);
            return Ok(match index {
                Some(index) => Self::row(combobox, index),
                None => {
                    tracing::warn!("option value is not in the virtual list");
                    Self { combobox, id: DETACHED }
                }
            });
        }
        if data.dom_id.is_none() {
            data.dom_id = Some(ids.next_id("combobox-option"));
        }
        let id = {
            let mut state = combobox.borrow_mut();
            let id = state.next_option_id();
            state.register_option(id, data);
            id
        };
        Ok(Self { combobox, id })
    }

    /// Attach to row `index` of a virtual combobox.
    ///
    /// Virtual rows are never registered, so `ids` are not needed.
    pub fn virtual_row(
        combobox: Option<&ComboboxHandle<V>>,
        index: usize,
    ) -> Result<Self, MissingAncestor> {
        let combobox = parent(combobox, "ComboboxOption")?;
        Ok(Self::row(combobox, index))
    }

    fn row(combobox: ComboboxHandle<V>, index: usize) -> Self {
        let id = u64::try_from(index).map_or(DETACHED, OptionId);
        Self { combobox, id }
    }

    /// Option id.
    pub fn id(&self) -> OptionId {
        self.id
    }

    /// Attributes to render, or `None` while not registered.
    pub fn props(&self) -> Option<Props> {
        self.combobox.borrow().option_props(self.id)
    }

    /// Render state, or `None` while not registered.
    pub fn state(&self) -> Option<OptionState> {
        self.combobox.borrow().option_state(self.id)
    }

    /// Replace the disabled flag.
    pub fn set_disabled(&self, disabled: bool) {
        self.combobox
            .borrow_mut()
            .set_option_disabled(self.id, disabled);
    }

    /// Forward a click.
    pub fn click(&self) {
        self.combobox.borrow_mut().option_click(self.id);
    }

    /// Forward a pointer move.
    pub fn pointer_move(&self) {
        self.combobox.borrow_mut().option_pointer_move(self.id);
    }

    /// Forward a pointer leave.
    pub fn pointer_leave(&self) {
        self.combobox.borrow_mut().option_pointer_leave(self.id);
    }
}

impl<V: Clone + PartialEq + 'static> Drop for ComboboxOption<V> {
    fn drop(&mut self) {
        match self.combobox.try_borrow_mut() {
            Ok(mut combobox) => combobox.unregister_option(self.id),
            Err(_) => tracing::debug!(id = ?self.id, "combobox busy, option left registered"),
        }
    }
}
