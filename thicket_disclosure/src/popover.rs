// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A floating panel anchored to a button.
//!
//! Unlike a [`Disclosure`](crate::Disclosure), a popover dismisses itself:
//!
//! - Escape closes it and sends focus back to the button.
//! - A pointer press outside both the button and the panel closes it and
//!   leaves focus wherever the press put it.
//! - Focus leaving both parts closes it.
//!
//! Outside presses are decided against the rectangles the host last reported
//! for the button and the panel, in whatever coordinate space it hit-tests in.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use thicket_aria::{Attr, IdRegistry, IdSource, Key, KeyEvent, KeyOutcome, Props};

use crate::{FocusTarget, Presence};

/// Per-instance configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PopoverConfig {
    /// Ignore every interaction.
    pub disabled: bool,
    /// Run host-finished enter/leave transitions on the panel.
    pub transitions: bool,
}

impl PopoverConfig {
    /// Set [`PopoverConfig::disabled`].
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set [`PopoverConfig::transitions`].
    #[must_use]
    pub fn with_transitions(mut self, transitions: bool) -> Self {
        self.transitions = transitions;
        self
    }
}

/// Something the host has to act on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PopoverEvent {
    /// The panel opened (`true`) or closed (`false`).
    Toggle(bool),
    /// Move focus.
    Focus(FocusTarget),
}

/// Element ids of the popover parts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PopoverIds {
    /// Button id.
    pub button: String,
    /// Panel id.
    pub panel: String,
}

/// Headless popover state.
#[derive(Debug)]
pub struct Popover {
    config: PopoverConfig,
    open: bool,
    ids: PopoverIds,
    presence: Presence,
    button_rect: Option<Rect>,
    panel_rect: Option<Rect>,
    descriptions: IdRegistry,
    events: Vec<PopoverEvent>,
}

impl Popover {
    /// Create a closed popover.
    pub fn new(config: PopoverConfig, ids: &mut impl IdSource) -> Self {
        let ids = PopoverIds {
            button: ids.next_id("popover-button"),
            panel: ids.next_id("popover-panel"),
        };
        Self {
            presence: Presence::new(false).with_transitions(config.transitions),
            config,
            open: false,
            ids,
            button_rect: None,
            panel_rect: None,
            descriptions: IdRegistry::new(),
            events: Vec::new(),
        }
    }

    /// Whether the panel is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Part element ids.
    pub fn ids(&self) -> &PopoverIds {
        &self.ids
    }

    /// Panel presence.
    pub fn presence(&self) -> &Presence {
        &self.presence
    }

    /// Enable or disable interaction.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.config.disabled = disabled;
    }

    fn set_open(&mut self, open: bool) -> bool {
        if self.config.disabled || self.open == open {
            return false;
        }
        tracing::trace!(panel = %self.ids.panel, open, "popover toggled");
        self.open = open;
        if open {
            self.presence.show();
        } else {
            self.presence.hide();
        }
        self.events.push(PopoverEvent::Toggle(open));
        true
    }

    /// Open the panel.
    pub fn open(&mut self) {
        self.set_open(true);
    }

    /// Close the panel without moving focus.
    pub fn close(&mut self) {
        self.set_open(false);
    }

    /// Flip the panel.
    pub fn toggle(&mut self) {
        self.set_open(!self.open);
    }

    /// Close the panel and move focus to `target`, or back to the button.
    pub fn close_with_focus(&mut self, target: Option<FocusTarget>) {
        if self.set_open(false) {
            self.events
                .push(PopoverEvent::Focus(target.unwrap_or(FocusTarget::Button)));
        }
    }

    /// Handle a click on the button.
    pub fn button_click(&mut self) {
        self.toggle();
    }

    /// Handle a key press on the button.
    pub fn button_keydown(&mut self, event: KeyEvent) -> KeyOutcome {
        if self.config.disabled {
            return KeyOutcome::Ignored;
        }
        match event.key {
            Key::Enter | Key::Space => {
                self.toggle();
                KeyOutcome::Handled
            }
            Key::Escape if self.open => {
                self.close_with_focus(None);
                KeyOutcome::Handled
            }
            _ => KeyOutcome::Ignored,
        }
    }

    /// Handle a key press inside the panel.
    pub fn panel_keydown(&mut self, event: KeyEvent) -> KeyOutcome {
        match event.key {
            Key::Escape if self.open && !self.config.disabled => {
                self.close_with_focus(None);
                KeyOutcome::Handled
            }
            _ => KeyOutcome::Ignored,
        }
    }

    /// Report where the button is, or `None` when it is not laid out.
    pub fn set_button_rect(&mut self, rect: Option<Rect>) {
        self.button_rect = rect;
    }

    /// Report where the panel is, or `None` when it is not laid out.
    pub fn set_panel_rect(&mut self, rect: Option<Rect>) {
        self.panel_rect = rect;
    }

    /// Whether `point` falls on the button or the panel.
    pub fn contains(&self, point: Point) -> bool {
        [self.button_rect, self.panel_rect]
            .into_iter()
            .flatten()
            .any(|rect| rect.contains(point))
    }

    /// Handle a pointer press anywhere in the window.
    ///
    /// Returns `true` if the press dismissed the popover.
    pub fn pointer_down(&mut self, point: Point) -> bool {
        if !self.open || self.contains(point) {
            return false;
        }
        tracing::trace!(x = point.x, y = point.y, "pointer down outside popover");
        self.set_open(false)
    }

    /// Handle focus moving somewhere other than the button or the panel.
    pub fn focus_leave(&mut self) {
        self.close();
    }

    /// Register a description of the panel and return its id.
    pub fn register_description(&mut self, ids: &mut impl IdSource) -> String {
        let id = ids.next_id("popover-description");
        self.descriptions.register(id.clone());
        id
    }

    /// Unregister a description.
    pub fn unregister_description(&mut self, id: &str) {
        self.descriptions.unregister(id);
    }

    /// The host's panel transition ended.
    pub fn transition_end(&mut self) {
        self.presence.finish();
    }

    /// Take the events emitted since the last call.
    pub fn take_events(&mut self) -> Vec<PopoverEvent> {
        core::mem::take(&mut self.events)
    }

    /// Attributes for the button.
    pub fn button_props(&self) -> Props {
        Props::new()
            .with(Attr::Id(self.ids.button.clone()))
            .with(Attr::Type("button"))
            .with(Attr::Expanded(self.open))
            .with_opt(self.open.then(|| Attr::Controls(self.ids.panel.clone())))
            .with_opt(self.config.disabled.then_some(Attr::Disabled(true)))
    }

    /// Attributes for the panel.
    pub fn panel_props(&self) -> Props {
        Props::new()
            .with(Attr::Id(self.ids.panel.clone()))
            .with(Attr::TabIndex(-1))
            .with_opt(self.descriptions.joined().map(Attr::DescribedBy))
            .with_opt((!self.presence.is_rendered()).then_some(Attr::Hidden))
    }
}
