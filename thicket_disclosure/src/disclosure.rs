// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A button that shows and hides a panel.

use alloc::string::String;
use alloc::vec::Vec;

use thicket_aria::{Attr, IdSource, Key, KeyEvent, KeyOutcome, Props};

use crate::{FocusTarget, Presence};

/// Per-instance configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DisclosureConfig {
    /// Start open.
    pub default_open: bool,
    /// Ignore every interaction.
    pub disabled: bool,
    /// Run host-finished enter/leave transitions on the panel.
    pub transitions: bool,
}

impl DisclosureConfig {
    /// Set [`DisclosureConfig::default_open`].
    #[must_use]
    pub fn with_default_open(mut self, open: bool) -> Self {
        self.default_open = open;
        self
    }

    /// Set [`DisclosureConfig::disabled`].
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set [`DisclosureConfig::transitions`].
    #[must_use]
    pub fn with_transitions(mut self, transitions: bool) -> Self {
        self.transitions = transitions;
        self
    }
}

/// Something the host has to act on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DisclosureEvent {
    /// The panel opened (`true`) or closed (`false`).
    Toggle(bool),
    /// Move focus.
    Focus(FocusTarget),
}

/// Element ids of the disclosure parts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisclosureIds {
    /// Button id.
    pub button: String,
    /// Panel id.
    pub panel: String,
}

/// Headless disclosure state.
#[derive(Debug)]
pub struct Disclosure {
    config: DisclosureConfig,
    open: bool,
    ids: DisclosureIds,
    presence: Presence,
    events: Vec<DisclosureEvent>,
}

impl Disclosure {
    /// Create a disclosure, open if [`DisclosureConfig::default_open`] says so.
    pub fn new(config: DisclosureConfig, ids: &mut impl IdSource) -> Self {
        let ids = DisclosureIds {
            button: ids.next_id("disclosure-button"),
            panel: ids.next_id("disclosure-panel"),
        };
        Self {
            open: config.default_open,
            presence: Presence::new(config.default_open).with_transitions(config.transitions),
            config,
            ids,
            events: Vec::new(),
        }
    }

    /// Whether the panel is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Part element ids.
    pub fn ids(&self) -> &DisclosureIds {
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

    fn set_open(&mut self, open: bool) {
        if self.config.disabled || self.open == open {
            return;
        }
        tracing::trace!(panel = %self.ids.panel, open, "disclosure toggled");
        self.open = open;
        if open {
            self.presence.show();
        } else {
            self.presence.hide();
        }
        self.events.push(DisclosureEvent::Toggle(open));
    }

    /// Open the panel.
    pub fn open(&mut self) {
        self.set_open(true);
    }

    /// Close the panel.
    pub fn close(&mut self) {
        self.set_open(false);
    }

    /// Flip the panel.
    pub fn toggle(&mut self) {
        self.set_open(!self.open);
    }

    /// Close the panel and move focus to `target`, or back to the button.
    pub fn close_with_focus(&mut self, target: Option<FocusTarget>) {
        if self.config.disabled || !self.open {
            return;
        }
        self.close();
        self.events
            .push(DisclosureEvent::Focus(target.unwrap_or(FocusTarget::Button)));
    }

    /// Handle a click on the button.
    pub fn button_click(&mut self) {
        self.toggle();
    }

    /// Handle a key press on the button.
    pub fn button_keydown(&mut self, event: KeyEvent) -> KeyOutcome {
        match event.key {
            Key::Enter | Key::Space if !self.config.disabled => {
                self.toggle();
                KeyOutcome::Handled
            }
            _ => KeyOutcome::Ignored,
        }
    }

    /// The host's panel transition ended.
    pub fn transition_end(&mut self) {
        self.presence.finish();
    }

    /// Take the events emitted since the last call.
    pub fn take_events(&mut self) -> Vec<DisclosureEvent> {
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
            .with_opt((!self.presence.is_rendered()).then_some(Attr::Hidden))
    }
}
