// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A tab list with one panel per tab.
//!
//! Tabs are indexed in rendered order. Arrow keys along the list's
//! orientation move between enabled tabs and wrap at the ends; Home and End
//! jump to the first and last enabled tab. With [`Activation::Automatic`]
//! moving also selects, with [`Activation::Manual`] Enter or Space does.
//!
//! The selected index never rests on a disabled tab. A requested index that
//! is disabled resolves to the next enabled tab, or the previous one when
//! none follows; an index past the end resolves to the last enabled tab.

use alloc::string::String;
use alloc::vec::Vec;

use thicket_active::{Focus, SliceResolvers, calculate_active_index};
use thicket_aria::{Attr, IdSource, Key, KeyEvent, KeyOutcome, Orientation, Props, Role};

/// When keyboard focus selects a tab.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Activation {
    /// Moving focus selects.
    #[default]
    Automatic,
    /// Enter or Space selects the focused tab.
    Manual,
}

/// Per-instance configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TabsConfig {
    /// When keyboard focus selects.
    pub activation: Activation,
    /// Which arrow keys move between tabs.
    pub orientation: Orientation,
    /// Index selected until the user or host picks another.
    pub default_index: usize,
}

impl Default for TabsConfig {
    fn default() -> Self {
        Self {
            activation: Activation::Automatic,
            orientation: Orientation::Horizontal,
            default_index: 0,
        }
    }
}

impl TabsConfig {
    /// Set [`TabsConfig::activation`].
    #[must_use]
    pub fn with_activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }

    /// Set [`TabsConfig::orientation`].
    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set [`TabsConfig::default_index`].
    #[must_use]
    pub fn with_default_index(mut self, index: usize) -> Self {
        self.default_index = index;
        self
    }
}

/// Something the host has to act on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TabsEvent {
    /// The user selected the tab at this index.
    Change(usize),
    /// Move focus to the tab at this index.
    Focus(usize),
}

#[derive(Clone, Debug)]
struct Tab {
    tab_id: String,
    panel_id: String,
    disabled: bool,
}

/// Headless tabs state.
#[derive(Debug)]
pub struct Tabs {
    config: TabsConfig,
    tablist_id: String,
    tabs: Vec<Tab>,
    requested: usize,
    selected: Option<usize>,
    events: Vec<TabsEvent>,
}

impl Tabs {
    /// Create an empty tab list.
    pub fn new(config: TabsConfig, ids: &mut impl IdSource) -> Self {
        Self {
            requested: config.default_index,
            config,
            tablist_id: ids.next_id("tabs-list"),
            tabs: Vec::new(),
            selected: None,
            events: Vec::new(),
        }
    }

    /// Append a tab and its panel, returning the tab's index.
    pub fn add_tab(&mut self, disabled: bool, ids: &mut impl IdSource) -> usize {
        self.tabs.push(Tab {
            tab_id: ids.next_id("tabs-tab"),
            panel_id: ids.next_id("tabs-panel"),
            disabled,
        });
        self.resolve();
        self.tabs.len() - 1
    }

    /// Remove the tab at `index`. Out-of-range indices are ignored.
    pub fn remove_tab(&mut self, index: usize) {
        if index >= self.tabs.len() {
            return;
        }
        self.tabs.remove(index);
        if index < self.requested {
            self.requested -= 1;
        }
        self.resolve();
    }

    /// Change a tab's disabled flag.
    pub fn set_tab_disabled(&mut self, index: usize, disabled: bool) {
        if let Some(tab) = self.tabs.get_mut(index) {
            tab.disabled = disabled;
            self.resolve();
        }
    }

    /// Number of tabs.
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    /// Whether there are no tabs.
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Index of the selected tab; `None` when no tab is enabled.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Select a tab on behalf of a controlling host. Emits nothing.
    pub fn set_selected_index(&mut self, index: usize) {
        self.requested = index;
        self.resolve();
    }

    fn resolve(&mut self) {
        let enabled = |i: &usize| !self.tabs[*i].disabled;
        let len = self.tabs.len();
        let selected = if self.requested >= len {
            (0..len).rev().find(enabled)
        } else {
            (self.requested..len)
                .find(enabled)
                .or_else(|| (0..self.requested).rev().find(enabled))
        };
        if selected != self.selected {
            tracing::trace!(tablist = %self.tablist_id, ?selected, "selected tab resolved");
        }
        self.selected = selected;
    }

    fn select(&mut self, index: usize) {
        if self.tabs.get(index).is_none_or(|t| t.disabled) {
            return;
        }
        self.requested = index;
        if self.selected != Some(index) {
            self.selected = Some(index);
            self.events.push(TabsEvent::Change(index));
        }
    }

    fn step(&self, from: usize, focus: Focus<usize>) -> Option<usize> {
        let resolve = |focus: Focus<usize>, active: Option<usize>| {
            let resolvers =
                SliceResolvers::new(&self.tabs, active, |i, _: &Tab| i, |_, t: &Tab| t.disabled);
            calculate_active_index(focus, &resolvers)
        };
        let target = resolve(focus, Some(from));
        match focus {
            Focus::Next if target == Some(from) => resolve(Focus::First, None),
            Focus::Previous if target == Some(from) => resolve(Focus::Last, None),
            _ => target,
        }
    }

    /// Handle a click on a tab. Disabled tabs ignore clicks.
    pub fn tab_click(&mut self, index: usize) {
        self.select(index);
    }

    /// Handle a key press on the tab at `index`.
    pub fn tab_keydown(&mut self, index: usize, event: KeyEvent) -> KeyOutcome {
        if index >= self.tabs.len() || event.modifiers.is_command() {
            return KeyOutcome::Ignored;
        }
        let orientation = self.config.orientation;
        let focus = match event.key {
            key if key == orientation.next_key() => Focus::Next,
            key if key == orientation.previous_key() => Focus::Previous,
            Key::Home | Key::PageUp => Focus::First,
            Key::End | Key::PageDown => Focus::Last,
            Key::Enter | Key::Space if self.config.activation == Activation::Manual => {
                self.select(index);
                return KeyOutcome::Handled;
            }
            _ => return KeyOutcome::Ignored,
        };
        if let Some(target) = self.step(index, focus) {
            if target != index {
                self.events.push(TabsEvent::Focus(target));
            }
            if self.config.activation == Activation::Automatic {
                self.select(target);
            }
        }
        KeyOutcome::Handled
    }

    /// Take the events emitted since the last call.
    pub fn take_events(&mut self) -> Vec<TabsEvent> {
        core::mem::take(&mut self.events)
    }

    /// Attributes for the tab list.
    pub fn tablist_props(&self) -> Props {
        Props::new()
            .with(Attr::Id(self.tablist_id.clone()))
            .with(Attr::Role(Role::Tablist))
            .with(Attr::Orientation(self.config.orientation))
    }

    /// Attributes for the tab at `index`.
    pub fn tab_props(&self, index: usize) -> Option<Props> {
        let tab = self.tabs.get(index)?;
        let selected = self.selected == Some(index);
        Some(
            Props::new()
                .with(Attr::Id(tab.tab_id.clone()))
                .with(Attr::Role(Role::Tab))
                .with(Attr::Type("button"))
                .with(Attr::Selected(selected))
                .with(Attr::TabIndex(if selected { 0 } else { -1 }))
                .with(Attr::Controls(tab.panel_id.clone()))
                .with_opt(tab.disabled.then_some(Attr::Disabled(true))),
        )
    }

    /// Attributes for the panel of the tab at `index`.
    pub fn panel_props(&self, index: usize) -> Option<Props> {
        let tab = self.tabs.get(index)?;
        Some(
            Props::new()
                .with(Attr::Id(tab.panel_id.clone()))
                .with(Attr::Role(Role::Tabpanel))
                .with(Attr::LabelledBy(tab.tab_id.clone()))
                .with(Attr::TabIndex(0))
                .with_opt((self.selected != Some(index)).then_some(Attr::Hidden)),
        )
    }
}
