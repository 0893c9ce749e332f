// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The combobox state machine.
//!
//! ## States
//!
//! A combobox is either [`ComboboxState::Closed`] (the initial state) or
//! [`ComboboxState::Open`]. Closing always clears the active option.
//!
//! ## Guards
//!
//! Requests that do not apply are ignored rather than reported: opening an
//! open combobox, navigating while closed, selecting an unknown option, or
//! anything at all while the combobox is disabled. Disabling an open
//! combobox does not close it.
//!
//! ## Selected option becomes active
//!
//! While open, the first option (in rendered order) whose value is selected
//! is made active whenever the combobox opens, the committed value is replaced
//! through [`Combobox::set_value`], or options mount or unmount in a way that
//! changes which option that is. Keyboard and pointer navigation in between
//! are left alone.
//!
//! ## Host responsibilities
//!
//! The host forwards events to the handlers (`input_*`, `button_*`,
//! `options_*`, `option_*`), renders with the computed props, and after each
//! pass:
//!
//! - calls [`Combobox::run_deferred`] once newly opened options have
//!   registered, and
//! - drains [`Combobox::take_events`] to apply value changes and focus moves.

use alloc::borrow::Cow;
use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use thicket_active::{Focus, SliceResolvers, calculate_active_index};
use thicket_aria::{
    Attr, IdRegistry, IdSource, Key, KeyEvent, KeyOutcome, Modifiers, Orientation, Props, Role,
};

use crate::input::{DisplayValue, InputText, display_text};
use crate::registry::{
    DocumentOrder, OptionData, OptionEntry, OptionId, Registry, RegistrationOrder,
};
use crate::typeahead::{DEFAULT_SEARCH_TIMEOUT_MS, Typeahead, find_match};
use crate::{By, Value, VirtualOptions};

/// Open/closed state of a combobox.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ComboboxState {
    /// The option list is shown.
    Open,
    /// The option list is hidden.
    #[default]
    Closed,
}

/// How the active option was last reached.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ActivationTrigger {
    /// Pointer hover.
    Pointer,
    /// Keyboard, typeahead, or the selected-option rule.
    #[default]
    Other,
}

/// A focusable part of the combobox.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Part {
    /// The text input.
    Input,
    /// The toggle button.
    Button,
    /// The option list.
    Options,
}

/// Something the host has to act on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ComboboxEvent<V> {
    /// The committed value changed.
    Change(Value<V>),
    /// The user edited the input text.
    QueryChange(String),
    /// Move focus to a part, without scrolling.
    Focus(Part),
}

/// Work that must wait until the host has rendered.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DeferredTask {
    /// Move the active option, unless a value has been committed by the time
    /// the task runs.
    HighlightIfEmpty(Focus<OptionId>),
}

bitflags::bitflags! {
    /// Render state of one option.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct OptionState: u8 {
        /// The option is highlighted.
        const ACTIVE = 1 << 0;
        /// The option's value is committed.
        const SELECTED = 1 << 1;
        /// The option cannot be activated or selected.
        const DISABLED = 1 << 2;
    }
}

/// Element ids of the combobox parts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComboboxIds {
    /// Text input id.
    pub input: String,
    /// Toggle button id.
    pub button: String,
    /// Option list id.
    pub options: String,
}

/// Per-instance configuration.
pub struct ComboboxConfig<V> {
    /// Ignore every interaction.
    pub disabled: bool,
    /// Toggle values in a collection instead of replacing a single value.
    pub multiple: bool,
    /// How option values are compared with the committed value.
    pub by: By<V>,
    /// Which arrow keys navigate.
    pub orientation: Orientation,
    /// Clearing the input text clears a single value.
    pub nullable: bool,
    /// Open when the input gains focus.
    pub immediate: bool,
    /// Formats the committed value for the input.
    pub display_value: Option<DisplayValue<V>>,
    /// Navigate over this list instead of registered options.
    pub virtual_options: Option<VirtualOptions<V>>,
    /// Rendered order of registered options.
    pub document_order: Rc<dyn DocumentOrder>,
    /// Typeahead reset pause in milliseconds.
    pub search_timeout: u64,
}

impl<V: PartialEq> Default for ComboboxConfig<V> {
    fn default() -> Self {
        Self {
            disabled: false,
            multiple: false,
            by: By::default(),
            orientation: Orientation::Vertical,
            nullable: false,
            immediate: false,
            display_value: None,
            virtual_options: None,
            document_order: Rc::new(RegistrationOrder),
            search_timeout: DEFAULT_SEARCH_TIMEOUT_MS,
        }
    }
}

impl<V> fmt::Debug for ComboboxConfig<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComboboxConfig")
            .field("disabled", &self.disabled)
            .field("multiple", &self.multiple)
            .field("by", &self.by)
            .field("orientation", &self.orientation)
            .field("nullable", &self.nullable)
            .field("immediate", &self.immediate)
            .field("display_value", &self.display_value.is_some())
            .field("virtual_options", &self.virtual_options)
            .field("search_timeout", &self.search_timeout)
            .finish_non_exhaustive()
    }
}

impl<V: PartialEq> ComboboxConfig<V> {
    /// Set [`ComboboxConfig::disabled`].
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set [`ComboboxConfig::multiple`].
    #[must_use]
    pub fn with_multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    /// Set [`ComboboxConfig::by`].
    #[must_use]
    pub fn with_by(mut self, by: By<V>) -> Self {
        self.by = by;
        self
    }

    /// Set [`ComboboxConfig::orientation`].
    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set [`ComboboxConfig::nullable`].
    #[must_use]
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Set [`ComboboxConfig::immediate`].
    #[must_use]
    pub fn with_immediate(mut self, immediate: bool) -> Self {
        self.immediate = immediate;
        self
    }

    /// Set [`ComboboxConfig::display_value`].
    #[must_use]
    pub fn with_display_value(mut self, display: impl Fn(&Value<V>) -> String + 'static) -> Self {
        self.display_value = Some(Rc::new(display));
        self
    }

    /// Set [`ComboboxConfig::virtual_options`].
    #[must_use]
    pub fn with_virtual(mut self, options: VirtualOptions<V>) -> Self {
        self.virtual_options = Some(options);
        self
    }

    /// Set [`ComboboxConfig::document_order`].
    #[must_use]
    pub fn with_document_order(mut self, order: impl DocumentOrder + 'static) -> Self {
        self.document_order = Rc::new(order);
        self
    }

    /// Set [`ComboboxConfig::search_timeout`].
    #[must_use]
    pub fn with_search_timeout(mut self, timeout: u64) -> Self {
        self.search_timeout = timeout;
        self
    }
}

/// Headless combobox state.
///
/// `V` is the application's option value type.
#[derive(Debug)]
pub struct Combobox<V> {
    config: ComboboxConfig<V>,
    state: ComboboxState,
    active: Option<usize>,
    trigger: ActivationTrigger,
    registry: Registry<V>,
    value: Value<V>,
    typeahead: Typeahead,
    input: InputText,
    ids: ComboboxIds,
    labels: IdRegistry,
    next_option: u64,
    events: Vec<ComboboxEvent<V>>,
    deferred: Vec<DeferredTask>,
}

impl<V> Combobox<V>
where
    V: Clone + PartialEq + 'static,
{
    /// Create a closed combobox reflecting `value`.
    ///
    /// Part ids are drawn from `ids`. The value is converted to the shape
    /// [`ComboboxConfig::multiple`] asks for, and the input text is synced.
    pub fn new(config: ComboboxConfig<V>, value: Value<V>, ids: &mut impl IdSource) -> Self {
        let ids = ComboboxIds {
            input: ids.next_id("combobox-input"),
            button: ids.next_id("combobox-button"),
            options: ids.next_id("combobox-options"),
        };
        let mut combobox = Self {
            value: value.into_mode(config.multiple),
            typeahead: Typeahead::new(config.search_timeout),
            config,
            state: ComboboxState::Closed,
            active: None,
            trigger: ActivationTrigger::Other,
            registry: Registry::new(),
            input: InputText::default(),
            ids,
            labels: IdRegistry::new(),
            next_option: 0,
            events: Vec::new(),
            deferred: Vec::new(),
        };
        combobox.sync_input();
        combobox
    }

    // -- Queries ---------------------------------------------------------

    /// Current open/closed state.
    pub fn state(&self) -> ComboboxState {
        self.state
    }

    /// Whether the option list is shown.
    pub fn is_open(&self) -> bool {
        self.state == ComboboxState::Open
    }

    /// Whether interaction is disabled.
    pub fn is_disabled(&self) -> bool {
        self.config.disabled
    }

    /// The configuration.
    pub fn config(&self) -> &ComboboxConfig<V> {
        &self.config
    }

    /// Index of the active option in rendered order.
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// Id of the active option.
    pub fn active_option(&self) -> Option<OptionId> {
        self.active.and_then(|i| self.id_at(i))
    }

    /// How the active option was reached.
    pub fn activation_trigger(&self) -> ActivationTrigger {
        self.trigger
    }

    /// The committed value snapshot.
    pub fn value(&self) -> &Value<V> {
        &self.value
    }

    /// Registered options in rendered order. Empty in virtual mode.
    pub fn options(&self) -> &[OptionEntry<V>] {
        self.registry.entries()
    }

    /// Look up a registered option.
    pub fn option(&self, id: OptionId) -> Option<&OptionEntry<V>> {
        self.registry.get(id)
    }

    /// Number of navigable options, registered or virtual.
    pub fn option_count(&self) -> usize {
        match &self.config.virtual_options {
            Some(options) => options.len(),
            None => self.registry.len(),
        }
    }

    /// Current index of an option.
    pub fn option_index(&self, id: OptionId) -> Option<usize> {
        match &self.config.virtual_options {
            Some(options) => usize::try_from(id.0).ok().filter(|&i| i < options.len()),
            None => self.registry.index_of(id),
        }
    }

    /// Whether options come from a [`VirtualOptions`] list.
    pub fn is_virtual(&self) -> bool {
        self.config.virtual_options.is_some()
    }

    /// Part element ids.
    pub fn ids(&self) -> &ComboboxIds {
        &self.ids
    }

    /// The text input state.
    pub fn input(&self) -> &InputText {
        &self.input
    }

    /// The text currently in the input.
    pub fn input_text(&self) -> &str {
        self.input.text()
    }

    /// The pending typeahead query.
    pub fn search_query(&self) -> Option<&str> {
        self.typeahead.query()
    }

    /// Tasks waiting for [`Combobox::run_deferred`].
    pub fn pending_tasks(&self) -> &[DeferredTask] {
        &self.deferred
    }

    /// Whether an option's value is committed.
    pub fn is_selected(&self, id: OptionId) -> bool {
        self.option_index(id)
            .and_then(|i| self.value_at(i))
            .is_some_and(|v| self.config.by.is_selected(&self.value, v))
    }

    /// Render state of an option, or `None` for unknown ids.
    pub fn option_state(&self, id: OptionId) -> Option<OptionState> {
        let index = self.option_index(id)?;
        let mut state = OptionState::empty();
        state.set(OptionState::ACTIVE, self.active == Some(index));
        state.set(OptionState::SELECTED, self.is_selected(id));
        state.set(OptionState::DISABLED, self.disabled_at(index));
        Some(state)
    }

    // -- Option source ---------------------------------------------------

    /// Position of `value` in the virtual list, by the configured equality.
    pub(crate) fn virtual_position(&self, value: &V) -> Option<usize> {
        let options = self.config.virtual_options.as_ref()?;
        options
            .options()
            .iter()
            .position(|v| self.config.by.compare(Some(v), Some(value)))
    }

    fn value_at(&self, index: usize) -> Option<&V> {
        match &self.config.virtual_options {
            Some(options) => options.options().get(index),
            None => self.registry.entries().get(index).map(OptionEntry::value),
        }
    }

    fn disabled_at(&self, index: usize) -> bool {
        match &self.config.virtual_options {
            Some(options) => options
                .options()
                .get(index)
                .is_none_or(|v| options.is_disabled(v)),
            None => self
                .registry
                .entries()
                .get(index)
                .is_none_or(OptionEntry::is_disabled),
        }
    }

    fn id_at(&self, index: usize) -> Option<OptionId> {
        match &self.config.virtual_options {
            Some(options) => (index < options.len()).then_some(OptionId(index as u64)),
            None => self.registry.entries().get(index).map(OptionEntry::id),
        }
    }

    fn dom_id_at(&self, index: usize) -> Option<String> {
        match &self.config.virtual_options {
            Some(options) => {
                (index < options.len()).then(|| format!("{}-option-{index}", self.ids.options))
            }
            None => self
                .registry
                .entries()
                .get(index)
                .map(|e| String::from(e.dom_id())),
        }
    }

    fn calculate(&self, focus: Focus<OptionId>) -> Option<usize> {
        match &self.config.virtual_options {
            Some(options) => calculate_active_index(
                focus,
                &SliceResolvers::new(
                    options.options(),
                    self.active,
                    |i, _: &V| OptionId(i as u64),
                    |_, v: &V| options.is_disabled(v),
                ),
            ),
            None => calculate_active_index(
                focus,
                &SliceResolvers::new(
                    self.registry.entries(),
                    self.active,
                    |_, e: &OptionEntry<V>| e.id(),
                    |_, e: &OptionEntry<V>| e.is_disabled(),
                ),
            ),
        }
    }

    fn first_selected_index(&self) -> Option<usize> {
        if self.value.is_empty() {
            return None;
        }
        (0..self.option_count()).find(|&i| {
            !self.disabled_at(i)
                && self
                    .value_at(i)
                    .is_some_and(|v| self.config.by.is_selected(&self.value, v))
        })
    }

    fn restore_selected_active(&mut self) {
        if !self.is_open() {
            return;
        }
        if let Some(index) = self.first_selected_index() {
            if self.active != Some(index) {
                tracing::trace!(index, "selected option became active");
                self.active = Some(index);
                self.trigger = ActivationTrigger::Other;
            }
        }
    }

    fn sync_input(&mut self) {
        if let Some(text) = display_text(&self.value, self.config.display_value.as_ref()) {
            self.input.sync(text);
        }
    }

    // -- Transitions -----------------------------------------------------

    /// Enable or disable interaction. An open combobox stays open.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.config.disabled = disabled;
    }

    /// Replace the committed value snapshot, as a controlling host does.
    ///
    /// Does not emit [`ComboboxEvent::Change`].
    pub fn set_value(&mut self, value: Value<V>) {
        self.value = value.into_mode(self.config.multiple);
        self.sync_input();
        self.restore_selected_active();
    }

    /// Open the option list.
    pub fn open(&mut self) {
        if self.config.disabled || self.is_open() {
            return;
        }
        tracing::trace!(input = %self.ids.input, "combobox opened");
        self.state = ComboboxState::Open;
        self.restore_selected_active();
    }

    /// Close the option list, clearing the active option and resyncing the
    /// input text with the committed value.
    pub fn close(&mut self) {
        if self.config.disabled || !self.is_open() {
            return;
        }
        tracing::trace!(input = %self.ids.input, "combobox closed");
        self.state = ComboboxState::Closed;
        self.active = None;
        self.trigger = ActivationTrigger::Other;
        self.typeahead.clear();
        self.sync_input();
    }

    fn open_and_highlight(&mut self, focus: Focus<OptionId>) {
        if self.is_open() {
            return;
        }
        self.open();
        if self.is_open() {
            self.deferred.push(DeferredTask::HighlightIfEmpty(focus));
        }
    }

    /// Move the active option. Ignored while closed.
    pub fn go_to_option(&mut self, focus: Focus<OptionId>, trigger: ActivationTrigger) {
        if self.config.disabled || !self.is_open() {
            return;
        }
        let next = self.calculate(focus);
        if next == self.active {
            return;
        }
        tracing::trace!(?focus, from = ?self.active, to = ?next, "active option moved");
        self.active = next;
        self.trigger = trigger;
        self.typeahead.clear();
    }

    /// Select an option by id.
    ///
    /// Single mode replaces the value; multiple mode toggles membership.
    /// Either way a [`ComboboxEvent::Change`] is emitted and the input text
    /// is synced. This does not close the combobox.
    pub fn select_option(&mut self, id: OptionId) {
        if self.config.disabled {
            return;
        }
        match self.option_index(id) {
            Some(index) => self.select_index(index),
            None => tracing::debug!(?id, "ignoring selection of unknown option"),
        }
    }

    /// Select the active option, if any.
    pub fn select_active_option(&mut self) {
        if self.config.disabled {
            return;
        }
        if let Some(index) = self.active {
            self.select_index(index);
        }
    }

    fn select_index(&mut self, index: usize) {
        let Some(candidate) = self.value_at(index).cloned() else {
            return;
        };
        let next = match &self.value {
            Value::Multiple(values) => {
                let mut values = values.clone();
                match self.config.by.position(&values, &candidate) {
                    Some(position) => {
                        values.remove(position);
                    }
                    None => values.push(candidate),
                }
                Value::Multiple(values)
            }
            Value::Single(_) => Value::Single(Some(candidate)),
        };
        self.commit(next);
    }

    fn commit(&mut self, value: Value<V>) {
        tracing::trace!(input = %self.ids.input, "committed value changed");
        self.value = value.clone();
        self.events.push(ComboboxEvent::Change(value));
        self.sync_input();
        self.restore_selected_active();
    }

    // -- Registry --------------------------------------------------------

    /// Allocate an id for an option about to register.
    pub fn next_option_id(&mut self) -> OptionId {
        self.next_option += 1;
        OptionId(self.next_option)
    }

    fn track_active(&mut self, mutate: impl FnOnce(&mut Registry<V>, &dyn DocumentOrder)) {
        let active_id = self.active.and_then(|i| self.registry.entries().get(i).map(OptionEntry::id));
        mutate(&mut self.registry, self.config.document_order.as_ref());
        self.active = active_id.and_then(|id| self.registry.index_of(id));
    }

    /// Register a mounted option in rendered order.
    ///
    /// The active option keeps pointing at the same option even if its index
    /// shifts. Ignored in virtual mode.
    pub fn register_option(&mut self, id: OptionId, data: OptionData<V>) {
        if self.config.virtual_options.is_some() {
            tracing::debug!(?id, "ignoring option registration in virtual mode");
            return;
        }
        let dom_id = data
            .dom_id
            .clone()
            .unwrap_or_else(|| format!("{}-option-{}", self.ids.options, id.0));
        self.track_active(|registry, order| registry.register(id, dom_id, data, order));

        let index = self.registry.index_of(id);
        if self.active.is_none() || self.first_selected_index() == index {
            self.restore_selected_active();
        }
    }

    /// Unregister an unmounted option. Unknown ids are ignored.
    ///
    /// If the active option is removed the active index becomes `None`.
    pub fn unregister_option(&mut self, id: OptionId) {
        if self.config.virtual_options.is_some() {
            return;
        }
        let mut removed = false;
        self.track_active(|registry, _| removed = registry.unregister(id).is_some());
        if removed && self.active.is_none() {
            self.restore_selected_active();
        }
    }

    /// Re-query rendered order after the host moved option elements.
    pub fn resort_options(&mut self) {
        if self.config.virtual_options.is_some() {
            return;
        }
        self.track_active(|registry, order| registry.sort(order));
    }

    /// Change an option's disabled flag. Disabling the active option clears
    /// the active index.
    pub fn set_option_disabled(&mut self, id: OptionId, disabled: bool) {
        let index = self.registry.index_of(id);
        if let Some(data) = self.registry.data_mut(id) {
            data.disabled = disabled;
            if disabled && index == self.active {
                self.active = None;
            }
        }
    }

    /// Change an option's typeahead label.
    pub fn set_option_label(&mut self, id: OptionId, label: impl Into<String>) {
        if let Some(data) = self.registry.data_mut(id) {
            data.label = label.into();
        }
    }

    /// Replace the virtual option list, keeping the active option by value.
    ///
    /// Ignored unless the combobox is in virtual mode.
    pub fn set_virtual_options(&mut self, values: Vec<V>) {
        let by = &self.config.by;
        let Some(options) = self.config.virtual_options.as_mut() else {
            tracing::debug!("ignoring virtual options on a registered combobox");
            return;
        };
        let active_value = self.active.and_then(|i| options.options().get(i)).cloned();
        options.set_options(values);
        self.active = active_value.and_then(|active| {
            options
                .options()
                .iter()
                .position(|v| by.compare(Some(v), Some(&active)))
                .filter(|&i| !options.is_disabled(&options.options()[i]))
        });
        self.restore_selected_active();
    }

    /// Register a label element and return its id.
    pub fn register_label(&mut self, ids: &mut impl IdSource) -> String {
        let id = ids.next_id("combobox-label");
        self.labels.register(id.clone());
        id
    }

    /// Unregister a label element.
    pub fn unregister_label(&mut self, id: &str) {
        self.labels.unregister(id);
    }

    // -- Typeahead -------------------------------------------------------

    /// Add a typed character to the search query and activate the next
    /// matching option, starting after the active one and wrapping around.
    ///
    /// Ignored while closed. Without a match the active option stays and the
    /// query is kept for further typing.
    pub fn search(&mut self, ch: char, now: u64) {
        if self.config.disabled || !self.is_open() {
            return;
        }
        let query = String::from(self.typeahead.push(ch, now));
        let found = match &self.config.virtual_options {
            Some(options) => find_match(
                options.options(),
                self.active,
                &query,
                |v| options.label(v),
                |v| options.is_disabled(v),
            ),
            None => find_match(
                self.registry.entries(),
                self.active,
                &query,
                |e| Some(Cow::Borrowed(e.label())),
                OptionEntry::is_disabled,
            ),
        };
        if let Some(index) = found.filter(|&i| Some(i) != self.active) {
            tracing::trace!(%query, index, "typeahead matched");
            self.active = Some(index);
            self.trigger = ActivationTrigger::Other;
        }
    }

    /// Drop the search query if it has expired at `now`.
    pub fn expire_search(&mut self, now: u64) -> bool {
        self.typeahead.expire(now)
    }

    /// Drop the search query.
    pub fn clear_search(&mut self) {
        self.typeahead.clear();
    }

    // -- Host plumbing ---------------------------------------------------

    /// Run tasks deferred until after render.
    ///
    /// Each task re-checks its condition against the current state.
    pub fn run_deferred(&mut self) {
        for task in core::mem::take(&mut self.deferred) {
            match task {
                DeferredTask::HighlightIfEmpty(focus) => {
                    if self.value.is_empty() {
                        self.go_to_option(focus, ActivationTrigger::Other);
                    }
                }
            }
        }
    }

    /// Take the events emitted since the last call.
    pub fn take_events(&mut self) -> Vec<ComboboxEvent<V>> {
        core::mem::take(&mut self.events)
    }

    // -- Input -----------------------------------------------------------

    /// Handle a key press in the text input.
    ///
    /// Tab never reports [`KeyOutcome::Handled`] so that focus still moves.
    pub fn input_keydown(&mut self, event: KeyEvent) -> KeyOutcome {
        if self.config.disabled || event.modifiers.is_command() {
            return KeyOutcome::Ignored;
        }
        let open = self.is_open();
        let shift = event.modifiers.contains(Modifiers::SHIFT);
        let orientation = self.config.orientation;
        match event.key {
            key if key == orientation.next_key() => {
                if open {
                    self.go_to_option(Focus::Next, ActivationTrigger::Other);
                } else {
                    self.open_and_highlight(Focus::First);
                }
                KeyOutcome::Handled
            }
            key if key == orientation.previous_key() => {
                if open {
                    self.go_to_option(Focus::Previous, ActivationTrigger::Other);
                } else {
                    self.open_and_highlight(Focus::Last);
                }
                KeyOutcome::Handled
            }
            Key::Home | Key::PageUp if open && !shift => {
                self.go_to_option(Focus::First, ActivationTrigger::Other);
                KeyOutcome::Handled
            }
            Key::End | Key::PageDown if open && !shift => {
                self.go_to_option(Focus::Last, ActivationTrigger::Other);
                KeyOutcome::Handled
            }
            Key::Enter if open && self.active.is_some() => {
                self.select_active_option();
                if !self.config.multiple {
                    self.close();
                }
                KeyOutcome::Handled
            }
            Key::Escape if open => {
                self.close();
                if self.config.nullable && !self.config.multiple && self.value.is_empty() {
                    self.input.sync(String::new());
                }
                KeyOutcome::Handled
            }
            Key::Tab => {
                if open {
                    if !self.config.multiple {
                        self.select_active_option();
                    }
                    self.close();
                }
                KeyOutcome::Ignored
            }
            _ => KeyOutcome::Ignored,
        }
    }

    /// Handle the user editing the input text.
    ///
    /// Opens the combobox and emits [`ComboboxEvent::QueryChange`]. With
    /// [`ComboboxConfig::nullable`] in single mode, emptying the text also
    /// clears the committed value.
    pub fn input_change(&mut self, text: impl Into<String>) {
        if self.config.disabled {
            return;
        }
        let text = text.into();
        self.input.user_edit(text.clone());
        self.open();
        let clears = text.is_empty() && self.config.nullable && !self.config.multiple;
        self.events.push(ComboboxEvent::QueryChange(text));
        if clears && !self.value.is_empty() {
            self.commit(Value::Single(None));
        }
    }

    /// Handle the user moving the caret or selecting text in the input.
    pub fn input_select(&mut self, selection: core::ops::Range<usize>) {
        self.input.select(selection);
    }

    /// Handle the input gaining focus.
    pub fn input_focus(&mut self) {
        if self.config.immediate {
            self.open();
        }
    }

    /// Handle the input losing focus to `related`.
    ///
    /// Focus moving to another combobox part does not count as leaving.
    pub fn input_blur(&mut self, related: Option<Part>) {
        if related.is_none() {
            self.close();
        }
    }

    /// Handle a pointer press outside every combobox part.
    pub fn pointer_down_outside(&mut self) {
        self.close();
    }

    // -- Button ----------------------------------------------------------

    /// Handle a key press on the toggle button.
    pub fn button_keydown(&mut self, event: KeyEvent) -> KeyOutcome {
        if self.config.disabled || event.modifiers.is_command() {
            return KeyOutcome::Ignored;
        }
        let open = self.is_open();
        let orientation = self.config.orientation;
        match event.key {
            key if key == orientation.next_key() => {
                if open {
                    self.go_to_option(Focus::Next, ActivationTrigger::Other);
                } else {
                    self.open_and_highlight(Focus::First);
                }
            }
            key if key == orientation.previous_key() => {
                if open {
                    self.go_to_option(Focus::Previous, ActivationTrigger::Other);
                } else {
                    self.open_and_highlight(Focus::Last);
                }
            }
            Key::Enter | Key::Space => {
                if open {
                    self.close();
                } else {
                    self.open_and_highlight(Focus::First);
                }
            }
            Key::Escape if open => self.close(),
            Key::Character(ch) if open => {
                self.search(ch, event.time);
                return KeyOutcome::Handled;
            }
            _ => return KeyOutcome::Ignored,
        }
        self.events.push(ComboboxEvent::Focus(Part::Input));
        KeyOutcome::Handled
    }

    /// Handle a pointer click on the toggle button.
    pub fn button_click(&mut self) {
        if self.config.disabled {
            return;
        }
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
        self.events.push(ComboboxEvent::Focus(Part::Input));
    }

    // -- Options ---------------------------------------------------------

    /// Handle a key press while the option list has focus.
    pub fn options_keydown(&mut self, event: KeyEvent) -> KeyOutcome {
        if self.config.disabled || !self.is_open() || event.modifiers.is_command() {
            return KeyOutcome::Ignored;
        }
        self.typeahead.expire(event.time);
        let searching = self.typeahead.query().is_some();
        // Space only types while a search is pending.
        if let Some(ch) = event.key.as_char().filter(|&ch| ch != ' ' || searching) {
            self.search(ch, event.time);
            return KeyOutcome::Handled;
        }
        let orientation = self.config.orientation;
        match event.key {
            key if key == orientation.next_key() => {
                self.go_to_option(Focus::Next, ActivationTrigger::Other);
            }
            key if key == orientation.previous_key() => {
                self.go_to_option(Focus::Previous, ActivationTrigger::Other);
            }
            Key::Home | Key::PageUp => self.go_to_option(Focus::First, ActivationTrigger::Other),
            Key::End | Key::PageDown => self.go_to_option(Focus::Last, ActivationTrigger::Other),
            Key::Enter | Key::Space => {
                if self.active.is_some() {
                    self.select_active_option();
                    if !self.config.multiple {
                        self.close();
                        self.events.push(ComboboxEvent::Focus(Part::Input));
                    }
                }
            }
            Key::Escape => {
                self.close();
                self.events.push(ComboboxEvent::Focus(Part::Input));
            }
            Key::Tab => {
                self.close();
                return KeyOutcome::Ignored;
            }
            _ => return KeyOutcome::Ignored,
        }
        KeyOutcome::Handled
    }

    // -- Option ----------------------------------------------------------

    /// Handle a click on an option.
    ///
    /// Disabled options ignore clicks. Single mode closes after selecting.
    pub fn option_click(&mut self, id: OptionId) {
        if self.config.disabled {
            return;
        }
        let Some(index) = self.option_index(id) else {
            return;
        };
        if self.disabled_at(index) {
            return;
        }
        self.select_index(index);
        if !self.config.multiple {
            self.close();
        }
        self.events.push(ComboboxEvent::Focus(Part::Input));
    }

    /// Handle the pointer moving over an option.
    pub fn option_pointer_move(&mut self, id: OptionId) {
        let Some(index) = self.option_index(id) else {
            return;
        };
        if self.disabled_at(index) || self.active == Some(index) {
            return;
        }
        self.go_to_option(Focus::Specific(id), ActivationTrigger::Pointer);
    }

    /// Handle the pointer leaving an option.
    ///
    /// Only clears highlights the pointer created.
    pub fn option_pointer_leave(&mut self, id: OptionId) {
        let Some(index) = self.option_index(id) else {
            return;
        };
        if self.active == Some(index) && self.trigger == ActivationTrigger::Pointer {
            self.go_to_option(Focus::Nothing, ActivationTrigger::Pointer);
        }
    }

    // -- Props -----------------------------------------------------------

    fn labelledby(&self, fallback: &str) -> String {
        self.labels
            .joined()
            .unwrap_or_else(|| String::from(fallback))
    }

    /// Attributes for the text input.
    pub fn input_props(&self) -> Props {
        let open = self.is_open();
        Props::new()
            .with(Attr::Id(self.ids.input.clone()))
            .with(Attr::Role(Role::Combobox))
            .with(Attr::Type("text"))
            .with(Attr::Expanded(open))
            .with_opt(open.then(|| Attr::Controls(self.ids.options.clone())))
            .with_opt(
                self.active
                    .filter(|_| open)
                    .and_then(|i| self.dom_id_at(i))
                    .map(Attr::ActiveDescendant),
            )
            .with_opt(self.labels.joined().map(Attr::LabelledBy))
            .with(Attr::Autocomplete("list"))
            .with_opt(self.config.disabled.then_some(Attr::Disabled(true)))
    }

    /// Attributes for the toggle button.
    pub fn button_props(&self) -> Props {
        let open = self.is_open();
        let labelledby = match self.labels.joined() {
            Some(labels) => format!("{labels} {}", self.ids.button),
            None => self.ids.button.clone(),
        };
        Props::new()
            .with(Attr::Id(self.ids.button.clone()))
            .with(Attr::Type("button"))
            .with(Attr::TabIndex(-1))
            .with(Attr::HasPopup("listbox"))
            .with(Attr::Expanded(open))
            .with_opt(open.then(|| Attr::Controls(self.ids.options.clone())))
            .with(Attr::LabelledBy(labelledby))
            .with_opt(self.config.disabled.then_some(Attr::Disabled(true)))
    }

    /// Attributes for the option list.
    pub fn options_props(&self) -> Props {
        Props::new()
            .with(Attr::Id(self.ids.options.clone()))
            .with(Attr::Role(Role::Listbox))
            .with(Attr::LabelledBy(self.labelledby(&self.ids.button)))
            .with_opt(self.config.multiple.then_some(Attr::Multiselectable(true)))
            .with(Attr::Orientation(self.config.orientation))
            .with_opt((!self.is_open()).then_some(Attr::Hidden))
    }

    /// Attributes for one option, or `None` for unknown ids.
    pub fn option_props(&self, id: OptionId) -> Option<Props> {
        let index = self.option_index(id)?;
        let disabled = self.disabled_at(index);
        Some(
            Props::new()
                .with_opt(self.dom_id_at(index).map(Attr::Id))
                .with(Attr::Role(Role::Option))
                .with_opt((!disabled).then_some(Attr::TabIndex(-1)))
                .with_opt(disabled.then_some(Attr::Disabled(true)))
                .with(Attr::Selected(self.is_selected(id))),
        )
    }

    /// Attributes for a label registered with [`Combobox::register_label`].
    pub fn label_props(&self, id: &str) -> Props {
        Props::new().with(Attr::Id(String::from(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use thicket_aria::SequentialIds;

    type Names = Combobox<&'static str>;

    fn combobox(config: ComboboxConfig<&'static str>, value: Value<&'static str>) -> Names {
        Combobox::new(config, value, &mut SequentialIds::new("t"))
    }

    fn with_options(
        config: ComboboxConfig<&'static str>,
        value: Value<&'static str>,
        names: &[&'static str],
    ) -> (Names, Vec<OptionId>) {
        let mut cb = combobox(config, value);
        let ids = names
            .iter()
            .map(|&name| {
                let id = cb.next_option_id();
                cb.register_option(id, OptionData::new(name).with_label(name));
                id
            })
            .collect();
        (cb, ids)
    }

    const ABC: [&str; 3] = ["alice", "bob", "charlie"];

    #[test]
    fn parts_get_namespaced_ids() {
        let cb = combobox(ComboboxConfig::default(), Value::Single(None));
        assert_eq!(cb.ids().input, "t-combobox-input-1");
        assert_eq!(cb.ids().button, "t-combobox-button-2");
        assert_eq!(cb.ids().options, "t-combobox-options-3");
        assert_eq!(cb.state(), ComboboxState::Closed);
    }

    #[test]
    fn enter_on_button_highlights_first_then_navigation_stops_at_the_end() {
        let (mut cb, _) = with_options(ComboboxConfig::default(), Value::Single(None), &ABC);
        assert_eq!(cb.button_keydown(Key::Enter.into()), KeyOutcome::Handled);
        assert!(cb.is_open());
        assert_eq!(cb.active_index(), None, "highlight waits for render");
        cb.run_deferred();
        assert_eq!(cb.active_index(), Some(0));

        cb.go_to_option(Focus::Next, ActivationTrigger::Other);
        cb.go_to_option(Focus::Next, ActivationTrigger::Other);
        assert_eq!(cb.active_index(), Some(2));
        cb.go_to_option(Focus::Next, ActivationTrigger::Other);
        assert_eq!(cb.active_index(), Some(2));
        assert_eq!(cb.take_events(), [ComboboxEvent::Focus(Part::Input)]);
    }

    #[test]
    fn opening_activates_the_selected_option() {
        let (mut cb, _) = with_options(ComboboxConfig::default(), Value::single("bob"), &ABC);
        cb.button_click();
        assert_eq!(cb.active_index(), Some(1));

        cb.close();
        assert_eq!(cb.active_index(), None);
        cb.input_change("b");
        assert_eq!(cb.active_index(), Some(1));
    }

    #[test]
    fn deferred_highlight_is_skipped_once_a_value_exists() {
        let (mut cb, _) = with_options(ComboboxConfig::default(), Value::single("charlie"), &ABC);
        cb.input_keydown(Key::ArrowDown.into());
        assert_eq!(cb.active_index(), Some(2));
        cb.run_deferred();
        assert_eq!(cb.active_index(), Some(2));
        assert!(cb.pending_tasks().is_empty());
    }

    #[test]
    fn arrow_up_on_closed_input_highlights_last() {
        let (mut cb, _) = with_options(ComboboxConfig::default(), Value::Single(None), &ABC);
        cb.input_keydown(Key::ArrowUp.into());
        cb.run_deferred();
        assert_eq!(cb.active_index(), Some(2));
    }

    #[test]
    fn multiple_mode_toggles_membership_and_stays_open() {
        let config = ComboboxConfig::default().with_multiple(true);
        let (mut cb, ids) = with_options(config, Value::multiple(["bob", "charlie"]), &ABC);
        cb.open();
        cb.option_click(ids[1]);
        assert!(cb.is_open());
        assert_eq!(cb.value(), &Value::multiple(["charlie"]));
        cb.option_click(ids[0]);
        let picked: Vec<_> = cb.value().iter().copied().collect();
        assert!(picked.contains(&"alice") && picked.contains(&"charlie"));
        assert_eq!(picked.len(), 2);
        assert_eq!(cb.options_props().value("aria-multiselectable").as_deref(), Some("true"));
    }

    #[test]
    fn typeahead_buffers_reset_after_a_pause() {
        let (mut cb, _) = with_options(ComboboxConfig::default(), Value::Single(None), &ABC);
        cb.open();
        cb.search('b', 0);
        cb.search('o', 100);
        assert_eq!(cb.active_index(), Some(1));
        assert_eq!(cb.search_query(), Some("bo"));

        cb.search('a', 1_000);
        cb.search('l', 1_050);
        cb.search('i', 1_100);
        assert_eq!(cb.active_index(), Some(0));
        assert_eq!(cb.search_query(), Some("ali"));
    }

    #[test]
    fn typeahead_never_lands_on_disabled_options() {
        let mut cb = combobox(ComboboxConfig::default(), Value::Single(None));
        for (name, disabled) in [("alice", false), ("bob", true)] {
            let id = cb.next_option_id();
            cb.register_option(id, OptionData::new(name).with_label(name).with_disabled(disabled));
        }
        cb.open();
        cb.go_to_option(Focus::First, ActivationTrigger::Other);
        cb.search('b', 0);
        assert_eq!(cb.active_index(), Some(0));
    }

    #[test]
    fn typeahead_is_ignored_while_closed() {
        let (mut cb, _) = with_options(ComboboxConfig::default(), Value::Single(None), &ABC);
        cb.search('b', 0);
        assert_eq!(cb.active_index(), None);
        assert_eq!(cb.search_query(), None);
    }

    #[test]
    fn close_clears_active_and_syncs_input() {
        let (mut cb, _) = with_options(ComboboxConfig::default(), Value::single("bob"), &ABC);
        assert_eq!(cb.input_text(), "bob");
        cb.input_change("ch");
        assert_eq!(cb.input_text(), "ch");
        assert!(cb.input().is_typing());
        cb.input_keydown(Key::Escape.into());
        assert!(!cb.is_open());
        assert_eq!(cb.active_index(), None);
        assert_eq!(cb.input_text(), "bob");
        assert_eq!(cb.take_events(), [ComboboxEvent::QueryChange("ch".into())]);
    }

    #[test]
    fn enter_selects_and_closes_in_single_mode() {
        let (mut cb, _) = with_options(ComboboxConfig::default(), Value::Single(None), &ABC);
        cb.input_change("c");
        cb.go_to_option(Focus::Last, ActivationTrigger::Other);
        assert_eq!(cb.input_keydown(Key::Enter.into()), KeyOutcome::Handled);
        assert!(!cb.is_open());
        assert_eq!(cb.value(), &Value::single("charlie"));
        assert_eq!(cb.input_text(), "charlie");
        assert_eq!(cb.input().selection(), 7..7);
    }

    #[test]
    fn enter_without_active_option_is_not_handled() {
        let (mut cb, _) = with_options(ComboboxConfig::default(), Value::Single(None), &ABC);
        cb.open();
        assert_eq!(cb.input_keydown(Key::Enter.into()), KeyOutcome::Ignored);
        assert!(cb.take_events().is_empty());
    }

    #[test]
    fn tab_selects_active_but_lets_focus_move() {
        let (mut cb, _) = with_options(ComboboxConfig::default(), Value::Single(None), &ABC);
        cb.open();
        cb.go_to_option(Focus::First, ActivationTrigger::Other);
        assert_eq!(cb.input_keydown(Key::Tab.into()), KeyOutcome::Ignored);
        assert!(!cb.is_open());
        assert_eq!(cb.value(), &Value::single("alice"));
    }

    #[test]
    fn nullable_clearing_empties_the_value() {
        let config = ComboboxConfig::default().with_nullable(true);
        let (mut cb, _) = with_options(config, Value::single("bob"), &ABC);
        cb.input_change("");
        assert_eq!(cb.value(), &Value::Single(None));
        assert_eq!(
            cb.take_events(),
            [
                ComboboxEvent::QueryChange(String::new()),
                ComboboxEvent::Change(Value::Single(None)),
            ]
        );
        cb.input_change("zz");
        cb.input_keydown(Key::Escape.into());
        assert_eq!(cb.input_text(), "");
    }

    #[test]
    fn clearing_text_keeps_the_value_unless_nullable() {
        let (mut cb, _) = with_options(ComboboxConfig::default(), Value::single("bob"), &ABC);
        cb.input_change("");
        assert_eq!(cb.value(), &Value::single("bob"));
    }

    #[test]
    fn disabled_combobox_ignores_everything() {
        let config = ComboboxConfig::default().with_disabled(true);
        let (mut cb, ids) = with_options(config, Value::Single(None), &ABC);
        cb.open();
        cb.button_click();
        cb.input_change("a");
        cb.select_option(ids[0]);
        assert_eq!(cb.input_keydown(Key::ArrowDown.into()), KeyOutcome::Ignored);
        assert!(!cb.is_open());
        assert_eq!(cb.value(), &Value::Single(None));
        assert!(cb.take_events().is_empty());
        assert_eq!(cb.input_props().value("aria-disabled").as_deref(), Some("true"));
    }

    #[test]
    fn disabling_an_open_combobox_leaves_it_open() {
        let (mut cb, _) = with_options(ComboboxConfig::default(), Value::Single(None), &ABC);
        cb.open();
        cb.set_disabled(true);
        cb.close();
        assert!(cb.is_open());
    }

    #[test]
    fn active_option_survives_reordering_registration() {
        let (mut cb, ids) = with_options(ComboboxConfig::default(), Value::Single(None), &ABC);
        cb.open();
        cb.go_to_option(Focus::Specific(ids[1]), ActivationTrigger::Other);

        // A new option rendered before everything else shifts indices.
        let rendered = Rc::new(core::cell::RefCell::new(vec![ids[0], ids[1], ids[2]]));
        let order = Rc::clone(&rendered);
        cb.config.document_order =
            Rc::new(move |id: OptionId| order.borrow().iter().position(|r| *r == id));
        let first = cb.next_option_id();
        rendered.borrow_mut().insert(0, first);
        cb.register_option(first, OptionData::new("aaron").with_label("aaron"));
        assert_eq!(cb.options()[0].id(), first);
        assert_eq!(cb.active_option(), Some(ids[1]));
        assert_eq!(cb.active_index(), Some(2));

        cb.unregister_option(first);
        cb.unregister_option(first);
        assert_eq!(cb.active_index(), Some(1));
    }

    #[test]
    fn removing_the_active_option_clears_it() {
        let (mut cb, ids) = with_options(ComboboxConfig::default(), Value::Single(None), &ABC);
        cb.open();
        cb.go_to_option(Focus::Last, ActivationTrigger::Other);
        cb.unregister_option(ids[2]);
        assert_eq!(cb.active_index(), None);
    }

    #[test]
    fn reregistered_option_is_not_confused_with_its_neighbours() {
        let (mut cb, ids) = with_options(ComboboxConfig::default(), Value::Single(None), &ABC);
        let rendered = Rc::new(core::cell::RefCell::new(vec![ids[0], ids[1], ids[2]]));
        let order = Rc::clone(&rendered);
        cb.config.document_order =
            Rc::new(move |id: OptionId| order.borrow().iter().position(|r| *r == id));
        cb.open();
        cb.go_to_option(Focus::Specific(ids[1]), ActivationTrigger::Other);

        rendered.borrow_mut().retain(|id| *id != ids[1]);
        cb.unregister_option(ids[1]);
        assert_eq!(cb.active_index(), None);
        assert_eq!(cb.option_count(), 2);

        // Same identity, now rendered last.
        rendered.borrow_mut().push(ids[1]);
        cb.register_option(ids[1], OptionData::new("bob").with_label("bob"));
        let order: Vec<_> = cb.options().iter().map(OptionEntry::id).collect();
        assert_eq!(order, [ids[0], ids[2], ids[1]]);
        assert_eq!(cb.active_index(), None);

        cb.go_to_option(Focus::Specific(ids[1]), ActivationTrigger::Other);
        assert_eq!(cb.active_index(), Some(2));
        rendered.borrow_mut().rotate_right(1);
        cb.resort_options();
        assert_eq!(cb.active_index(), Some(0));
        assert_eq!(cb.active_option(), Some(ids[1]));
    }

    #[test]
    fn selecting_while_open_activates_the_new_value() {
        let (mut cb, ids) = with_options(ComboboxConfig::default(), Value::Single(None), &ABC);
        cb.open();
        cb.go_to_option(Focus::First, ActivationTrigger::Other);
        cb.select_option(ids[2]);
        assert!(cb.is_open());
        assert_eq!(cb.value(), &Value::single("charlie"));
        assert_eq!(cb.active_index(), Some(2));

        let config = ComboboxConfig::default().with_multiple(true);
        let (mut cb, ids) = with_options(config, Value::multiple(["charlie"]), &ABC);
        cb.open();
        assert_eq!(cb.active_index(), Some(2));
        cb.select_option(ids[1]);
        assert_eq!(cb.active_option(), Some(ids[1]), "bob is now the first member");
    }

    #[test]
    fn late_selected_option_becomes_active() {
        let mut cb = combobox(ComboboxConfig::default(), Value::single("bob"));
        cb.open();
        let alice = cb.next_option_id();
        cb.register_option(alice, OptionData::new("alice"));
        assert_eq!(cb.active_index(), None);
        let bob = cb.next_option_id();
        cb.register_option(bob, OptionData::new("bob"));
        assert_eq!(cb.active_option(), Some(bob));
    }

    #[test]
    fn set_value_while_open_moves_active() {
        let (mut cb, ids) = with_options(ComboboxConfig::default(), Value::single("alice"), &ABC);
        cb.open();
        cb.set_value(Value::single("charlie"));
        assert_eq!(cb.active_option(), Some(ids[2]));
        assert_eq!(cb.input_text(), "charlie");
        assert!(cb.take_events().is_empty(), "controlled writes emit nothing");
    }

    #[test]
    fn disabling_the_active_option_clears_it() {
        let (mut cb, ids) = with_options(ComboboxConfig::default(), Value::Single(None), &ABC);
        cb.open();
        cb.go_to_option(Focus::First, ActivationTrigger::Other);
        cb.set_option_disabled(ids[0], true);
        assert_eq!(cb.active_index(), None);
        cb.option_click(ids[0]);
        assert_eq!(cb.value(), &Value::Single(None));
    }

    #[test]
    fn pointer_highlight_is_cleared_on_leave() {
        let (mut cb, ids) = with_options(ComboboxConfig::default(), Value::Single(None), &ABC);
        cb.open();
        cb.option_pointer_move(ids[1]);
        assert_eq!(cb.active_index(), Some(1));
        assert_eq!(cb.activation_trigger(), ActivationTrigger::Pointer);
        cb.option_pointer_leave(ids[1]);
        assert_eq!(cb.active_index(), None);

        cb.go_to_option(Focus::First, ActivationTrigger::Other);
        cb.option_pointer_leave(ids[0]);
        assert_eq!(cb.active_index(), Some(0), "keyboard highlight survives");
    }

    #[test]
    fn blur_to_another_part_keeps_it_open() {
        let (mut cb, _) = with_options(ComboboxConfig::default(), Value::Single(None), &ABC);
        cb.open();
        cb.input_blur(Some(Part::Options));
        assert!(cb.is_open());
        cb.input_blur(None);
        assert!(!cb.is_open());
        cb.open();
        cb.pointer_down_outside();
        assert!(!cb.is_open());
    }

    #[test]
    fn immediate_opens_on_focus() {
        let mut cb = combobox(ComboboxConfig::default(), Value::Single(None));
        cb.input_focus();
        assert!(!cb.is_open());
        let mut cb = combobox(ComboboxConfig::default().with_immediate(true), Value::Single(None));
        cb.input_focus();
        assert!(cb.is_open());
    }

    #[test]
    fn options_keys_navigate_select_and_return_focus() {
        let (mut cb, _) = with_options(ComboboxConfig::default(), Value::Single(None), &ABC);
        cb.open();
        cb.options_keydown(Key::End.into());
        assert_eq!(cb.active_index(), Some(2));
        cb.options_keydown(Key::ArrowUp.into());
        assert_eq!(cb.active_index(), Some(1));
        assert_eq!(cb.options_keydown(Key::Space.into()), KeyOutcome::Handled);
        assert!(!cb.is_open());
        assert_eq!(
            cb.take_events(),
            [
                ComboboxEvent::Change(Value::single("bob")),
                ComboboxEvent::Focus(Part::Input),
            ]
        );
    }

    #[test]
    fn space_extends_a_pending_search() {
        let mut cb = combobox(ComboboxConfig::default(), Value::Single(None));
        for name in ["new york", "newark"] {
            let id = cb.next_option_id();
            cb.register_option(id, OptionData::new(name).with_label(name));
        }
        cb.open();
        cb.options_keydown(KeyEvent::new(Key::Character('n')).at(0));
        cb.options_keydown(KeyEvent::new(Key::Character('e')).at(10));
        cb.options_keydown(KeyEvent::new(Key::Character('w')).at(20));
        cb.options_keydown(KeyEvent::new(Key::Space).at(30));
        assert_eq!(cb.search_query(), Some("new "));
        assert_eq!(cb.active_index(), Some(0));
        assert_eq!(cb.value(), &Value::Single(None));
    }

    #[test]
    fn horizontal_orientation_uses_left_and_right() {
        let config = ComboboxConfig::default().with_orientation(Orientation::Horizontal);
        let (mut cb, _) = with_options(config, Value::Single(None), &ABC);
        assert_eq!(cb.input_keydown(Key::ArrowDown.into()), KeyOutcome::Ignored);
        cb.input_keydown(Key::ArrowRight.into());
        cb.run_deferred();
        cb.input_keydown(Key::ArrowRight.into());
        assert_eq!(cb.active_index(), Some(1));
    }

    #[test]
    fn custom_equality_matches_by_key() {
        #[derive(Clone, Debug, PartialEq)]
        struct User {
            id: u32,
            name: &'static str,
        }
        let by = By::key(|u: &User| u.id);
        let config = ComboboxConfig::default()
            .with_by(by)
            .with_display_value(|v: &Value<User>| {
                v.as_single().map(|u| String::from(u.name)).unwrap_or_default()
            });
        let mut cb = Combobox::new(
            config,
            Value::single(User { id: 2, name: "stale" }),
            &mut SequentialIds::default(),
        );
        assert_eq!(cb.input_text(), "stale");
        for (id, name) in [(1, "ann"), (2, "ben")] {
            let option = cb.next_option_id();
            cb.register_option(option, OptionData::new(User { id, name }));
        }
        cb.open();
        assert_eq!(cb.active_index(), Some(1));
    }

    #[test]
    fn virtual_options_navigate_by_position() {
        let list = VirtualOptions::new(vec!["alice", "bob", "charlie"])
            .with_disabled(|v: &&str| *v == "bob")
            .with_label(|v: &&str| String::from(*v));
        let mut cb = combobox(ComboboxConfig::default().with_virtual(list), Value::Single(None));
        let ignored = cb.next_option_id();
        cb.register_option(ignored, OptionData::new("zed"));
        assert_eq!(cb.option_count(), 3);
        assert!(cb.options().is_empty());

        cb.open();
        cb.go_to_option(Focus::First, ActivationTrigger::Other);
        cb.go_to_option(Focus::Next, ActivationTrigger::Other);
        assert_eq!(cb.active_index(), Some(2));
        assert_eq!(
            cb.input_props().value("aria-activedescendant").as_deref(),
            Some("t-combobox-options-3-option-2")
        );

        cb.set_virtual_options(vec!["charlie", "dave"]);
        assert_eq!(cb.active_index(), Some(0));
        cb.select_option(OptionId(1));
        assert_eq!(cb.value(), &Value::single("dave"));
    }

    #[test]
    fn virtual_active_option_survives_registry_calls() {
        let list = VirtualOptions::new(vec!["alice", "bob", "charlie"]);
        let mut cb = combobox(ComboboxConfig::default().with_virtual(list), Value::Single(None));
        cb.open();
        cb.go_to_option(Focus::Last, ActivationTrigger::Other);
        cb.unregister_option(OptionId(99));
        cb.unregister_option(OptionId(0));
        assert_eq!(cb.active_index(), Some(2));

        cb.go_to_option(Focus::First, ActivationTrigger::Other);
        cb.resort_options();
        assert_eq!(cb.active_index(), Some(0));
        assert_eq!(cb.option_count(), 3);
    }

    #[test]
    fn input_props_follow_state() {
        let (mut cb, ids) = with_options(ComboboxConfig::default(), Value::Single(None), &ABC);
        let props = cb.input_props();
        assert_eq!(props.value("role").as_deref(), Some("combobox"));
        assert_eq!(props.value("aria-expanded").as_deref(), Some("false"));
        assert!(!props.contains("aria-controls"));
        assert!(!props.contains("aria-activedescendant"));
        assert!(cb.options_props().contains("hidden"));

        cb.open();
        cb.go_to_option(Focus::Specific(ids[1]), ActivationTrigger::Other);
        let props = cb.input_props();
        assert_eq!(props.value("aria-expanded").as_deref(), Some("true"));
        assert_eq!(props.value("aria-controls").as_deref(), Some("t-combobox-options-3"));
        assert_eq!(
            props.value("aria-activedescendant").as_deref(),
            Some("t-combobox-options-3-option-2")
        );
        assert!(!cb.options_props().contains("hidden"));
    }

    #[test]
    fn labels_feed_labelledby() {
        let mut ids = SequentialIds::new("t");
        let mut cb: Names = Combobox::new(ComboboxConfig::default(), Value::Single(None), &mut ids);
        assert_eq!(
            cb.options_props().value("aria-labelledby").as_deref(),
            Some("t-combobox-button-2")
        );
        let label = cb.register_label(&mut ids);
        assert_eq!(label, "t-combobox-label-4");
        assert_eq!(
            cb.button_props().value("aria-labelledby").as_deref(),
            Some("t-combobox-label-4 t-combobox-button-2")
        );
        assert_eq!(
            cb.options_props().value("aria-labelledby").as_deref(),
            Some("t-combobox-label-4")
        );
        cb.unregister_label(&label);
        assert!(!cb.input_props().contains("aria-labelledby"));
    }

    #[test]
    fn option_state_and_props() {
        let mut cb = combobox(ComboboxConfig::default(), Value::single("bob"));
        let a = cb.next_option_id();
        cb.register_option(a, OptionData::new("alice").with_disabled(true));
        let b = cb.next_option_id();
        cb.register_option(b, OptionData::new("bob").with_dom_id("bob-el"));
        cb.open();

        assert_eq!(cb.option_state(a), Some(OptionState::DISABLED));
        assert_eq!(cb.option_state(b), Some(OptionState::ACTIVE | OptionState::SELECTED));
        assert_eq!(cb.option_state(OptionId(99)), None);

        let disabled = cb.option_props(a).unwrap();
        assert!(!disabled.contains("tabindex"));
        assert_eq!(disabled.value("aria-disabled").as_deref(), Some("true"));
        let selected = cb.option_props(b).unwrap();
        assert_eq!(selected.value("id").as_deref(), Some("bob-el"));
        assert_eq!(selected.value("aria-selected").as_deref(), Some("true"));
        assert_eq!(selected.value("tabindex").as_deref(), Some("-1"));
    }
}
