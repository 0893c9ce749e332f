// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element id generation.

use alloc::format;
use alloc::string::String;

/// Produces a fresh, unique element id per mounted part.
///
/// Widgets ask for one id per part (input, button, listbox, option, ...) when
/// the part is created. Hosts that render on a server or need stable ids in
/// tests supply their own implementation.
pub trait IdSource {
    /// Return a new id for an element of the given component kind.
    fn next_id(&mut self, component: &str) -> String;
}

impl<F> IdSource for F
where
    F: FnMut(&str) -> String,
{
    fn next_id(&mut self, component: &str) -> String {
        self(component)
    }
}

/// Counter-based ids: `<namespace>-<component>-<n>`, with `n` starting at 1.
///
/// The counter is shared across component kinds, so every id handed out by
/// one `SequentialIds` is unique.
#[derive(Clone, Debug)]
pub struct SequentialIds {
    namespace: String,
    next: u64,
}

impl SequentialIds {
    /// Create a generator with the given namespace prefix.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            next: 1,
        }
    }

    /// The namespace prefix.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("thicket")
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self, component: &str) -> String {
        let n = self.next;
        self.next += 1;
        format!("{}-{component}-{n}", self.namespace)
    }
}
