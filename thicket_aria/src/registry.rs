// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Label and description id registries.

use alloc::string::String;
use alloc::vec::Vec;

/// An ordered set of element ids.
///
/// Labels and descriptions register their ids as they mount; the labelled
/// element reads [`IdRegistry::joined`] for its `aria-labelledby` or
/// `aria-describedby` value.
#[derive(Clone, Debug, Default)]
pub struct IdRegistry {
    ids: Vec<String>,
}

impl IdRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an id. Registering an id twice keeps the first position.
    pub fn register(&mut self, id: impl Into<String>) {
        let id = id.into();
        if !self.ids.contains(&id) {
            self.ids.push(id);
        }
    }

    /// Remove an id. Unknown ids are ignored.
    pub fn unregister(&mut self, id: &str) {
        self.ids.retain(|existing| existing != id);
    }

    /// Registered ids in registration order.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Whether no ids are registered.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Space-separated ids, or `None` when empty.
    pub fn joined(&self) -> Option<String> {
        (!self.ids.is_empty()).then(|| self.ids.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_in_registration_order_without_duplicates() {
        let mut labels = IdRegistry::new();
        assert_eq!(labels.joined(), None);
        labels.register("a");
        labels.register("b");
        labels.register("a");
        assert_eq!(labels.joined().as_deref(), Some("a b"));
        labels.unregister("a");
        labels.unregister("missing");
        assert_eq!(labels.joined().as_deref(), Some("b"));
    }
}
