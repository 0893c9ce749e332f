// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keeping the text input in step with the committed value.

use alloc::rc::Rc;
use alloc::string::{String, ToString};
use core::any::Any;
use core::ops::Range;

use crate::Value;

/// Formats the committed value for display in the text input.
pub type DisplayValue<V> = Rc<dyn Fn(&Value<V>) -> String>;

/// Text for the input given the committed value.
///
/// Uses `display` when provided. Otherwise a single `String` or `&'static str`
/// value is shown as-is and an empty single value shows as empty text. For
/// any other value `None` is returned and the input is left untouched.
pub fn display_text<V: 'static>(value: &Value<V>, display: Option<&DisplayValue<V>>) -> Option<String> {
    if let Some(display) = display {
        return Some(display(value));
    }
    match value {
        Value::Single(None) => Some(String::new()),
        Value::Single(Some(v)) => {
            let any: &dyn Any = v;
            any.downcast_ref::<String>()
                .cloned()
                .or_else(|| any.downcast_ref::<&'static str>().map(|s| (*s).to_string()))
        }
        Value::Multiple(_) => None,
    }
}

/// The text input's contents and caret, as last written or typed.
///
/// Offsets in [`InputText::selection`] are byte offsets into the text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputText {
    text: String,
    selection: Range<usize>,
    typing: bool,
}

impl InputText {
    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Current selection; collapsed ranges are a caret.
    pub fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }

    /// Whether the text came from the user rather than from syncing.
    pub fn is_typing(&self) -> bool {
        self.typing
    }

    /// Record text typed by the user, with the caret at the end.
    pub fn user_edit(&mut self, text: String) {
        let end = text.len();
        self.text = text;
        self.selection = end..end;
        self.typing = true;
    }

    /// Record a selection made by the user.
    ///
    /// The range is clamped to the text and to character boundaries.
    pub fn select(&mut self, selection: Range<usize>) {
        let clamp = |mut i: usize| {
            i = i.min(self.text.len());
            while !self.text.is_char_boundary(i) {
                i -= 1;
            }
            i
        };
        let start = clamp(selection.start);
        let end = clamp(selection.end).max(start);
        self.selection = start..end;
    }

    /// Write synced text and move the caret to the end.
    ///
    /// Returns `true` if the text changed.
    pub fn sync(&mut self, text: String) -> bool {
        let changed = self.text != text;
        let end = text.len();
        self.text = text;
        self.selection = end..end;
        self.typing = false;
        changed
    }
}
