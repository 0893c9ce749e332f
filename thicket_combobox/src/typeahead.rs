// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typeahead search buffer.
//!
//! Characters typed in quick succession accumulate into one query. A pause
//! longer than the timeout starts a new query, so typing "b", waiting, then
//! "a" searches for "a" rather than "ba".

use alloc::borrow::Cow;
use alloc::string::String;

/// Default pause, in milliseconds, after which the query resets.
pub const DEFAULT_SEARCH_TIMEOUT_MS: u64 = 350;

/// Accumulates typed characters into a lowercase query.
#[derive(Clone, Debug)]
pub struct Typeahead {
    query: String,
    last_input: Option<u64>,
    timeout: u64,
}

impl Default for Typeahead {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_TIMEOUT_MS)
    }
}

impl Typeahead {
    /// Create an empty buffer with the given reset timeout in milliseconds.
    pub fn new(timeout: u64) -> Self {
        Self {
            query: String::new(),
            last_input: None,
            timeout,
        }
    }

    /// Append a character typed at `now`, first discarding an expired query.
    ///
    /// Returns the updated query.
    pub fn push(&mut self, ch: char, now: u64) -> &str {
        self.expire(now);
        self.query.extend(ch.to_lowercase());
        self.last_input = Some(now);
        &self.query
    }

    /// Clear the query if no character arrived within the timeout.
    ///
    /// Returns `true` if a non-empty query was discarded.
    pub fn expire(&mut self, now: u64) -> bool {
        match self.last_input {
            Some(last) if now.saturating_sub(last) >= self.timeout => {
                let had_query = !self.query.is_empty();
                self.clear();
                had_query
            }
            _ => false,
        }
    }

    /// Discard the query.
    pub fn clear(&mut self) {
        self.query.clear();
        self.last_input = None;
    }

    /// The current query, or `None` when empty.
    pub fn query(&self) -> Option<&str> {
        (!self.query.is_empty()).then_some(self.query.as_str())
    }

    /// The reset timeout in milliseconds.
    pub fn timeout(&self) -> u64 {
        self.timeout
    }
}

/// Whether `label` starts with the lowercase `query`, ignoring case.
pub fn starts_with_ignore_case(label: &str, query: &str) -> bool {
    let mut label = label.chars().flat_map(char::to_lowercase);
    query.chars().all(|q| label.next() == Some(q))
}

/// Find the first enabled item whose label matches `query`.
///
/// The scan starts just after `active` and wraps around, ending on `active`
/// itself, so repeating a query cycles through items that share a prefix.
pub fn find_match<T>(
    items: &[T],
    active: Option<usize>,
    query: &str,
    label: impl Fn(&T) -> Option<Cow<'_, str>>,
    disabled: impl Fn(&T) -> bool,
) -> Option<usize> {
    let len = items.len();
    let start = active.map_or(0, |a| a + 1);
    (0..len).map(|offset| (start + offset) % len).find(|&i| {
        let item = &items[i];
        !disabled(item) && label(item).is_some_and(|l| starts_with_ignore_case(&l, query))
    })
}
