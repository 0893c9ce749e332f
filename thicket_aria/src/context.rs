// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolving a part's parent state.

/// A widget part was created without the parent it depends on.
///
/// This is a programming error in the host: for example, building a combobox
/// option outside of any combobox. It is reported at construction time and
/// names both the part and the missing ancestor.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("<{part} /> is missing a parent <{ancestor} /> component.")]
pub struct MissingAncestor {
    /// Name of the part that was being created.
    pub part: &'static str,
    /// Name of the ancestor it needs.
    pub ancestor: &'static str,
}

/// Resolve a part's parent, failing with [`MissingAncestor`] when absent.
///
/// ```rust
/// use thicket_aria::require;
///
/// let parent: Option<&u32> = None;
/// let err = require(parent, "TabPanel", "TabGroup").unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     "<TabPanel /> is missing a parent <TabGroup /> component."
/// );
/// ```
pub fn require<T>(
    parent: Option<T>,
    part: &'static str,
    ancestor: &'static str,
) -> Result<T, MissingAncestor> {
    parent.ok_or(MissingAncestor { part, ancestor })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn present_parent_passes_through() {
        assert_eq!(require(Some(3), "ComboboxInput", "Combobox"), Ok(3));
    }

    #[test]
    fn missing_parent_names_both_sides() {
        let err = require::<()>(None, "ComboboxOption", "Combobox").unwrap_err();
        assert_eq!(err.part, "ComboboxOption");
        assert_eq!(err.ancestor, "Combobox");
    }
}
