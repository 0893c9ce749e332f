// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! ARIA attribute bags.

use alloc::string::{String, ToString};
use smallvec::SmallVec;

use crate::Orientation;

/// Value of the `role` attribute.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// `combobox`
    Combobox,
    /// `listbox`
    Listbox,
    /// `option`
    Option,
    /// `button`
    Button,
    /// `tablist`
    Tablist,
    /// `tab`
    Tab,
    /// `tabpanel`
    Tabpanel,
}

impl Role {
    /// The attribute value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Combobox => "combobox",
            Self::Listbox => "listbox",
            Self::Option => "option",
            Self::Button => "button",
            Self::Tablist => "tablist",
            Self::Tab => "tab",
            Self::Tabpanel => "tabpanel",
        }
    }
}

/// A single attribute a widget wants on its rendered element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Attr {
    /// `id`
    Id(String),
    /// `role`
    Role(Role),
    /// `type`, for button elements.
    Type(&'static str),
    /// `tabindex`
    TabIndex(i32),
    /// `hidden`
    Hidden,
    /// `aria-expanded`
    Expanded(bool),
    /// `aria-activedescendant`
    ActiveDescendant(String),
    /// `aria-selected`
    Selected(bool),
    /// `aria-disabled`
    Disabled(bool),
    /// `aria-controls`
    Controls(String),
    /// `aria-labelledby`
    LabelledBy(String),
    /// `aria-describedby`
    DescribedBy(String),
    /// `aria-haspopup`
    HasPopup(&'static str),
    /// `aria-autocomplete`
    Autocomplete(&'static str),
    /// `aria-multiselectable`
    Multiselectable(bool),
    /// `aria-orientation`
    Orientation(Orientation),
}

impl Attr {
    /// Attribute name as written in markup.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Id(_) => "id",
            Self::Role(_) => "role",
            Self::Type(_) => "type",
            Self::TabIndex(_) => "tabindex",
            Self::Hidden => "hidden",
            Self::Expanded(_) => "aria-expanded",
            Self::ActiveDescendant(_) => "aria-activedescendant",
            Self::Selected(_) => "aria-selected",
            Self::Disabled(_) => "aria-disabled",
            Self::Controls(_) => "aria-controls",
            Self::LabelledBy(_) => "aria-labelledby",
            Self::DescribedBy(_) => "aria-describedby",
            Self::HasPopup(_) => "aria-haspopup",
            Self::Autocomplete(_) => "aria-autocomplete",
            Self::Multiselectable(_) => "aria-multiselectable",
            Self::Orientation(_) => "aria-orientation",
        }
    }

    /// Attribute value as written in markup.
    pub fn value(&self) -> String {
        match self {
            Self::Id(s)
            | Self::ActiveDescendant(s)
            | Self::Controls(s)
            | Self::LabelledBy(s)
            | Self::DescribedBy(s) => s.clone(),
            Self::Role(role) => role.as_str().to_string(),
            Self::Type(s) | Self::HasPopup(s) | Self::Autocomplete(s) => (*s).to_string(),
            Self::TabIndex(n) => n.to_string(),
            Self::Hidden => String::new(),
            Self::Expanded(b) | Self::Selected(b) | Self::Disabled(b) | Self::Multiselectable(b) => {
                b.to_string()
            }
            Self::Orientation(o) => o.as_str().to_string(),
        }
    }
}

/// An ordered bag of attributes for one element.
///
/// Setting an attribute whose name is already present replaces it in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Props {
    attrs: SmallVec<[Attr; 8]>,
}

impl Props {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, replacing any attribute with the same name.
    pub fn set(&mut self, attr: Attr) {
        match self.attrs.iter_mut().find(|a| a.name() == attr.name()) {
            Some(slot) => *slot = attr,
            None => self.attrs.push(attr),
        }
    }

    /// Builder form of [`Props::set`].
    #[must_use]
    pub fn with(mut self, attr: Attr) -> Self {
        self.set(attr);
        self
    }

    /// Builder form that only sets `attr` when it is `Some`.
    #[must_use]
    pub fn with_opt(mut self, attr: Option<Attr>) -> Self {
        if let Some(attr) = attr {
            self.set(attr);
        }
        self
    }

    /// Look up an attribute by name.
    pub fn get(&self, name: &str) -> Option<&Attr> {
        self.attrs.iter().find(|a| a.name() == name)
    }

    /// Look up an attribute's rendered value by name.
    pub fn value(&self, name: &str) -> Option<String> {
        self.get(name).map(Attr::value)
    }

    /// Whether an attribute with this name is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Attr> {
        self.attrs.iter()
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// Whether the bag is empty.
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}
