// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard vocabulary.

/// A logical key as seen by widget state machines.
///
/// Hosts translate their platform key events into this enum; anything that
/// produces text and is not one of the named keys arrives as
/// [`Key::Character`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Arrow up.
    ArrowUp,
    /// Arrow down.
    ArrowDown,
    /// Arrow left.
    ArrowLeft,
    /// Arrow right.
    ArrowRight,
    /// Home.
    Home,
    /// End.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Enter / Return.
    Enter,
    /// Space bar.
    Space,
    /// Escape.
    Escape,
    /// Tab.
    Tab,
    /// Backspace.
    Backspace,
    /// Delete.
    Delete,
    /// A printable character.
    Character(char),
}

impl Key {
    /// The character this key types, if any.
    ///
    /// Space counts as a character so that typeahead can match multi-word
    /// labels.
    pub fn as_char(self) -> Option<char> {
        match self {
            Self::Character(c) => Some(c),
            Self::Space => Some(' '),
            _ => None,
        }
    }
}

bitflags::bitflags! {
    /// Modifier keys held during a key event.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT = 1 << 0;
        /// Control.
        const CTRL = 1 << 1;
        /// Alt / Option.
        const ALT = 1 << 2;
        /// Meta / Command / Super.
        const META = 1 << 3;
    }
}

impl Modifiers {
    /// Whether a command-style modifier (Ctrl, Alt, or Meta) is held.
    ///
    /// Such chords are shortcuts, not typing, and widgets leave them alone.
    pub fn is_command(self) -> bool {
        self.intersects(Self::CTRL | Self::ALT | Self::META)
    }
}

/// A key press with its modifiers and timestamp.
///
/// The timestamp is in milliseconds on any monotonic clock the host chooses;
/// widgets only compare timestamps with each other (for example to expire a
/// typeahead buffer).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub key: Key,
    /// Modifiers held at the time.
    pub modifiers: Modifiers,
    /// Event timestamp in milliseconds.
    pub time: u64,
}

impl KeyEvent {
    /// A key press with no modifiers at time zero.
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::empty(),
            time: 0,
        }
    }

    /// Set the held modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Set the event timestamp.
    #[must_use]
    pub fn at(mut self, time: u64) -> Self {
        self.time = time;
        self
    }
}

impl From<Key> for KeyEvent {
    fn from(key: Key) -> Self {
        Self::new(key)
    }
}

/// Whether a widget consumed a key event.
///
/// Hosts typically prevent the platform default action and stop propagation
/// for [`KeyOutcome::Handled`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyOutcome {
    /// The widget acted on the key.
    Handled,
    /// The widget did not use the key.
    Ignored,
}

impl KeyOutcome {
    /// Whether the key was handled.
    pub fn is_handled(self) -> bool {
        matches!(self, Self::Handled)
    }
}

/// Layout axis of a list-like widget.
///
/// Vertical lists navigate with Up/Down, horizontal ones with Left/Right.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Items stack top to bottom.
    #[default]
    Vertical,
    /// Items flow left to right.
    Horizontal,
}

impl Orientation {
    /// The key that moves to the previous item.
    pub fn previous_key(self) -> Key {
        match self {
            Self::Vertical => Key::ArrowUp,
            Self::Horizontal => Key::ArrowLeft,
        }
    }

    /// The key that moves to the next item.
    pub fn next_key(self) -> Key {
        match self {
            Self::Vertical => Key::ArrowDown,
            Self::Horizontal => Key::ArrowRight,
        }
    }

    /// Value for `aria-orientation`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientation_swaps_arrow_keys() {
        assert_eq!(Orientation::Vertical.next_key(), Key::ArrowDown);
        assert_eq!(Orientation::Horizontal.next_key(), Key::ArrowRight);
        assert_eq!(Orientation::Horizontal.previous_key(), Key::ArrowLeft);
    }

    #[test]
    fn shift_is_not_a_command_modifier() {
        assert!(!Modifiers::SHIFT.is_command());
        assert!((Modifiers::SHIFT | Modifiers::CTRL).is_command());
        assert!(!Modifiers::empty().is_command());
    }
}
