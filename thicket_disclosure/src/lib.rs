// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thicket Disclosure: open-state widgets simpler than a combobox.
//!
//! - [`Disclosure`]: a button that shows and hides a panel.
//! - [`Popover`]: a floating panel that closes on Escape, on focus loss, and
//!   on pointer presses outside its button and panel rectangles.
//! - [`Tabs`]: a tab list where exactly one enabled tab is selected.
//! - [`Presence`]: four-phase enter/leave sequencing for animated panels.
//!
//! Like the combobox, these machines never touch the platform. Effects are
//! queued as events (`take_events`) and ARIA attributes are computed as
//! [`Props`](thicket_aria::Props).
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use thicket_aria::{Key, SequentialIds};
//! use thicket_disclosure::{FocusTarget, Popover, PopoverConfig, PopoverEvent};
//!
//! let mut popover = Popover::new(PopoverConfig::default(), &mut SequentialIds::default());
//! popover.set_button_rect(Some(Rect::new(0.0, 0.0, 80.0, 24.0)));
//! popover.set_panel_rect(Some(Rect::new(0.0, 28.0, 240.0, 200.0)));
//!
//! popover.button_click();
//! assert!(popover.is_open());
//!
//! // Escape sends focus back to the button.
//! popover.panel_keydown(Key::Escape.into());
//! assert_eq!(
//!     popover.take_events().last(),
//!     Some(&PopoverEvent::Focus(FocusTarget::Button))
//! );
//!
//! // A press outside closes without moving focus.
//! popover.button_click();
//! assert!(popover.pointer_down(Point::new(400.0, 400.0)));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod disclosure;
mod popover;
mod presence;
mod tabs;

use alloc::string::String;

pub use disclosure::{Disclosure, DisclosureConfig, DisclosureEvent, DisclosureIds};
pub use popover::{Popover, PopoverConfig, PopoverEvent, PopoverIds};
pub use presence::{Phase, Presence};
pub use tabs::{Activation, Tabs, TabsConfig, TabsEvent};

/// Where focus goes when a panel closes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FocusTarget {
    /// The button that opened the panel.
    Button,
    /// An element chosen by the application, by id.
    Element(String),
}
