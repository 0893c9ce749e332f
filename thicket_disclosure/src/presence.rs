// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Enter/leave sequencing for panels that animate.
//!
//! A panel that fades out has to stay mounted until its leave transition
//! finishes, and one that fades in must be mounted before it becomes visible.
//! [`Presence`] tracks that with four phases:
//!
//! ```text
//! Hidden --show--> Entering --finish--> Visible --hide--> Leaving --finish--> Hidden
//! ```
//!
//! The host calls [`Presence::finish`] when its transition ends. Reversing
//! mid-transition (`hide` while entering, `show` while leaving) jumps straight
//! to the opposite transition. Without transitions, `show` and `hide` land on
//! the final phase immediately.

/// Transition phase of a panel.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Not rendered.
    #[default]
    Hidden,
    /// Rendered, enter transition running.
    Entering,
    /// Rendered and settled.
    Visible,
    /// Rendered, leave transition running.
    Leaving,
}

/// Four-phase presence machine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Presence {
    phase: Phase,
    transitions: bool,
}

impl Presence {
    /// Start settled in the open or closed phase, without transitions.
    pub fn new(open: bool) -> Self {
        Self {
            phase: if open { Phase::Visible } else { Phase::Hidden },
            transitions: false,
        }
    }

    /// Run enter and leave transitions that the host finishes.
    #[must_use]
    pub fn with_transitions(mut self, transitions: bool) -> Self {
        self.transitions = transitions;
        self
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the host should keep the panel mounted.
    pub fn is_rendered(&self) -> bool {
        self.phase != Phase::Hidden
    }

    /// Whether a transition is running.
    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, Phase::Entering | Phase::Leaving)
    }

    /// Begin showing.
    pub fn show(&mut self) {
        self.phase = match self.phase {
            Phase::Hidden | Phase::Leaving if self.transitions => Phase::Entering,
            Phase::Hidden | Phase::Leaving => Phase::Visible,
            settled => settled,
        };
    }

    /// Begin hiding.
    pub fn hide(&mut self) {
        self.phase = match self.phase {
            Phase::Visible | Phase::Entering if self.transitions => Phase::Leaving,
            Phase::Visible | Phase::Entering => Phase::Hidden,
            settled => settled,
        };
    }

    /// The host's transition ended.
    ///
    /// Returns `true` if the phase changed.
    pub fn finish(&mut self) -> bool {
        let next = match self.phase {
            Phase::Entering => Phase::Visible,
            Phase::Leaving => Phase::Hidden,
            _ => return false,
        };
        tracing::trace!(from = ?self.phase, to = ?next, "presence transition finished");
        self.phase = next;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_cycle_with_transitions() {
        let mut p = Presence::new(false).with_transitions(true);
        assert!(!p.is_rendered());
        p.show();
        assert_eq!(p.phase(), Phase::Entering);
        assert!(p.is_rendered() && p.is_transitioning());
        assert!(p.finish());
        assert_eq!(p.phase(), Phase::Visible);
        assert!(!p.finish());
        p.hide();
        assert_eq!(p.phase(), Phase::Leaving);
        assert!(p.is_rendered());
        p.finish();
        assert_eq!(p.phase(), Phase::Hidden);
    }

    #[test]
    fn reversing_mid_transition() {
        let mut p = Presence::new(false).with_transitions(true);
        p.show();
        p.hide();
        assert_eq!(p.phase(), Phase::Leaving);
        p.show();
        assert_eq!(p.phase(), Phase::Entering);
    }

    #[test]
    fn without_transitions_phases_settle_immediately() {
        let mut p = Presence::new(true);
        assert_eq!(p.phase(), Phase::Visible);
        p.hide();
        assert_eq!(p.phase(), Phase::Hidden);
        p.show();
        p.show();
        assert_eq!(p.phase(), Phase::Visible);
    }
}
