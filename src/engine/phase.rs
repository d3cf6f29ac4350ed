//! engine::phase
//!
//! Phases of a navigation sequence.
//!
//! ```text
//! Idle -> ScrollSettling -> Navigating -> Settling -> Idle
//! ```
//!
//! Every phase other than `Idle` holds the navigation lock.

use serde::Serialize;

/// A phase of the navigation state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavPhase {
    /// No navigation in flight; `navigate_to` is accepted.
    #[default]
    Idle,
    /// Waiting for the page to scroll back to the top.
    ScrollSettling,
    /// Committing the route change.
    Navigating,
    /// Waiting for the slide animation to finish.
    Settling,
}

impl NavPhase {
    /// The phase that follows this one in a sequence.
    pub fn next(self) -> NavPhase {
        match self {
            NavPhase::Idle => NavPhase::ScrollSettling,
            NavPhase::ScrollSettling => NavPhase::Navigating,
            NavPhase::Navigating => NavPhase::Settling,
            NavPhase::Settling => NavPhase::Idle,
        }
    }

    /// Whether `next` is the only legal successor of this phase.
    pub fn can_advance_to(self, next: NavPhase) -> bool {
        self.next() == next
    }

    /// Whether this phase holds the navigation lock.
    pub fn is_locked(self) -> bool {
        self != NavPhase::Idle
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NavPhase::Idle => "idle",
            NavPhase::ScrollSettling => "scroll_settling",
            NavPhase::Navigating => "navigating",
            NavPhase::Settling => "settling",
        }
    }
}

impl std::fmt::Display for NavPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
