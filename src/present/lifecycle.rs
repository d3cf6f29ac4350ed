//! present::lifecycle
//!
//! Per-view lifecycle during a transition.
//!
//! ```text
//! Entering --enter_complete--> Steady --exit--> Exiting --exit_complete--> Removed
//!     \______________________exit_______________/
//! ```
//!
//! A view that is still entering when the next route arrives goes straight
//! to `Exiting`. `Removed` is terminal.

use serde::Serialize;
use thiserror::Error;

/// Lifecycle state of one rendered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewLifecycle {
    Entering,
    Steady,
    Exiting,
    Removed,
}

/// Events that drive a view's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleEvent {
    /// The enter animation finished.
    EnterComplete,
    /// The route moved on; start the exit animation.
    Exit,
    /// The exit animation finished.
    ExitComplete,
}

/// An event that is not legal in the view's current lifecycle state.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("illegal lifecycle transition: {event:?} while {from:?}")]
pub struct LifecycleError {
    pub from: ViewLifecycle,
    pub event: LifecycleEvent,
}

impl ViewLifecycle {
    /// Apply `event`, returning the next state.
    pub fn advance(self, event: LifecycleEvent) -> Result<ViewLifecycle, LifecycleError> {
        use LifecycleEvent::*;
        use ViewLifecycle::*;

        match (self, event) {
            (Entering, EnterComplete) => Ok(Steady),
            (Entering, Exit) | (Steady, Exit) => Ok(Exiting),
            (Exiting, ExitComplete) => Ok(Removed),
            (from, event) => Err(LifecycleError { from, event }),
        }
    }

    /// Whether the view is still rendered.
    pub fn is_visible(self) -> bool {
        self != ViewLifecycle::Removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_path() {
        let state = ViewLifecycle::Entering
            .advance(LifecycleEvent::EnterComplete)
            .and_then(|s| s.advance(LifecycleEvent::Exit))
            .and_then(|s| s.advance(LifecycleEvent::ExitComplete))
            .unwrap();
        assert_eq!(state, ViewLifecycle::Removed);
        assert!(!state.is_visible());
    }

    #[test]
    fn interrupted_enter_exits() {
        assert_eq!(
            ViewLifecycle::Entering.advance(LifecycleEvent::Exit),
            Ok(ViewLifecycle::Exiting)
        );
    }

    #[test]
    fn removed_is_terminal() {
        for event in [
            LifecycleEvent::EnterComplete,
            LifecycleEvent::Exit,
            LifecycleEvent::ExitComplete,
        ] {
            assert!(ViewLifecycle::Removed.advance(event).is_err());
        }
    }

    #[test]
    fn steady_cannot_complete_exit() {
        let err = ViewLifecycle::Steady
            .advance(LifecycleEvent::ExitComplete)
            .unwrap_err();
        assert_eq!(err.from, ViewLifecycle::Steady);
        assert_eq!(err.event, LifecycleEvent::ExitComplete);
    }

    #[test]
    fn exiting_cannot_reenter() {
        assert!(ViewLifecycle::Exiting
            .advance(LifecycleEvent::EnterComplete)
            .is_err());
    }
}
