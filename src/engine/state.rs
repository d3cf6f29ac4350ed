//! engine::state
//!
//! Observable navigation state and the read-only handle consumers use.
//!
//! # Ownership
//!
//! The [`NavigationMachine`](super::machine::NavigationMachine) holds the
//! only writer. Everything else (presenters, menus, the CLI) reads through
//! a [`StateReader`], which can be cloned freely.

use serde::Serialize;
use thiserror::Error;
use tokio::sync::watch;

use super::phase::NavPhase;
use crate::core::types::{Direction, RoutePath};

/// The state shared with presentational collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationState {
    /// The route currently committed.
    pub current_path: RoutePath,
    /// The navigation lock.
    pub is_navigating: bool,
    /// Direction of the most recent route change.
    pub direction: Direction,
    /// Phase of the in-flight navigation, `Idle` when unlocked.
    pub phase: NavPhase,
}

impl NavigationState {
    /// State at session start: unlocked, no directional bias.
    pub fn initial(current_path: RoutePath) -> Self {
        Self {
            current_path,
            is_navigating: false,
            direction: Direction::Neutral,
            phase: NavPhase::Idle,
        }
    }
}

/// One accepted navigation: where from, where to, which way.
///
/// Produced once when `navigate_to` is accepted and handed to whoever
/// animates the change. Not retained by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionRequest {
    pub from: RoutePath,
    pub to: RoutePath,
    pub direction: Direction,
}

/// The navigation engine has been dropped.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("navigation engine closed")]
pub struct ReaderClosed;

/// Read-only access to [`NavigationState`].
#[derive(Debug, Clone)]
pub struct StateReader {
    rx: watch::Receiver<NavigationState>,
}

impl StateReader {
    pub(crate) fn new(rx: watch::Receiver<NavigationState>) -> Self {
        Self { rx }
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> NavigationState {
        self.rx.borrow().clone()
    }

    pub fn current_path(&self) -> RoutePath {
        self.rx.borrow().current_path.clone()
    }

    pub fn is_navigating(&self) -> bool {
        self.rx.borrow().is_navigating
    }

    pub fn direction(&self) -> Direction {
        self.rx.borrow().direction
    }

    pub fn phase(&self) -> NavPhase {
        self.rx.borrow().phase
    }

    /// Wait for the next state change and return the new state.
    ///
    /// Intermediate states may be coalesced; use the engine journal when
    /// every phase must be observed.
    pub async fn changed(&mut self) -> Result<NavigationState, ReaderClosed> {
        self.rx.changed().await.map_err(|_| ReaderClosed)?;
        Ok(self.rx.borrow_and_update().clone())
    }

    /// Wait until the navigation lock is released.
    ///
    /// Returns immediately if no navigation is in flight.
    pub async fn wait_idle(&mut self) -> Result<NavigationState, ReaderClosed> {
        let state = self
            .rx
            .wait_for(|s| !s.is_navigating)
            .await
            .map_err(|_| ReaderClosed)?;
        Ok((*state).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_is_unlocked_and_neutral() {
        let state = NavigationState::initial(RoutePath::root());
        assert!(!state.is_navigating);
        assert_eq!(state.direction, Direction::Neutral);
        assert_eq!(state.phase, NavPhase::Idle);
    }

    #[tokio::test]
    async fn reader_sees_updates() {
        let (tx, rx) = watch::channel(NavigationState::initial(RoutePath::root()));
        let mut reader = StateReader::new(rx);

        tx.send_modify(|s| {
            s.is_navigating = true;
            s.phase = NavPhase::ScrollSettling;
        });

        let state = reader.changed().await.unwrap();
        assert!(state.is_navigating);
        assert_eq!(reader.phase(), NavPhase::ScrollSettling);
    }

    #[tokio::test]
    async fn wait_idle_returns_immediately_when_unlocked() {
        let (_tx, rx) = watch::channel(NavigationState::initial(RoutePath::root()));
        let mut reader = StateReader::new(rx);
        let state = reader.wait_idle().await.unwrap();
        assert_eq!(state.current_path, RoutePath::root());
    }

    #[tokio::test]
    async fn closed_when_writer_dropped() {
        let (tx, rx) = watch::channel(NavigationState::initial(RoutePath::root()));
        let mut reader = StateReader::new(rx);
        drop(tx);
        assert_eq!(reader.changed().await, Err(ReaderClosed));
    }
}
