//! present::presenter
//!
//! Layered composition of the current view and, during a transition, the
//! frozen previous view.
//!
//! # Invariants
//!
//! - Exactly one layer is current
//! - At most one layer is previous; a newer route change discards it
//! - The previous layer holds the state snapshot it had when it was frozen
//!   and never receives later updates
//! - Under reduced motion the composition is always just the current view

use serde::Serialize;

use super::lifecycle::{LifecycleError, LifecycleEvent, ViewLifecycle};
use super::slide::SlideSpec;
use crate::core::types::{Direction, RoutePath};
use crate::engine::NavigationState;

/// Identifies one mounted view across updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ViewKey(pub u64);

impl std::fmt::Display for ViewKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "view#{}", self.0)
    }
}

/// Whether animations run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionMode {
    #[default]
    Animated,
    /// Swap views immediately, no slide.
    Reduced,
}

/// Role of a layer in the composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerRole {
    Current,
    Previous,
}

/// One rendered view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewLayer {
    pub key: ViewKey,
    pub path: RoutePath,
    pub role: LayerRole,
    pub lifecycle: ViewLifecycle,
    pub slide: SlideSpec,
    /// Live state for the current layer, frozen snapshot for the previous one.
    pub state: NavigationState,
}

/// What the presenter renders, bottom layer first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Composition {
    pub layers: Vec<ViewLayer>,
}

impl Composition {
    pub fn current(&self) -> Option<&ViewLayer> {
        self.layers.iter().find(|l| l.role == LayerRole::Current)
    }

    pub fn previous(&self) -> Option<&ViewLayer> {
        self.layers.iter().find(|l| l.role == LayerRole::Previous)
    }

    /// A single steady view.
    pub fn is_converged(&self) -> bool {
        matches!(self.layers.as_slice(), [only] if only.lifecycle == ViewLifecycle::Steady)
    }
}

/// Animations an observer should schedule after an update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresenterUpdate {
    /// New current view whose enter animation started.
    pub entering: Option<ViewKey>,
    /// Frozen view whose exit animation started.
    pub exiting: Option<ViewKey>,
    /// Views dropped without finishing their exit.
    pub discarded: Vec<ViewKey>,
}

impl PresenterUpdate {
    pub fn is_empty(&self) -> bool {
        self.entering.is_none() && self.exiting.is_none() && self.discarded.is_empty()
    }
}

/// Builds the layered composition from navigation state snapshots.
#[derive(Debug, Clone)]
pub struct TransitionPresenter {
    mode: MotionMode,
    current: ViewLayer,
    previous: Option<ViewLayer>,
    next_key: u64,
}

impl TransitionPresenter {
    /// Mount the initial view.
    ///
    /// The first view fades in without directional bias; under reduced
    /// motion it starts steady.
    pub fn new(initial: &NavigationState, mode: MotionMode) -> Self {
        let (lifecycle, slide) = match mode {
            MotionMode::Animated => (
                ViewLifecycle::Entering,
                SlideSpec::enter(Direction::Neutral),
            ),
            MotionMode::Reduced => (ViewLifecycle::Steady, SlideSpec::still()),
        };

        Self {
            mode,
            current: ViewLayer {
                key: ViewKey(0),
                path: initial.current_path.clone(),
                role: LayerRole::Current,
                lifecycle,
                slide,
                state: initial.clone(),
            },
            previous: None,
            next_key: 1,
        }
    }

    pub fn mode(&self) -> MotionMode {
        self.mode
    }

    /// Feed a navigation state snapshot.
    ///
    /// A new `current_path` freezes the current view as previous and mounts
    /// a new current view sliding in the state's direction. Any other change
    /// only updates the current view.
    pub fn observe(&mut self, state: &NavigationState) -> PresenterUpdate {
        let mut update = PresenterUpdate::default();

        if state.current_path == self.current.path {
            self.current.state = state.clone();
            return update;
        }

        if let Some(stale) = self.previous.take() {
            update.discarded.push(stale.key);
        }

        let key = ViewKey(self.next_key);
        self.next_key += 1;

        let incoming = match self.mode {
            MotionMode::Animated => ViewLayer {
                key,
                path: state.current_path.clone(),
                role: LayerRole::Current,
                lifecycle: ViewLifecycle::Entering,
                slide: SlideSpec::enter(state.direction),
                state: state.clone(),
            },
            MotionMode::Reduced => ViewLayer {
                key,
                path: state.current_path.clone(),
                role: LayerRole::Current,
                lifecycle: ViewLifecycle::Steady,
                slide: SlideSpec::still(),
                state: state.clone(),
            },
        };

        let mut outgoing = std::mem::replace(&mut self.current, incoming);

        match self.mode {
            MotionMode::Animated => {
                outgoing.role = LayerRole::Previous;
                outgoing.lifecycle = outgoing
                    .lifecycle
                    .advance(LifecycleEvent::Exit)
                    .unwrap_or(ViewLifecycle::Exiting);
                outgoing.slide = SlideSpec::exit(state.direction);
                update.exiting = Some(outgoing.key);
                update.entering = Some(key);
                self.previous = Some(outgoing);
            }
            MotionMode::Reduced => {
                update.discarded.push(outgoing.key);
            }
        }

        update
    }

    /// The enter animation of `key` finished.
    ///
    /// Returns `Ok(false)` for a key that is no longer mounted.
    pub fn enter_complete(&mut self, key: ViewKey) -> Result<bool, LifecycleError> {
        if self.current.key == key {
            self.current.lifecycle = self
                .current
                .lifecycle
                .advance(LifecycleEvent::EnterComplete)?;
            return Ok(true);
        }
        // A view interrupted while entering is already exiting.
        Ok(false)
    }

    /// The exit animation of `key` finished; the view is unmounted.
    ///
    /// Returns `Ok(false)` for a key that is no longer mounted, and an error
    /// if `key` is the current view.
    pub fn exit_complete(&mut self, key: ViewKey) -> Result<bool, LifecycleError> {
        if self.current.key == key {
            return Err(LifecycleError {
                from: self.current.lifecycle,
                event: LifecycleEvent::ExitComplete,
            });
        }
        match self.previous.take() {
            Some(prev) if prev.key == key => {
                prev.lifecycle.advance(LifecycleEvent::ExitComplete)?;
                Ok(true)
            }
            other => {
                self.previous = other;
                Ok(false)
            }
        }
    }

    /// The current layered composition.
    pub fn composition(&self) -> Composition {
        let mut layers = Vec::with_capacity(2);
        if let Some(prev) = &self.previous {
            layers.push(prev.clone());
        }
        layers.push(self.current.clone());
        Composition { layers }
    }

    pub fn current(&self) -> &ViewLayer {
        &self.current
    }

    pub fn previous(&self) -> Option<&ViewLayer> {
        self.previous.as_ref()
    }

    /// Only the current view is rendered and it is not animating.
    pub fn is_converged(&self) -> bool {
        self.previous.is_none() && self.current.lifecycle == ViewLifecycle::Steady
    }
}
