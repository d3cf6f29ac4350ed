//! present
//!
//! Turns navigation state into what is on screen: the current view plus,
//! while a transition runs, the frozen previous view sliding out.
//!
//! # Modules
//!
//! - [`presenter`] - Layer bookkeeping driven by state snapshots
//! - [`lifecycle`] - Per-view enter/exit lifecycle
//! - [`slide`] - Slide offsets, opacity and easing
//! - [`driver`] - Task that feeds a presenter from a live engine

pub mod driver;
pub mod lifecycle;
pub mod presenter;
pub mod slide;

pub use driver::{spawn_presenter, PresenterHandle};
pub use lifecycle::{LifecycleError, LifecycleEvent, ViewLifecycle};
pub use presenter::{
    Composition, LayerRole, MotionMode, PresenterUpdate, TransitionPresenter, ViewKey, ViewLayer,
};
pub use slide::{ease_in_out_cubic, SlideFrame, SlideSpec};
