//! host
//!
//! Abstraction over the environment the navigation engine runs in.
//!
//! # Modules
//!
//! - [`traits`] - `Router` and `Viewport` collaborator traits
//! - [`mock`] - Recording mock host for tests
//! - [`console`] - Terminal host used by the simulator
//!
//! # Design
//!
//! Host adapters:
//! - Are called only by the navigation engine, never by presenters
//! - May fail without corrupting navigation state
//! - Never block the engine; scroll requests are fire-and-forget

pub mod console;
pub mod mock;
pub mod traits;

pub use console::ConsoleHost;
pub use traits::{HostError, Router, Viewport};
