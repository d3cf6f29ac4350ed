//! Slideway - directional page transitions with a navigation lock
//!
//! Slideway serializes page navigation for sites that animate between
//! routes. A navigation scrolls the page to the top, commits the route,
//! then holds a lock while the slide animation plays. Requests that arrive
//! while the lock is held are dropped, so rapid clicks can never stack
//! overlapping transitions.
//!
//! # Architecture
//!
//! - [`core`] - Route paths, the ordered route table, and configuration
//! - [`engine`] - The navigation state machine, timing policy, and journal
//! - [`host`] - Router and viewport traits, with mock and console hosts
//! - [`present`] - Layered current/previous view composition and slides
//! - [`cli`] - Command-line interface layer
//! - [`logging`] - Diagnostic logging setup
//! - [`ui`] - User-facing terminal output
//!
//! # Correctness Invariants
//!
//! 1. At most one navigation is in flight at any time
//! 2. The lock is always released, even when the router fails
//! 3. Direction is derived from route table order alone
//! 4. Only the engine mutates navigation state

pub mod cli;
pub mod core;
pub mod engine;
pub mod host;
pub mod logging;
pub mod present;
pub mod ui;
