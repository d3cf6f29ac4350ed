//! engine
//!
//! The navigation engine: a single state machine that serializes page
//! transitions.
//!
//! # Architecture
//!
//! ```text
//! navigate_to -> guard + lock -> ScrollSettling -> Navigating -> Settling -> Idle
//! ```
//!
//! 1. **Guard**: reject the call if a navigation is in flight or the route is current
//! 2. **ScrollSettling**: scroll to top and wait a scroll-proportional delay
//! 3. **Navigating**: commit the route through the host router
//! 4. **Settling**: wait for the slide animation, then release the lock
//!
//! # Invariants
//!
//! - Transitions are strictly serialized by the lock
//! - Guard failures are silent; no error ever reaches the caller
//! - Consumers only read state through [`StateReader`]
//!
//! # Modules
//!
//! - [`machine`] - The state machine and its navigation tickets
//! - [`state`] - Observable state and the read-only reader
//! - [`phase`] - Phase enum and legal successors
//! - [`timing`] - Delay policy
//! - [`journal`] - Bounded session journal

pub mod journal;
pub mod machine;
pub mod phase;
pub mod state;
pub mod timing;

pub use journal::{Journal, JournalEntry, JournalEvent};
pub use machine::{
    CommitOutcome, CompletionReport, IgnoreReason, MachineConfig, NavigateOutcome,
    NavigationMachine, NavigationTicket,
};
pub use phase::NavPhase;
pub use state::{NavigationState, ReaderClosed, StateReader, TransitionRequest};
pub use timing::TimingPolicy;
