//! engine::machine
//!
//! The navigation state machine.
//!
//! # Lifecycle
//!
//! ```text
//! Idle --navigate_to--> ScrollSettling --delay--> Navigating --commit--> Settling --delay--> Idle
//! ```
//!
//! `navigate_to` checks the guard and takes the lock in one atomic update of
//! the shared state, then spawns the timed sequence as a single task. Calls
//! made while the lock is held, or that target the current route, are
//! dropped without error.
//!
//! # Invariants
//!
//! - At most one navigation is in flight
//! - An accepted navigation always runs to `Idle`, even if the router fails
//! - Only the engine writes [`NavigationState`]
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use slideway::engine::{MachineConfig, NavigateOutcome, NavigationMachine};
//! use slideway::host::mock::MockHost;
//! use slideway::core::types::RoutePath;
//!
//! # tokio_test::block_on(async {
//! let host = Arc::new(MockHost::new());
//! let mut config = MachineConfig::default();
//! config.timing.transition_ms = 0;
//! let machine = NavigationMachine::new(config, host.clone(), host.clone());
//!
//! let outcome = machine.navigate_to(RoutePath::new("/about").unwrap());
//! let NavigateOutcome::Started(ticket) = outcome else { panic!("not started") };
//! let report = ticket.finished().await;
//!
//! assert!(report.committed());
//! assert_eq!(machine.reader().current_path().as_str(), "/about");
//! # });
//! ```

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::journal::{Journal, JournalEvent};
use super::phase::NavPhase;
use super::state::{NavigationState, StateReader, TransitionRequest};
use super::timing::{needs_scroll, TimingPolicy};
use crate::core::config::Config;
use crate::core::routes::{RouteTable, UnknownRoutePolicy};
use crate::core::types::RoutePath;
use crate::host::{Router, Viewport};

/// Construction parameters for a [`NavigationMachine`].
#[derive(Debug, Clone)]
pub struct MachineConfig {
    pub routes: RouteTable,
    pub unknown_route_policy: UnknownRoutePolicy,
    pub timing: TimingPolicy,
    /// Route the session starts on. Defaults to the first route in the table.
    pub initial_path: Option<RoutePath>,
    /// Most journal entries kept before the oldest are evicted.
    pub journal_capacity: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            routes: RouteTable::default(),
            unknown_route_policy: UnknownRoutePolicy::default(),
            timing: TimingPolicy::default(),
            initial_path: None,
            journal_capacity: Journal::DEFAULT_CAPACITY,
        }
    }
}

impl From<&Config> for MachineConfig {
    fn from(config: &Config) -> Self {
        Self {
            routes: config.route_table(),
            unknown_route_policy: config.unknown_route_policy(),
            timing: config.timing(),
            ..Default::default()
        }
    }
}

/// Why a `navigate_to` call was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// Another navigation holds the lock.
    AlreadyNavigating,
    /// The destination is the current route.
    SamePath,
}

impl std::fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IgnoreReason::AlreadyNavigating => write!(f, "navigation already in progress"),
            IgnoreReason::SamePath => write!(f, "already on this route"),
        }
    }
}

/// Result of a `navigate_to` call.
#[derive(Debug)]
pub enum NavigateOutcome {
    Started(NavigationTicket),
    Ignored(IgnoreReason),
}

impl NavigateOutcome {
    pub fn is_started(&self) -> bool {
        matches!(self, NavigateOutcome::Started(_))
    }

    /// The ticket, if the navigation was accepted.
    pub fn ticket(self) -> Option<NavigationTicket> {
        match self {
            NavigateOutcome::Started(ticket) => Some(ticket),
            NavigateOutcome::Ignored(_) => None,
        }
    }
}

/// How an accepted navigation ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CommitOutcome {
    Committed,
    Failed { error: String },
    /// The sequence task did not run to completion (it panicked or the
    /// runtime shut down). The lock is still released.
    Aborted,
}

/// Final report for an accepted navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionReport {
    pub request: TransitionRequest,
    pub outcome: CommitOutcome,
}

impl CompletionReport {
    pub fn committed(&self) -> bool {
        self.outcome == CommitOutcome::Committed
    }
}

/// Handle to an accepted navigation.
///
/// Dropping the ticket does not cancel the navigation.
#[derive(Debug)]
pub struct NavigationTicket {
    request: TransitionRequest,
    handle: JoinHandle<CompletionReport>,
}

impl NavigationTicket {
    /// The transition this navigation performs.
    pub fn request(&self) -> &TransitionRequest {
        &self.request
    }

    /// Wait until the navigation has released the lock.
    pub async fn finished(self) -> CompletionReport {
        match self.handle.await {
            Ok(report) => report,
            Err(e) => {
                tracing::error!(error = %e, to = %self.request.to, "navigation task did not complete");
                CompletionReport {
                    request: self.request,
                    outcome: CommitOutcome::Aborted,
                }
            }
        }
    }
}

/// The navigation state machine.
///
/// Cheap to clone; clones drive the same session. Build one per session at
/// the composition root and hand [`StateReader`]s to everything that needs
/// to observe navigation.
#[derive(Clone)]
pub struct NavigationMachine {
    inner: Arc<Inner>,
}

struct Inner {
    routes: RouteTable,
    policy: UnknownRoutePolicy,
    timing: TimingPolicy,
    state: watch::Sender<NavigationState>,
    router: Arc<dyn Router>,
    viewport: Arc<dyn Viewport>,
    journal: Journal,
}

impl std::fmt::Debug for NavigationMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationMachine")
            .field("routes", &self.inner.routes.len())
            .field("policy", &self.inner.policy)
            .field("state", &*self.inner.state.borrow())
            .finish()
    }
}

impl NavigationMachine {
    /// Create a machine in the `Idle` phase.
    pub fn new(config: MachineConfig, router: Arc<dyn Router>, viewport: Arc<dyn Viewport>) -> Self {
        let initial = config
            .initial_path
            .unwrap_or_else(|| config.routes.first().clone());
        let (state, _) = watch::channel(NavigationState::initial(initial));

        Self {
            inner: Arc::new(Inner {
                routes: config.routes,
                policy: config.unknown_route_policy,
                timing: config.timing,
                state,
                router,
                viewport,
                journal: Journal::with_capacity(config.journal_capacity),
            }),
        }
    }

    /// Request navigation to `path`.
    ///
    /// Accepted only when idle and `path` differs from the current route;
    /// otherwise returns [`NavigateOutcome::Ignored`] and changes nothing.
    /// The scroll offset is sampled at call time.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn navigate_to(&self, path: RoutePath) -> NavigateOutcome {
        let inner = &self.inner;
        let mut decision = Err(IgnoreReason::AlreadyNavigating);

        inner.state.send_if_modified(|state| {
            if state.is_navigating {
                decision = Err(IgnoreReason::AlreadyNavigating);
                return false;
            }
            if state.current_path == path {
                decision = Err(IgnoreReason::SamePath);
                return false;
            }

            let direction = inner
                .routes
                .direction(&state.current_path, &path, inner.policy);
            decision = Ok(TransitionRequest {
                from: state.current_path.clone(),
                to: path.clone(),
                direction,
            });

            state.is_navigating = true;
            state.direction = direction;
            state.phase = NavPhase::ScrollSettling;
            true
        });

        let request = match decision {
            Ok(request) => request,
            Err(reason) => {
                tracing::debug!(to = %path, %reason, "navigation ignored");
                inner.journal.record(JournalEvent::Ignored { to: path, reason });
                return NavigateOutcome::Ignored(reason);
            }
        };

        tracing::info!(
            from = %request.from,
            to = %request.to,
            direction = %request.direction,
            "navigation accepted"
        );
        inner.journal.record(JournalEvent::Accepted {
            from: request.from.clone(),
            to: request.to.clone(),
            direction: request.direction,
        });
        inner.journal.record(JournalEvent::PhaseEntered {
            phase: NavPhase::ScrollSettling,
        });

        let scroll_offset = inner.viewport.scroll_offset();
        let handle = tokio::spawn(run_sequence(
            Arc::clone(&self.inner),
            request.clone(),
            scroll_offset,
        ));

        NavigateOutcome::Started(NavigationTicket { request, handle })
    }

    /// Record a route change that did not go through `navigate_to`, such as
    /// history back/forward.
    ///
    /// Ignored while a navigation is in flight or when `path` is already
    /// current. Returns whether the state changed.
    pub fn notify_route_changed(&self, path: RoutePath) -> bool {
        let inner = &self.inner;
        let mut direction = None;

        let changed = inner.state.send_if_modified(|state| {
            if state.is_navigating || state.current_path == path {
                return false;
            }
            let d = inner
                .routes
                .direction(&state.current_path, &path, inner.policy);
            state.current_path = path.clone();
            state.direction = d;
            direction = Some(d);
            true
        });

        if let Some(direction) = direction {
            tracing::debug!(route = %path, %direction, "external route change");
            inner
                .journal
                .record(JournalEvent::RouteNotified { path, direction });
        }
        changed
    }

    /// A read-only handle to the navigation state.
    pub fn reader(&self) -> StateReader {
        StateReader::new(self.inner.state.subscribe())
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> NavigationState {
        self.inner.state.borrow().clone()
    }

    pub fn routes(&self) -> &RouteTable {
        &self.inner.routes
    }

    pub fn timing(&self) -> &TimingPolicy {
        &self.inner.timing
    }

    pub fn unknown_route_policy(&self) -> UnknownRoutePolicy {
        self.inner.policy
    }

    /// The session journal.
    pub fn journal(&self) -> &Journal {
        &self.inner.journal
    }
}

/// Run an accepted navigation from `ScrollSettling` back to `Idle`.
async fn run_sequence(
    inner: Arc<Inner>,
    request: TransitionRequest,
    scroll_offset: f64,
) -> CompletionReport {
    let release = LockRelease {
        inner: Arc::clone(&inner),
        to: request.to.clone(),
    };

    let wait = inner.timing.scroll_settle_delay(scroll_offset);
    if needs_scroll(scroll_offset) {
        inner.viewport.scroll_to_top();
        inner.journal.record(JournalEvent::ScrollRequested {
            offset: scroll_offset,
            wait_ms: wait.as_millis() as u64,
        });
    }
    tokio::time::sleep(wait).await;

    enter_phase(&inner, NavPhase::Navigating);

    let outcome = match inner.router.commit(&request.to).await {
        Ok(()) => {
            inner.state.send_modify(|state| {
                state.current_path = request.to.clone();
            });
            inner.journal.record(JournalEvent::Committed {
                path: request.to.clone(),
            });
            CommitOutcome::Committed
        }
        Err(e) => {
            tracing::warn!(to = %request.to, error = %e, "route commit failed");
            inner.journal.record(JournalEvent::CommitFailed {
                path: request.to.clone(),
                error: e.to_string(),
            });
            CommitOutcome::Failed {
                error: e.to_string(),
            }
        }
    };

    enter_phase(&inner, NavPhase::Settling);
    tokio::time::sleep(inner.timing.settle_delay()).await;

    drop(release);
    CompletionReport { request, outcome }
}

/// Returns the engine to `Idle` when dropped.
///
/// Held for the whole sequence so the lock is released even when the task
/// panics (for example inside a `Router`) or is cancelled.
struct LockRelease {
    inner: Arc<Inner>,
    to: RoutePath,
}

impl Drop for LockRelease {
    fn drop(&mut self) {
        self.inner.state.send_modify(|state| {
            state.is_navigating = false;
            state.phase = NavPhase::Idle;
        });
        self.inner.journal.record(JournalEvent::PhaseEntered {
            phase: NavPhase::Idle,
        });
        if std::thread::panicking() {
            tracing::error!(to = %self.to, "navigation sequence panicked, lock released");
        } else {
            tracing::debug!(to = %self.to, "navigation lock released");
        }
    }
}

fn enter_phase(inner: &Inner, phase: NavPhase) {
    inner.state.send_modify(|state| {
        debug_assert!(state.phase.can_advance_to(phase));
        state.phase = phase;
    });
    inner.journal.record(JournalEvent::PhaseEntered { phase });
    tracing::debug!(%phase, "phase entered");
}
