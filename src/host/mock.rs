//! host::mock
//!
//! Mock host implementation for deterministic testing.
//!
//! # Design
//!
//! [`MockHost`] implements both [`Router`] and [`Viewport`]. It records every
//! call in order so tests can assert on the exact sequence of side effects,
//! and it can be configured to fail route commits.
//!
//! # Example
//!
//! ```
//! use slideway::host::mock::{HostOperation, MockHost};
//! use slideway::host::{Router, Viewport};
//! use slideway::core::types::RoutePath;
//!
//! # tokio_test::block_on(async {
//! let host = MockHost::with_scroll(640.0);
//! host.scroll_to_top();
//! host.commit(&RoutePath::new("/about").unwrap()).await.unwrap();
//!
//! assert_eq!(host.scroll_offset(), 0.0);
//! assert_eq!(
//!     host.operations(),
//!     vec![
//!         HostOperation::ScrollToTop { from_offset: 640.0 },
//!         HostOperation::Commit { path: RoutePath::new("/about").unwrap() },
//!     ]
//! );
//! # });
//! ```

use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::traits::{HostError, Router, Viewport};
use crate::core::types::RoutePath;

/// Mock host for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockHost {
    inner: Arc<Mutex<MockHostInner>>,
}

#[derive(Debug, Default)]
struct MockHostInner {
    scroll_offset: f64,
    current_route: Option<RoutePath>,
    fail_commits: Option<HostError>,
    operations: Vec<HostOperation>,
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq)]
pub enum HostOperation {
    ScrollToTop { from_offset: f64 },
    Commit { path: RoutePath },
    CommitFailed { path: RoutePath, error: HostError },
}

impl MockHost {
    /// Create a mock host scrolled to the top.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock host scrolled down by `offset` pixels.
    pub fn with_scroll(offset: f64) -> Self {
        let host = Self::new();
        host.set_scroll_offset(offset);
        host
    }

    fn lock(&self) -> MutexGuard<'_, MockHostInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Simulate the user scrolling.
    pub fn set_scroll_offset(&self, offset: f64) {
        self.lock().scroll_offset = offset;
    }

    /// Make every subsequent commit fail with `error`.
    pub fn fail_commits_with(&self, error: HostError) {
        self.lock().fail_commits = Some(error);
    }

    /// Clear a configured commit failure.
    pub fn clear_failure(&self) {
        self.lock().fail_commits = None;
    }

    /// All recorded operations, in call order.
    pub fn operations(&self) -> Vec<HostOperation> {
        self.lock().operations.clone()
    }

    /// Paths committed successfully, in order.
    pub fn committed(&self) -> Vec<RoutePath> {
        self.lock()
            .operations
            .iter()
            .filter_map(|op| match op {
                HostOperation::Commit { path } => Some(path.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of scroll-to-top requests received.
    pub fn scroll_requests(&self) -> usize {
        self.lock()
            .operations
            .iter()
            .filter(|op| matches!(op, HostOperation::ScrollToTop { .. }))
            .count()
    }

    /// The route the router last committed to.
    pub fn current_route(&self) -> Option<RoutePath> {
        self.lock().current_route.clone()
    }
}

#[async_trait]
impl Router for MockHost {
    async fn commit(&self, path: &RoutePath) -> Result<(), HostError> {
        let mut inner = self.lock();
        if let Some(error) = inner.fail_commits.clone() {
            inner.operations.push(HostOperation::CommitFailed {
                path: path.clone(),
                error: error.clone(),
            });
            return Err(error);
        }
        inner.current_route = Some(path.clone());
        inner.operations.push(HostOperation::Commit { path: path.clone() });
        Ok(())
    }
}

impl Viewport for MockHost {
    fn scroll_offset(&self) -> f64 {
        self.lock().scroll_offset
    }

    fn scroll_to_top(&self) {
        let mut inner = self.lock();
        let from_offset = inner.scroll_offset;
        inner.operations.push(HostOperation::ScrollToTop { from_offset });
        inner.scroll_offset = 0.0;
    }
}
