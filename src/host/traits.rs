//! host::traits
//!
//! Collaborator traits for the environment hosting the navigation engine.
//!
//! # Design
//!
//! The engine never touches a browser, DOM, or window directly. It asks a
//! [`Router`] to commit route changes and a [`Viewport`] for the scroll
//! position. Committing is async because real routers load the next view;
//! scroll requests are fire-and-forget and the engine waits on its own timer.
//!
//! # Example
//!
//! ```
//! use slideway::core::types::RoutePath;
//! use slideway::host::mock::MockHost;
//! use slideway::host::{HostError, Router};
//!
//! async fn go(router: &dyn Router, path: &RoutePath) -> Result<(), HostError> {
//!     router.commit(path).await
//! }
//!
//! # tokio_test::block_on(async {
//! let host = MockHost::new();
//! let about = RoutePath::new("/about").unwrap();
//! go(&host, &about).await.unwrap();
//! assert_eq!(host.committed(), vec![about]);
//! # });
//! ```

use async_trait::async_trait;
use thiserror::Error;

use crate::core::types::RoutePath;

/// Errors reported by host collaborators.
///
/// The engine logs these and degrades gracefully; none of them reach the
/// caller of `navigate_to`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HostError {
    /// The router has no view for the path.
    #[error("no view registered for route {0}")]
    NotFound(RoutePath),

    /// The router refused the navigation.
    #[error("router rejected navigation: {0}")]
    Rejected(String),

    /// The host environment is gone (page unloading, window closed).
    #[error("host unavailable: {0}")]
    Unavailable(String),
}

/// The routing subsystem that performs the actual view substitution.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so the engine can drive them from
/// a spawned task.
#[async_trait]
pub trait Router: Send + Sync {
    /// Commit a route change to `path`.
    async fn commit(&self, path: &RoutePath) -> Result<(), HostError>;
}

/// The scrollable viewport the site is rendered into.
pub trait Viewport: Send + Sync {
    /// Current vertical scroll offset in pixels. Zero means at the top.
    fn scroll_offset(&self) -> f64;

    /// Ask the host to scroll smoothly to the top. Returns immediately.
    fn scroll_to_top(&self);
}
