//! host::console
//!
//! A host that simulates a page in the terminal. Used by `slideway simulate`.
//!
//! Route commits and scroll requests are reported through `tracing`; the
//! scroll offset is a plain value the caller sets before each navigation.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use super::traits::{HostError, Router, Viewport};
use crate::core::routes::RouteTable;
use crate::core::types::RoutePath;

/// Simulated router and viewport.
#[derive(Debug)]
pub struct ConsoleHost {
    routes: RouteTable,
    strict: bool,
    /// f64 bits, so the offset can be read without locking.
    scroll_bits: AtomicU64,
    current: Mutex<Option<RoutePath>>,
}

impl ConsoleHost {
    /// Create a console host serving `routes`.
    ///
    /// When `strict` is set, committing a route not in the table fails with
    /// [`HostError::NotFound`], mimicking a router without a catch-all page.
    pub fn new(routes: RouteTable, strict: bool) -> Self {
        Self {
            routes,
            strict,
            scroll_bits: AtomicU64::new(0f64.to_bits()),
            current: Mutex::new(None),
        }
    }

    /// Set the simulated scroll offset.
    pub fn set_scroll_offset(&self, offset: f64) {
        self.scroll_bits.store(offset.to_bits(), Ordering::SeqCst);
    }

    /// The last route committed.
    pub fn current_route(&self) -> Option<RoutePath> {
        self.current
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Router for ConsoleHost {
    async fn commit(&self, path: &RoutePath) -> Result<(), HostError> {
        if self.strict && !self.routes.contains(path) {
            tracing::warn!(route = %path, "no view for route");
            return Err(HostError::NotFound(path.clone()));
        }
        tracing::info!(route = %path, "route committed");
        *self
            .current
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(path.clone());
        Ok(())
    }
}

impl Viewport for ConsoleHost {
    fn scroll_offset(&self) -> f64 {
        f64::from_bits(self.scroll_bits.load(Ordering::SeqCst))
    }

    fn scroll_to_top(&self) {
        tracing::info!(from = self.scroll_offset(), "smooth scroll to top");
        self.set_scroll_offset(0.0);
    }
}
