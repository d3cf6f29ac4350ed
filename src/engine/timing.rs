//! engine::timing
//!
//! Delay policy for the navigation phases.
//!
//! The scroll-settle wait is proportional to how far the page has to scroll
//! back to the top, capped so a long page never stalls navigation. The
//! settle wait after the route commit covers the slide animation plus a
//! fixed padding.

use std::time::Duration;

use serde::Serialize;

/// Timing constants for one navigation sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimingPolicy {
    /// Slide animation duration in milliseconds.
    pub transition_ms: u64,
    /// Padding added to the animation duration before unlocking.
    pub settle_padding_ms: u64,
    /// Milliseconds of wait per unit of scroll offset.
    pub scroll_factor: f64,
    /// Upper bound for the scroll-settle wait.
    pub scroll_cap_ms: u64,
    /// Wait used when already at the top of the page.
    pub min_delay_ms: u64,
}

impl TimingPolicy {
    pub const DEFAULT_TRANSITION_MS: u64 = 600;
    pub const DEFAULT_SETTLE_PADDING_MS: u64 = 100;
    pub const DEFAULT_SCROLL_FACTOR: f64 = 0.5;
    pub const DEFAULT_SCROLL_CAP_MS: u64 = 400;
    pub const DEFAULT_MIN_DELAY_MS: u64 = 10;

    /// Wait before committing the route, given the scroll offset at the
    /// time `navigate_to` was accepted.
    ///
    /// `min(offset * factor, cap)` when scrolled, `min_delay` when at the top.
    /// Negative or non-finite offsets count as "at the top".
    pub fn scroll_settle_delay(&self, scroll_offset: f64) -> Duration {
        if !needs_scroll(scroll_offset) {
            return Duration::from_millis(self.min_delay_ms);
        }
        let proportional = scroll_offset * self.scroll_factor;
        let capped = proportional.min(self.scroll_cap_ms as f64).max(0.0);
        Duration::from_millis(capped.round() as u64)
    }

    /// Wait after the route commit before the lock is released.
    ///
    /// Saturates instead of overflowing for out-of-range settings.
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.transition_ms.saturating_add(self.settle_padding_ms))
    }

    /// Duration of the slide animation.
    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}

impl Default for TimingPolicy {
    fn default() -> Self {
        Self {
            transition_ms: Self::DEFAULT_TRANSITION_MS,
            settle_padding_ms: Self::DEFAULT_SETTLE_PADDING_MS,
            scroll_factor: Self::DEFAULT_SCROLL_FACTOR,
            scroll_cap_ms: Self::DEFAULT_SCROLL_CAP_MS,
            min_delay_ms: Self::DEFAULT_MIN_DELAY_MS,
        }
    }
}

/// Whether a scroll offset requires a scroll-to-top before navigating.
pub fn needs_scroll(scroll_offset: f64) -> bool {
    scroll_offset.is_finite() && scroll_offset > 0.0
}
