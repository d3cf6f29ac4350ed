//! present::slide
//!
//! Vertical slide geometry for entering and exiting views.
//!
//! Offsets are fractions of the viewport height: `+1.0` is one screen below,
//! `-1.0` one screen above, `0.0` in place.
//!
//! | direction | entering view   | exiting view   |
//! |-----------|-----------------|----------------|
//! | forward   | bottom -> place | place -> top   |
//! | backward  | top -> place    | place -> bottom|
//! | neutral   | fade in         | fade out       |

use serde::Serialize;

use crate::core::types::Direction;

/// Cubic ease-in-out. `t` is clamped to [0, 1].
#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Start and end of one view's slide.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SlideSpec {
    pub from_offset: f32,
    pub to_offset: f32,
    pub from_opacity: f32,
    pub to_opacity: f32,
}

/// A sampled point of a slide.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SlideFrame {
    pub offset: f32,
    pub opacity: f32,
}

impl SlideSpec {
    /// Slide for the incoming view.
    pub fn enter(direction: Direction) -> Self {
        Self {
            from_offset: direction.signum() as f32,
            to_offset: 0.0,
            from_opacity: 0.0,
            to_opacity: 1.0,
        }
    }

    /// Slide for the outgoing view.
    pub fn exit(direction: Direction) -> Self {
        Self {
            from_offset: 0.0,
            to_offset: -(direction.signum() as f32),
            from_opacity: 1.0,
            to_opacity: 0.0,
        }
    }

    /// No motion: fully visible, in place.
    pub fn still() -> Self {
        Self {
            from_offset: 0.0,
            to_offset: 0.0,
            from_opacity: 1.0,
            to_opacity: 1.0,
        }
    }

    /// Sample at linear progress `t` in [0, 1], eased.
    pub fn sample(&self, t: f32) -> SlideFrame {
        let e = ease_in_out_cubic(t);
        SlideFrame {
            offset: self.from_offset + (self.to_offset - self.from_offset) * e,
            opacity: self.from_opacity + (self.to_opacity - self.from_opacity) * e,
        }
    }

    /// The resting frame once the slide has finished.
    pub fn end(&self) -> SlideFrame {
        SlideFrame {
            offset: self.to_offset,
            opacity: self.to_opacity,
        }
    }
}
