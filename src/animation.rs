//! Time-based interpolation of view transforms and scalar fades.
//!
//! Transitions are driven by explicit timestamps so that callers (render
//! backends, tests) control the clock. Starting a new transition replaces the
//! running one; there is no queueing.

use std::time::{Duration, Instant};

use crate::transform::ViewTransform;

const RHO: f64 = std::f64::consts::SQRT_2;
const RHO2: f64 = 2.0;
const RHO4: f64 = 4.0;
const EPSILON2: f64 = 1e-12;

/// Cubic in-out easing on `[0, 1]`.
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// A view expressed as a center in base coordinates and a visible width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomView {
    /// Center X in base coordinates.
    pub cx: f64,
    /// Center Y in base coordinates.
    pub cy: f64,
    /// Visible width in base units.
    pub width: f64,
}

/// Smooth pan-and-zoom interpolator between two views.
///
/// Follows the optimal path of van Wijk and Nuij, "Smooth and efficient
/// zooming and panning", which zooms out while travelling and back in on
/// arrival.
#[derive(Debug, Clone, Copy)]
pub struct ZoomInterpolator {
    start: ZoomView,
    dx: f64,
    dy: f64,
    path: ZoomPath,
}

#[derive(Debug, Clone, Copy)]
enum ZoomPath {
    /// Start and end share a center; only the width changes.
    Scale { s: f64 },
    /// General path.
    Arc { d1: f64, r0: f64, s: f64 },
}

impl ZoomInterpolator {
    /// Build an interpolator from `start` to `end`.
    pub fn new(start: ZoomView, end: ZoomView) -> Self {
        let dx = end.cx - start.cx;
        let dy = end.cy - start.cy;
        let d2 = dx * dx + dy * dy;
        let path = if d2 < EPSILON2 {
            ZoomPath::Scale {
                s: (end.width / start.width).ln() / RHO,
            }
        } else {
            let d1 = d2.sqrt();
            let w0 = start.width;
            let w1 = end.width;
            let b0 = (w1 * w1 - w0 * w0 + RHO4 * d2) / (2.0 * w0 * RHO2 * d1);
            let b1 = (w1 * w1 - w0 * w0 - RHO4 * d2) / (2.0 * w1 * RHO2 * d1);
            let r0 = ((b0 * b0 + 1.0).sqrt() - b0).ln();
            let r1 = ((b1 * b1 + 1.0).sqrt() - b1).ln();
            ZoomPath::Arc {
                d1,
                r0,
                s: (r1 - r0) / RHO,
            }
        };
        Self {
            start,
            dx,
            dy,
            path,
        }
    }

    /// Interpolated view at `t` in `[0, 1]`.
    pub fn at(&self, t: f64) -> ZoomView {
        let ZoomView { cx, cy, width } = self.start;
        match self.path {
            ZoomPath::Scale { s } => ZoomView {
                cx: cx + t * self.dx,
                cy: cy + t * self.dy,
                width: width * (RHO * t * s).exp(),
            },
            ZoomPath::Arc { d1, r0, s } => {
                let s = t * s;
                let cosh_r0 = r0.cosh();
                let u = width / (RHO2 * d1) * (cosh_r0 * (RHO * s + r0).tanh() - r0.sinh());
                ZoomView {
                    cx: cx + u * self.dx,
                    cy: cy + u * self.dy,
                    width: width * cosh_r0 / (RHO * s + r0).cosh(),
                }
            }
        }
    }
}

/// An animated change of the view transform.
#[derive(Debug, Clone)]
pub struct ViewTransition {
    to: ViewTransform,
    started: Instant,
    duration: Duration,
    anchor: (f64, f64),
    extent_width: f64,
    interpolator: ZoomInterpolator,
}

impl ViewTransition {
    /// Start a transition anchored at the center of a `width` x `height`
    /// viewport.
    pub fn new(
        from: ViewTransform,
        to: ViewTransform,
        started: Instant,
        duration: Duration,
        width: f64,
        height: f64,
    ) -> Self {
        let anchor = (width * 0.5, height * 0.5);
        let extent_width = width.max(height);
        let view = |transform: ViewTransform| {
            let (cx, cy) = transform.invert(anchor);
            ZoomView {
                cx,
                cy,
                width: extent_width / transform.k,
            }
        };
        let interpolator = ZoomInterpolator::new(view(from), view(to));
        Self {
            to,
            started,
            duration,
            anchor,
            extent_width,
            interpolator,
        }
    }

    /// Transform the transition ends on.
    pub fn target(&self) -> ViewTransform {
        self.to
    }

    /// Normalized progress in `[0, 1]` at `now`.
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Check whether the transition has reached its end at `now`.
    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    /// Transform at `now`. Returns the exact target once finished.
    pub fn sample(&self, now: Instant) -> ViewTransform {
        let t = self.progress(now);
        if t >= 1.0 {
            return self.to;
        }
        let view = self.interpolator.at(ease_cubic_in_out(t));
        let k = self.extent_width / view.width;
        ViewTransform::centered_on((view.cx, view.cy), self.anchor, k)
    }
}

/// Linear scalar animation, used for hover emphasis and tooltip opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    from: f32,
    to: f32,
    started: Instant,
    duration: Duration,
}

impl Fade {
    /// A fade that is already settled at `value`.
    pub fn settled(value: f32, now: Instant) -> Self {
        Self {
            from: value,
            to: value,
            started: now,
            duration: Duration::ZERO,
        }
    }

    /// Retarget the fade from its current value towards `to`.
    pub fn retarget(&mut self, to: f32, now: Instant, duration: Duration) {
        if self.to == to {
            return;
        }
        self.from = self.value(now);
        self.to = to;
        self.started = now;
        self.duration = duration;
    }

    /// Value the fade is heading towards.
    pub fn target(&self) -> f32 {
        self.to
    }

    /// Current value at `now`.
    pub fn value(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return self.to;
        }
        let elapsed = now.saturating_duration_since(self.started).as_secs_f64();
        let t = (elapsed / self.duration.as_secs_f64()).min(1.0);
        let eased = ease_cubic_in_out(t) as f32;
        self.from + (self.to - self.from) * eased
    }

    /// Check whether the fade still changes after `now`.
    pub fn is_running(&self, now: Instant) -> bool {
        !self.duration.is_zero() && now.saturating_duration_since(self.started) < self.duration
    }
}
