//! Zoom transforms and the data-to-screen mapping built on them.
//!
//! A [`ViewTransform`] maps base-scale pixel coordinates (plot-area local,
//! produced by the fixed axis scales) to displayed pixel coordinates:
//! `displayed = base * k + (x, y)`. [`PlotTransform`] composes the fixed
//! scales with the current view transform to go all the way from data
//! space to canvas pixels.

use serde::{Deserialize, Serialize};

use crate::axis::LinearScale;
use crate::geom::{Point, ScreenPoint, ScreenRect};

/// Translate + uniform scale applied on top of the base scales.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    /// Horizontal translation in pixels.
    pub x: f64,
    /// Vertical translation in pixels.
    pub y: f64,
    /// Scale factor.
    pub k: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewTransform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        k: 1.0,
    };

    /// Create a transform from its components.
    pub const fn new(x: f64, y: f64, k: f64) -> Self {
        Self { x, y, k }
    }

    /// Check whether this is exactly the identity transform.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Compose with a further translation expressed in the pre-scale frame.
    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + self.k * dx, self.y + self.k * dy, self.k)
    }

    /// Compose with a further scale.
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x, self.y, self.k * factor)
    }

    /// Apply to a base X coordinate.
    pub fn apply_x(&self, x: f64) -> f64 {
        x * self.k + self.x
    }

    /// Apply to a base Y coordinate.
    pub fn apply_y(&self, y: f64) -> f64 {
        y * self.k + self.y
    }

    /// Apply to a base point.
    pub fn apply(&self, point: (f64, f64)) -> (f64, f64) {
        (self.apply_x(point.0), self.apply_y(point.1))
    }

    /// Invert a displayed X coordinate.
    pub fn invert_x(&self, x: f64) -> f64 {
        (x - self.x) / self.k
    }

    /// Invert a displayed Y coordinate.
    pub fn invert_y(&self, y: f64) -> f64 {
        (y - self.y) / self.k
    }

    /// Invert a displayed point.
    pub fn invert(&self, point: (f64, f64)) -> (f64, f64) {
        (self.invert_x(point.0), self.invert_y(point.1))
    }

    /// Transform that shows base point `base` at displayed point `target`
    /// with scale `k`.
    pub fn centered_on(base: (f64, f64), target: (f64, f64), k: f64) -> Self {
        Self::new(target.0 - base.0 * k, target.1 - base.1 * k, k)
    }

    /// Rescale around a displayed anchor, keeping the base point under the
    /// anchor fixed.
    pub fn scale_about(self, anchor: (f64, f64), k: f64) -> Self {
        Self::centered_on(self.invert(anchor), anchor, k)
    }

    /// Clamp the scale into `extent`, keeping the base point displayed at
    /// `anchor` fixed.
    pub fn constrain(self, extent: ScaleExtent, anchor: (f64, f64)) -> Self {
        let k = extent.clamp(self.k);
        if k == self.k {
            return self;
        }
        self.scale_about(anchor, k)
    }

    /// Rescale a horizontal scale so that it reads the displayed domain.
    pub fn rescale_x(&self, scale: &LinearScale) -> LinearScale {
        let (start, end) = scale.range();
        scale.with_domain(
            scale.invert(self.invert_x(start)),
            scale.invert(self.invert_x(end)),
        )
    }

    /// Rescale a vertical scale so that it reads the displayed domain.
    pub fn rescale_y(&self, scale: &LinearScale) -> LinearScale {
        let (start, end) = scale.range();
        scale.with_domain(
            scale.invert(self.invert_y(start)),
            scale.invert(self.invert_y(end)),
        )
    }

    /// Check whether all components are finite and the scale is positive.
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.k.is_finite() && self.k > 0.0
    }
}

/// Allowed range of the view scale factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleExtent {
    /// Smallest allowed scale.
    pub min: f64,
    /// Largest allowed scale.
    pub max: f64,
}

impl ScaleExtent {
    /// Create a scale extent.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamp a scale into the extent.
    pub fn clamp(&self, k: f64) -> f64 {
        k.clamp(self.min, self.max)
    }
}

impl Default for ScaleExtent {
    fn default() -> Self {
        Self::new(1.0, 40.0)
    }
}

/// Mapping from data space to canvas pixels for one frame.
#[derive(Debug, Clone)]
pub struct PlotTransform {
    x_scale: LinearScale,
    y_scale: LinearScale,
    view: ViewTransform,
    plot_rect: ScreenRect,
}

impl PlotTransform {
    /// Compose base scales, a view transform, and the plot-area rectangle.
    ///
    /// Returns `None` when the plot area is empty or the view transform is
    /// degenerate.
    pub fn new(
        x_scale: LinearScale,
        y_scale: LinearScale,
        view: ViewTransform,
        plot_rect: ScreenRect,
    ) -> Option<Self> {
        if !plot_rect.is_valid() || !view.is_valid() {
            return None;
        }
        Some(Self {
            x_scale,
            y_scale,
            view,
            plot_rect,
        })
    }

    /// Access the view transform.
    pub fn view(&self) -> ViewTransform {
        self.view
    }

    /// Base-scale pixel coordinates of a data point (plot-area local).
    pub fn data_to_base(&self, point: Point) -> (f64, f64) {
        (self.x_scale.map(point.x), self.y_scale.map(point.y))
    }

    /// Displayed pixel coordinates of a data point (plot-area local).
    pub fn data_to_local(&self, point: Point) -> (f64, f64) {
        self.view.apply(self.data_to_base(point))
    }

    /// Map a data point into canvas space.
    pub fn data_to_screen(&self, point: Point) -> ScreenPoint {
        let (x, y) = self.data_to_local(point);
        ScreenPoint::new(
            self.plot_rect.min.x + x as f32,
            self.plot_rect.min.y + y as f32,
        )
    }

    /// Horizontal scale as seen through the view transform.
    pub fn visible_x_scale(&self) -> LinearScale {
        self.view.rescale_x(&self.x_scale)
    }

    /// Vertical scale as seen through the view transform.
    pub fn visible_y_scale(&self) -> LinearScale {
        self.view.rescale_y(&self.y_scale)
    }
}
