//! Geometric primitives used by the chart pipeline.
//!
//! [`Point`] is a data-space coordinate. Screen types are expressed in
//! logical canvas pixels, before any backend scaling is applied.

/// A point in data space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// X value in data coordinates.
    pub x: f64,
    /// Y value in data coordinates.
    pub y: f64,
}

impl Point {
    /// Create a new data point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A point in screen space (logical pixels).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    /// X value in screen pixels.
    pub x: f32,
    /// Y value in screen pixels.
    pub y: f32,
}

impl ScreenPoint {
    /// Create a new screen point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Offset the point by a pixel delta.
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// A rectangle in screen space (logical pixels).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    /// Top-left corner.
    pub min: ScreenPoint,
    /// Bottom-right corner.
    pub max: ScreenPoint,
}

impl ScreenRect {
    /// Create a new screen rectangle from corners.
    pub fn new(min: ScreenPoint, max: ScreenPoint) -> Self {
        Self { min, max }
    }

    /// Create a rectangle from an origin and a size.
    pub fn from_origin_size(origin: ScreenPoint, width: f32, height: f32) -> Self {
        Self::new(origin, origin.offset(width, height))
    }

    /// Rectangle width in pixels.
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Rectangle height in pixels.
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Rectangle center.
    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
        )
    }

    /// Check whether the rectangle has positive area.
    pub fn is_valid(&self) -> bool {
        self.width() > 0.0 && self.height() > 0.0
    }

    /// Check whether the point lies inside the rectangle (inclusive).
    pub fn contains(&self, point: ScreenPoint) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Return the rectangle with corners ordered so that `min <= max`.
    pub fn normalized(&self) -> Self {
        Self::new(
            ScreenPoint::new(self.min.x.min(self.max.x), self.min.y.min(self.max.y)),
            ScreenPoint::new(self.min.x.max(self.max.x), self.min.y.max(self.max.y)),
        )
    }

    /// Translate the rectangle by a pixel delta.
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.min.offset(dx, dy), self.max.offset(dx, dy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_orders_corners() {
        let rect = ScreenRect::new(ScreenPoint::new(10.0, 2.0), ScreenPoint::new(4.0, 8.0));
        let rect = rect.normalized();
        assert_eq!(rect.min, ScreenPoint::new(4.0, 2.0));
        assert_eq!(rect.max, ScreenPoint::new(10.0, 8.0));
        assert!(rect.is_valid());
    }

    #[test]
    fn contains_is_inclusive() {
        let rect = ScreenRect::from_origin_size(ScreenPoint::new(0.0, 0.0), 10.0, 5.0);
        assert!(rect.contains(ScreenPoint::new(10.0, 5.0)));
        assert!(!rect.contains(ScreenPoint::new(-3.0, 4.0)));
        assert_eq!(rect.translate(2.0, 1.0).center(), ScreenPoint::new(7.0, 3.5));
    }
}
