//! Geometric primitives used by the plotting pipeline.
//!
//! [`Point`] lives in data space (channel intensities). Screen-space types are
//! produced by [`Transform`](crate::transform::Transform) and consumed by
//! render backends.

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

    /// Check whether both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A point in screen space (pixel coordinates).
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
}

/// A rectangle in screen space (pixel coordinates).
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

    /// Rectangle width in pixels.
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Rectangle height in pixels.
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Check whether the rectangle has positive area.
    pub fn is_valid(&self) -> bool {
        self.width() > 0.0 && self.height() > 0.0
    }

    /// Check whether a point lies inside the rectangle (edges included).
    pub fn contains(&self, point: ScreenPoint) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Return the rectangle with corners ordered so that `min <= max`.
    pub fn normalized(&self) -> Self {
        Self {
            min: ScreenPoint::new(self.min.x.min(self.max.x), self.min.y.min(self.max.y)),
            max: ScreenPoint::new(self.min.x.max(self.max.x), self.min.y.max(self.max.y)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_rect_orders_corners() {
        let rect = ScreenRect::new(ScreenPoint::new(10.0, 2.0), ScreenPoint::new(4.0, 8.0));
        let norm = rect.normalized();
        assert_eq!(norm.min, ScreenPoint::new(4.0, 2.0));
        assert_eq!(norm.max, ScreenPoint::new(10.0, 8.0));
        assert!(norm.is_valid());
        assert!(norm.contains(ScreenPoint::new(4.0, 8.0)));
        assert!(!norm.contains(ScreenPoint::new(3.9, 5.0)));
    }
}
