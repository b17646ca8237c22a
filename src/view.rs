//! Visible data ranges.

use serde::{Deserialize, Serialize};

use crate::geom::Point;

/// Numeric range with inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
}

impl Range {
    /// Create a new range, swapping bounds if needed.
    pub fn new(mut min: f64, mut max: f64) -> Self {
        if min > max {
            std::mem::swap(&mut min, &mut max);
        }
        Self { min, max }
    }

    /// Span of the range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Check whether both bounds are finite.
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Check whether the range has positive span and finite bounds.
    pub fn is_valid(&self) -> bool {
        self.is_finite() && self.span() > 0.0
    }

    /// Check whether a value lies inside the closed range, widened by `tolerance`.
    pub fn contains(&self, value: f64, tolerance: f64) -> bool {
        value >= self.min - tolerance && value <= self.max + tolerance
    }

    /// Expand the range to include a value.
    pub fn expand_to_include(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }

    /// Add padding around the range.
    pub fn padded(&self, frac: f64, min_padding: f64) -> Self {
        let span = self.span().abs();
        let padding = (span * frac).max(min_padding);
        Self {
            min: self.min - padding,
            max: self.max + padding,
        }
    }

    /// Ensure the range has at least the given span.
    pub fn with_min_span(&self, min_span: f64) -> Self {
        let span = self.span();
        if span >= min_span {
            return *self;
        }
        let center = (self.min + self.max) * 0.5;
        let half = min_span * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }
}

/// Visible data rectangle of a channel-pair scatter plot.
///
/// A viewport is valid when both axes are finite with `min < max`. The dye-line
/// clipper assumes a valid viewport and does not check it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// X axis range.
    pub x: Range,
    /// Y axis range.
    pub y: Range,
}

impl Viewport {
    /// Create a viewport from X and Y ranges.
    pub fn new(x: Range, y: Range) -> Self {
        Self { x, y }
    }

    /// Create a viewport from explicit bounds.
    pub fn from_bounds(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x: Range::new(x_min, x_max),
            y: Range::new(y_min, y_max),
        }
    }

    /// Check whether both axes are valid.
    pub fn is_valid(&self) -> bool {
        self.x.is_valid() && self.y.is_valid()
    }

    /// Check whether a point lies inside the closed rectangle, widened by `tolerance`.
    pub fn contains(&self, point: Point, tolerance: f64) -> bool {
        self.x.contains(point.x, tolerance) && self.y.contains(point.y, tolerance)
    }

    /// Apply padding to both axes.
    pub fn padded(&self, frac: f64, min_padding: f64) -> Self {
        Self {
            x: self.x.padded(frac, min_padding),
            y: self.y.padded(frac, min_padding),
        }
    }

    /// Widen any axis whose span is below `min_span`.
    pub fn with_min_span(&self, min_span: f64) -> Self {
        Self {
            x: self.x.with_min_span(min_span),
            y: self.y.with_min_span(min_span),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_with_min_span_expands() {
        let range = Range::new(2.0, 2.0);
        let expanded = range.with_min_span(1.0);
        assert!(expanded.span() >= 1.0);
        assert!(((expanded.min + expanded.max) * 0.5 - 2.0).abs() < 1e-9);
    }

    #[test]
    fn range_new_swaps_reversed_bounds() {
        let range = Range::new(5.0, -1.0);
        assert_eq!(range.min, -1.0);
        assert_eq!(range.max, 5.0);
    }

    #[test]
    fn viewport_contains_respects_tolerance() {
        let viewport = Viewport::from_bounds(0.0, 10.0, -5.0, 5.0);
        assert!(viewport.contains(Point::new(10.0, 5.0), 0.0));
        assert!(!viewport.contains(Point::new(10.001, 0.0), 0.0));
        assert!(viewport.contains(Point::new(10.0 + 1e-9, 0.0), 1e-6));
    }
}
