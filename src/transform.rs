//! Coordinate transforms between data and screen space.

use crate::geom::{Point, ScreenPoint, ScreenRect};
use crate::view::Viewport;

const MIN_SPAN: f64 = 1e-12;

/// Linear transform from intensity coordinates into screen coordinates.
///
/// Screen Y grows downward, so the viewport's `y.max` maps to the top edge.
#[derive(Debug, Clone)]
pub struct Transform {
    viewport: Viewport,
    screen: ScreenRect,
}

impl Transform {
    /// Create a transform for the given viewport and screen rectangle.
    pub fn new(viewport: Viewport, screen: ScreenRect) -> Option<Self> {
        if !screen.is_valid() || !viewport.x.is_finite() || !viewport.y.is_finite() {
            return None;
        }
        Some(Self {
            viewport: viewport.with_min_span(MIN_SPAN),
            screen,
        })
    }

    /// Access the viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Access the screen rectangle.
    pub fn screen(&self) -> ScreenRect {
        self.screen
    }

    /// Map a data point into screen space.
    pub fn data_to_screen(&self, point: Point) -> Option<ScreenPoint> {
        if !point.is_finite() {
            return None;
        }
        let x_norm = (point.x - self.viewport.x.min) / self.viewport.x.span();
        let y_norm = (point.y - self.viewport.y.min) / self.viewport.y.span();
        let sx = self.screen.min.x as f64 + x_norm * self.screen.width() as f64;
        let sy = self.screen.max.y as f64 - y_norm * self.screen.height() as f64;
        Some(ScreenPoint::new(sx as f32, sy as f32))
    }

    /// Map a screen point into data space.
    pub fn screen_to_data(&self, point: ScreenPoint) -> Point {
        let x_norm = (point.x as f64 - self.screen.min.x as f64) / self.screen.width() as f64;
        let y_norm = (self.screen.max.y as f64 - point.y as f64) / self.screen.height() as f64;
        Point::new(
            self.viewport.x.min + x_norm * self.viewport.x.span(),
            self.viewport.y.min + y_norm * self.viewport.y.span(),
        )
    }
}
