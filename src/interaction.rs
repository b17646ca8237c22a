//! Interaction helpers for panning and zooming.
//!
//! Render backends translate pointer input into these calls so every frontend
//! moves the viewport the same way.

use crate::geom::{Point, ScreenPoint, ScreenRect};
use crate::transform::Transform;
use crate::view::{Range, Viewport};

/// Pan a viewport by a pixel delta.
///
/// Dragging right moves the data right, so the viewport shifts left.
pub fn pan_viewport(viewport: Viewport, delta_pixels: ScreenPoint, transform: &Transform) -> Viewport {
    let origin = transform.screen_to_data(ScreenPoint::new(0.0, 0.0));
    let shifted = transform.screen_to_data(delta_pixels);
    let dx = shifted.x - origin.x;
    let dy = shifted.y - origin.y;
    Viewport::new(
        Range::new(viewport.x.min - dx, viewport.x.max - dx),
        Range::new(viewport.y.min - dy, viewport.y.max - dy),
    )
}

/// Zoom a viewport around a center point.
///
/// Factors below one zoom in.
pub fn zoom_viewport(viewport: Viewport, center: Point, factor_x: f64, factor_y: f64) -> Viewport {
    let x_min = center.x + (viewport.x.min - center.x) * factor_x;
    let x_max = center.x + (viewport.x.max - center.x) * factor_x;
    let y_min = center.y + (viewport.y.min - center.y) * factor_y;
    let y_max = center.y + (viewport.y.max - center.y) * factor_y;
    Viewport::new(Range::new(x_min, x_max), Range::new(y_min, y_max))
}

/// Convert a zoom rectangle into a new viewport.
///
/// Rectangles thinner than two pixels leave the viewport unchanged.
pub fn zoom_to_rect(viewport: Viewport, rect: ScreenRect, transform: &Transform) -> Viewport {
    let rect = rect.normalized();
    if rect.width() < 2.0 || rect.height() < 2.0 {
        return viewport;
    }
    let data_min = transform.screen_to_data(rect.min);
    let data_max = transform.screen_to_data(rect.max);
    Viewport::new(
        Range::new(data_min.x, data_max.x),
        Range::new(data_min.y, data_max.y),
    )
}

/// Compute a zoom factor from a scroll delta in pixels.
pub fn zoom_factor_from_scroll(delta_pixels: f32) -> f64 {
    (1.0 - delta_pixels as f64 * 0.002).clamp(0.1, 10.0)
}
