//! Dye direction normalization and line clipping against the viewport.
//!
//! A dye direction defines a full line through the data origin,
//! `(x, y) = t * (ux, uy)` for every real `t`. The viewport need not contain the
//! origin, so crossings are searched on both sides of it.

use crate::geom::Point;
use crate::view::{Range, Viewport};

/// Norm below which a dye has no visible direction on a channel pair.
pub const DIRECTION_EPSILON: f64 = 1e-9;

/// Direction component below which the line is treated as axis-parallel.
pub const PARALLEL_EPSILON: f64 = 1e-9;

/// Rounding slack, in units of the largest axis magnitude, when testing a
/// crossing against the opposite axis.
const BOUNDARY_ULPS: f64 = 8.0 * f64::EPSILON;

/// Fraction of the larger viewport span two endpoints must be apart to count
/// as distinct.
const MIN_SEPARATION: f64 = 1e-12;

/// Unit-length direction of a dye projected onto two channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Direction {
    ux: f64,
    uy: f64,
}

impl Direction {
    /// Normalize raw coefficients into a unit direction.
    ///
    /// Returns `None` when `sqrt(dx^2 + dy^2)` is below `epsilon`. Signs are
    /// preserved.
    pub fn normalize(dx: f64, dy: f64, epsilon: f64) -> Option<Self> {
        let norm = (dx * dx + dy * dy).sqrt();
        if !(norm >= epsilon) {
            return None;
        }
        Some(Self {
            ux: dx / norm,
            uy: dy / norm,
        })
    }

    /// X component.
    pub fn ux(&self) -> f64 {
        self.ux
    }

    /// Y component.
    pub fn uy(&self) -> f64 {
        self.uy
    }

    /// Point on the line at parameter `t`.
    pub fn at(&self, t: f64) -> Point {
        Point::new(self.ux * t, self.uy * t)
    }

    /// The same line traversed the other way.
    pub fn reversed(&self) -> Self {
        Self {
            ux: -self.ux,
            uy: -self.uy,
        }
    }
}

/// Portion of a dye line inside the viewport.
///
/// Both endpoints lie on the viewport boundary. `start` has the smaller line
/// parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClippedSegment {
    /// Line parameter of `start`.
    pub t_start: f64,
    /// Line parameter of `end`.
    pub t_end: f64,
    /// Endpoint with the smaller parameter.
    pub start: Point,
    /// Endpoint with the larger parameter.
    pub end: Point,
}

#[derive(Debug, Clone, Copy)]
struct Crossing {
    t: f64,
    point: Point,
}

/// Clip the full line through the origin along `direction` to `viewport`.
///
/// Returns `None` when fewer than two distinct boundary crossings land on
/// the rectangle perimeter. The viewport must be valid.
pub fn clip_line_through_origin(
    direction: Direction,
    viewport: &Viewport,
    parallel_epsilon: f64,
) -> Option<ClippedSegment> {
    let mut crossings: [Option<Crossing>; 4] = [None; 4];
    let (ux, uy) = (direction.ux, direction.uy);
    let x_slack = boundary_slack(&viewport.x);
    let y_slack = boundary_slack(&viewport.y);

    if ux.abs() > parallel_epsilon {
        for (slot, x) in [viewport.x.min, viewport.x.max].into_iter().enumerate() {
            let t = x / ux;
            let y = uy * t;
            if viewport.y.contains(y, y_slack) {
                crossings[slot] = Some(Crossing {
                    t,
                    point: Point::new(x, y),
                });
            }
        }
    }

    if uy.abs() > parallel_epsilon {
        for (slot, y) in [viewport.y.min, viewport.y.max].into_iter().enumerate() {
            let t = y / uy;
            let x = ux * t;
            if viewport.x.contains(x, x_slack) {
                crossings[2 + slot] = Some(Crossing {
                    t,
                    point: Point::new(x, y),
                });
            }
        }
    }

    let mut found = crossings.iter().flatten();
    let first = *found.next()?;
    let (mut low, mut high) = (first, first);
    for crossing in found {
        if crossing.t < low.t {
            low = *crossing;
        }
        if crossing.t > high.t {
            high = *crossing;
        }
    }
    // Duplicate corner hits of a grazing line collapse to one point.
    let separation = (high.point.x - low.point.x)
        .abs()
        .max((high.point.y - low.point.y).abs());
    let min_separation = (2.0 * x_slack.max(y_slack))
        .max(viewport.x.span().max(viewport.y.span()) * MIN_SEPARATION);
    if !(high.t > low.t && separation > min_separation) {
        return None;
    }

    Some(ClippedSegment {
        t_start: low.t,
        t_end: high.t,
        start: low.point,
        end: high.point,
    })
}

/// Slack covering the rounding error of a coordinate on `range`.
fn boundary_slack(range: &Range) -> f64 {
    range
        .min
        .abs()
        .max(range.max.abs())
        .max(range.span().abs())
        * BOUNDARY_ULPS
}
