//! Axis-limit modes for channel-pair scatter plots.

use serde::{Deserialize, Serialize};

use crate::geom::Point;
use crate::view::{Range, Viewport};

/// Smallest axis span a resolved viewport may have.
const MIN_SPAN: f64 = 1e-9;

/// How the visible rectangle is derived from the plotted spots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AxisLimitMode {
    /// Data bounds with padding (default).
    #[default]
    Auto,
    /// A caller-chosen rectangle, also entered by pan and zoom.
    Fixed {
        /// The fixed viewport.
        viewport: Viewport,
    },
    /// Exact data bounds.
    MinMax,
    /// Per-axis percentiles of the data, in `[0, 100]`.
    Percentile {
        /// Lower percentile.
        low: f64,
        /// Upper percentile.
        high: f64,
    },
}

impl AxisLimitMode {
    /// Resolve a viewport for `points`.
    ///
    /// Returns `None` when the mode depends on data and no finite point is
    /// available. Resolved data-driven viewports are always valid.
    pub fn resolve(
        &self,
        points: &[Point],
        padding_frac: f64,
        min_padding: f64,
    ) -> Option<Viewport> {
        match *self {
            Self::Fixed { viewport } => Some(viewport),
            Self::Auto => Some(
                data_bounds(points)?
                    .padded(padding_frac, min_padding)
                    .with_min_span(MIN_SPAN),
            ),
            Self::MinMax => Some(data_bounds(points)?.with_min_span(MIN_SPAN)),
            Self::Percentile { low, high } => {
                let mut xs: Vec<f64> = finite(points).map(|p| p.x).collect();
                let mut ys: Vec<f64> = finite(points).map(|p| p.y).collect();
                let x = percentile_range(&mut xs, low, high)?;
                let y = percentile_range(&mut ys, low, high)?;
                Some(Viewport::new(x, y).with_min_span(MIN_SPAN))
            }
        }
    }
}

fn finite(points: &[Point]) -> impl Iterator<Item = &Point> + '_ {
    points.iter().filter(|point| point.is_finite())
}

/// Bounding box of the finite points.
pub fn data_bounds(points: &[Point]) -> Option<Viewport> {
    let mut iter = finite(points);
    let first = iter.next()?;
    let mut x = Range::new(first.x, first.x);
    let mut y = Range::new(first.y, first.y);
    for point in iter {
        x.expand_to_include(point.x);
        y.expand_to_include(point.y);
    }
    Some(Viewport::new(x, y))
}

fn percentile_range(values: &mut [f64], low: f64, high: f64) -> Option<Range> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    Some(Range::new(
        percentile_sorted(values, low),
        percentile_sorted(values, high),
    ))
}

/// Percentile of sorted values with linear interpolation between ranks.
fn percentile_sorted(sorted: &[f64], percentile: f64) -> f64 {
    let last = sorted.len() - 1;
    let rank = percentile.clamp(0.0, 100.0) / 100.0 * last as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let frac = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}
