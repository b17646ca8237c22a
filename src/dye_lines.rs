//! Per-channel-pair dye line sets.
//!
//! For the selected channel pair every dye row contributes the coefficients at
//! the X and Y channel columns. Those are normalized into a direction and the
//! line through the origin is clipped to the current viewport. Dyes without a
//! visible direction or without a visible segment are left out.

use tracing::{debug, warn};

use crate::channel::{ChannelId, ChannelIndex, ChannelPair};
use crate::clip::{
    ClippedSegment, DIRECTION_EPSILON, Direction, PARALLEL_EPSILON, clip_line_through_origin,
};
use crate::dye::DyeMatrix;
use crate::render::Color;
use crate::style::ChannelPalette;
use crate::view::Viewport;

/// Numeric thresholds for building dye lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DyeLineOptions {
    /// Norm below which a dye is treated as invisible on a channel pair.
    pub direction_epsilon: f64,
    /// Direction component below which a line is treated as axis-parallel.
    pub parallel_epsilon: f64,
}

impl Default for DyeLineOptions {
    fn default() -> Self {
        Self {
            direction_epsilon: DIRECTION_EPSILON,
            parallel_epsilon: PARALLEL_EPSILON,
        }
    }
}

/// A dye line ready to be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct DyeLine {
    /// Channel the dye is registered on.
    pub dye: ChannelId,
    /// End-label text.
    pub label: String,
    /// Normalized dye direction on the channel pair.
    pub direction: Direction,
    /// Visible portion of the line.
    pub segment: ClippedSegment,
    /// Display color.
    pub color: Color,
}

/// Counts of dyes left out of a [`DyeLineSet`].
///
/// Skips are expected, but an all-degenerate set on a dataset with a dye
/// matrix usually means the matrix loaded as zeros.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DyeLineStats {
    /// Dyes with a near-zero projection onto the pair.
    pub degenerate: usize,
    /// Dyes whose line misses the viewport.
    pub out_of_view: usize,
}

/// Ordered dye lines for one redraw.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DyeLineSet {
    lines: Vec<DyeLine>,
    stats: DyeLineStats,
}

impl DyeLineSet {
    /// Lines in dye (channel list) order.
    pub fn lines(&self) -> &[DyeLine] {
        &self.lines
    }

    /// Skip counters for this set.
    pub fn stats(&self) -> DyeLineStats {
        self.stats
    }

    /// Number of visible lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check whether no line is visible.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Consume the set, returning the lines.
    pub fn into_lines(self) -> Vec<DyeLine> {
        self.lines
    }
}

/// Build the visible dye lines for `pair` within `viewport`.
///
/// Returns an empty set when either channel of the pair is missing from
/// `channels`, or when the matrix does not match the channel list.
pub fn build_dye_lines(
    matrix: &DyeMatrix,
    channels: &ChannelIndex,
    pair: &ChannelPair,
    viewport: &Viewport,
    palette: &ChannelPalette,
    options: DyeLineOptions,
) -> DyeLineSet {
    let mut set = DyeLineSet::default();
    if matrix.size() != channels.len() {
        warn!(
            matrix = matrix.size(),
            channels = channels.len(),
            "dye matrix does not match channel list"
        );
        return set;
    }
    let Some((x_col, y_col)) = channels.pair_columns(pair) else {
        warn!(x = %pair.x, y = %pair.y, "channel pair not in dataset");
        return set;
    };

    for (dye, row) in channels.channels().iter().zip(matrix.rows()) {
        let Some(direction) = Direction::normalize(row[x_col], row[y_col], options.direction_epsilon)
        else {
            debug!(%dye, "dye has no direction on channel pair");
            set.stats.degenerate += 1;
            continue;
        };
        let Some(segment) = clip_line_through_origin(direction, viewport, options.parallel_epsilon)
        else {
            debug!(%dye, "dye line outside viewport");
            set.stats.out_of_view += 1;
            continue;
        };
        set.lines.push(DyeLine {
            dye: dye.clone(),
            label: dye.to_string(),
            direction,
            segment,
            color: palette.color(dye),
        });
    }
    set
}
