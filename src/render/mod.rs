//! Rendering primitives and render-list builders.
//!
//! These types are backend-agnostic. A [`RenderList`] describes one plot
//! redraw in screen space; backends (such as the optional GPUI painter) walk
//! the commands in order.

use crate::channel::ChannelId;
use crate::dye_lines::DyeLine;
use crate::geom::{ScreenPoint, ScreenRect};
use crate::spots::SpotPoint;
use crate::style::Theme;
use crate::transform::Transform;

/// Gap in pixels between a dye line's end and its label.
const LABEL_OFFSET: f32 = 4.0;

/// RGBA color in linear space.
///
/// All components are expected to be in the 0.0..=1.0 range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Create a new color.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// The same color with a different alpha.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }
}

/// Line stroke styling.
///
/// The width is expressed in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
        }
    }
}

/// Marker shape for scatter plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    /// Circle marker.
    Circle,
    /// Cross marker.
    Cross,
}

/// Marker styling for scatter plots.
///
/// Marker sizes are expressed in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    /// Marker color.
    pub color: Color,
    /// Marker size in pixels.
    pub size: f32,
    /// Marker shape.
    pub shape: MarkerShape,
}

impl MarkerStyle {
    /// Half the marker extent, never below one pixel.
    pub fn half_extent(&self) -> f32 {
        self.size.max(2.0) * 0.5
    }

    /// The two strokes of a cross marker centered on `center`.
    pub fn cross_strokes(&self, center: ScreenPoint) -> [LineSegment; 2] {
        let half = self.half_extent();
        [
            LineSegment::new(
                ScreenPoint::new(center.x - half, center.y),
                ScreenPoint::new(center.x + half, center.y),
            ),
            LineSegment::new(
                ScreenPoint::new(center.x, center.y - half),
                ScreenPoint::new(center.x, center.y + half),
            ),
        ]
    }
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            size: 4.0,
            shape: MarkerShape::Circle,
        }
    }
}

/// Text styling.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Text color.
    pub color: Color,
    /// Font size in pixels.
    pub size: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            size: 12.0,
        }
    }
}

/// A line segment in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    /// Segment start.
    pub start: ScreenPoint,
    /// Segment end.
    pub end: ScreenPoint,
}

impl LineSegment {
    /// Create a new line segment.
    pub fn new(start: ScreenPoint, end: ScreenPoint) -> Self {
        Self { start, end }
    }
}

/// Render command list.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Start clipping to a rectangle.
    ClipRect(ScreenRect),
    /// End clipping.
    ClipEnd,
    /// Draw line segments.
    LineSegments {
        /// Segments to draw.
        segments: Vec<LineSegment>,
        /// Styling for the segments.
        style: LineStyle,
    },
    /// Draw scatter points.
    Points {
        /// Points to draw.
        points: Vec<ScreenPoint>,
        /// Marker styling.
        style: MarkerStyle,
    },
    /// Draw text.
    Text {
        /// Text position.
        position: ScreenPoint,
        /// Text content.
        text: String,
        /// Text styling.
        style: TextStyle,
    },
}

/// Aggregated render commands.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RenderList {
    commands: Vec<RenderCommand>,
}

impl RenderList {
    /// Create an empty render list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a render command.
    pub fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    /// Access all render commands.
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }
}

/// Append scatter commands for projected spots.
///
/// Spots are grouped by unmixed channel, with reassigned spots drawn last in
/// their own marker so they stay visible on top. Marker colors come from the
/// palette; the theme's marker alpha is kept.
pub fn build_scatter_points(
    spots: &[SpotPoint<'_>],
    transform: &Transform,
    theme: &Theme,
    out: &mut RenderList,
) {
    let clip = transform.screen();
    for reassigned in [false, true] {
        let base = if reassigned {
            theme.reassigned_spot
        } else {
            theme.spot
        };
        let mut groups: Vec<(&ChannelId, Vec<ScreenPoint>)> = Vec::new();
        for spot in spots.iter().filter(|s| s.spot.reassigned == reassigned) {
            let Some(screen) = transform.data_to_screen(spot.point) else {
                continue;
            };
            if !clip.contains(screen) {
                continue;
            }
            let channel = &spot.spot.unmixed_chan;
            match groups.iter_mut().find(|(id, _)| *id == channel) {
                Some((_, points)) => points.push(screen),
                None => groups.push((channel, vec![screen])),
            }
        }
        for (channel, points) in groups {
            out.push(RenderCommand::Points {
                points,
                style: MarkerStyle {
                    color: theme.palette.color(channel).with_alpha(base.color.a),
                    ..base
                },
            });
        }
    }
}

/// Append line and end-label commands for dye lines.
///
/// The label sits just past the segment end with the larger line parameter,
/// pulled back inside the plot area.
pub fn build_dye_line_commands(
    lines: &[DyeLine],
    transform: &Transform,
    theme: &Theme,
    out: &mut RenderList,
) {
    let clip = transform.screen();
    for line in lines {
        let (Some(start), Some(end)) = (
            transform.data_to_screen(line.segment.start),
            transform.data_to_screen(line.segment.end),
        ) else {
            continue;
        };
        out.push(RenderCommand::LineSegments {
            segments: vec![LineSegment::new(start, end)],
            style: LineStyle {
                color: line.color,
                ..theme.dye_line
            },
        });
        out.push(RenderCommand::Text {
            position: label_position(start, end, clip, theme.dye_label.size),
            text: line.label.clone(),
            style: TextStyle {
                color: line.color,
                size: theme.dye_label.size,
            },
        });
    }
}

fn label_position(start: ScreenPoint, end: ScreenPoint, clip: ScreenRect, size: f32) -> ScreenPoint {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let len = (dx * dx + dy * dy).sqrt().max(f32::EPSILON);
    let x = end.x + dx / len * LABEL_OFFSET;
    let y = end.y + dy / len * LABEL_OFFSET;
    let width = size * 3.0;
    ScreenPoint::new(
        x.clamp(clip.min.x, (clip.max.x - width).max(clip.min.x)),
        y.clamp(clip.min.y, (clip.max.y - size).max(clip.min.y)),
    )
}

/// Build the full render list for a plot frame.
pub fn build_render_list(
    spots: &[SpotPoint<'_>],
    dye_lines: &[DyeLine],
    transform: &Transform,
    theme: &Theme,
) -> RenderList {
    let mut list = RenderList::new();
    list.push(RenderCommand::ClipRect(transform.screen()));
    build_scatter_points(spots, transform, theme, &mut list);
    build_dye_line_commands(dye_lines, transform, theme, &mut list);
    list.push(RenderCommand::ClipEnd);
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::{ChannelIndex, ChannelPair};
    use crate::dye::DyeMatrix;
    use crate::dye_lines::{DyeLineOptions, build_dye_lines};
    use crate::spots::SpotTable;
    use crate::view::Viewport;

    fn assert_near(actual: ScreenPoint, expected: ScreenPoint) {
        assert!(
            (actual.x - expected.x).abs() < 1e-3 && (actual.y - expected.y).abs() < 1e-3,
            "expected {expected:?}, got {actual:?}"
        );
    }

    fn transform(viewport: Viewport) -> Transform {
        let rect = ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(100.0, 100.0));
        Transform::new(viewport, rect).expect("valid transform")
    }

    #[test]
    fn dye_line_becomes_segment_and_label() {
        let viewport = Viewport::from_bounds(0.0, 10.0, 0.0, 10.0);
        let channels = ChannelIndex::new(vec!["488".into(), "514".into()]).expect("index");
        let matrix = DyeMatrix::from_rows(vec![vec![1.0, 1.0], vec![0.0, 0.0]]).expect("matrix");
        let theme = Theme::default();
        let set = build_dye_lines(
            &matrix,
            &channels,
            &ChannelPair::new("488", "514"),
            &viewport,
            &theme.palette,
            DyeLineOptions::default(),
        );
        let mut list = RenderList::new();
        build_dye_line_commands(set.lines(), &transform(viewport), &theme, &mut list);
        let commands = list.commands();
        assert_eq!(commands.len(), 2);
        match &commands[0] {
            RenderCommand::LineSegments { segments, style } => {
                assert_eq!(segments.len(), 1);
                assert_near(segments[0].start, ScreenPoint::new(0.0, 100.0));
                assert_near(segments[0].end, ScreenPoint::new(100.0, 0.0));
                assert_eq!(style.color, theme.palette.color(&"488".into()));
            }
            other => panic!("unexpected command {other:?}"),
        }
        match &commands[1] {
            RenderCommand::Text { position, text, .. } => {
                assert_eq!(text, "488");
                assert!(transform(viewport).screen().contains(*position));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn scatter_groups_by_channel_and_reassignment() {
        let records = serde_json::from_value(serde_json::json!([
            {"spot_id": 1, "chan": "488", "unmixed_chan": "488",
             "chan_488_intensity": 1.0, "chan_514_intensity": 1.0},
            {"spot_id": 2, "chan": "488", "unmixed_chan": "488",
             "chan_488_intensity": 2.0, "chan_514_intensity": 2.0},
            {"spot_id": 3, "chan": "488", "unmixed_chan": "514",
             "chan_488_intensity": 3.0, "chan_514_intensity": 3.0},
            {"spot_id": 4, "chan": "514", "unmixed_chan": "514",
             "chan_488_intensity": 50.0, "chan_514_intensity": 3.0}
        ]))
        .expect("records");
        let table = SpotTable::from_records(records);
        let points = table.project(&ChannelPair::new("488", "514"));
        let theme = Theme::default();
        let mut list = RenderList::new();
        build_scatter_points(
            &points,
            &transform(Viewport::from_bounds(0.0, 10.0, 0.0, 10.0)),
            &theme,
            &mut list,
        );
        let sizes: Vec<(usize, MarkerShape)> = list
            .commands()
            .iter()
            .filter_map(|command| match command {
                RenderCommand::Points { points, style } => Some((points.len(), style.shape)),
                _ => None,
            })
            .collect();
        // Spot 4 lies outside the viewport.
        assert_eq!(
            sizes,
            vec![(2, MarkerShape::Circle), (1, MarkerShape::Cross)]
        );
    }

    #[test]
    fn render_list_is_wrapped_in_clip() {
        let list = build_render_list(
            &[],
            &[],
            &transform(Viewport::from_bounds(0.0, 1.0, 0.0, 1.0)),
            &Theme::default(),
        );
        assert!(matches!(list.commands().first(), Some(RenderCommand::ClipRect(_))));
        assert!(matches!(list.commands().last(), Some(RenderCommand::ClipEnd)));
    }

    #[test]
    fn cross_marker_strokes_span_marker_size() {
        let style = MarkerStyle {
            shape: MarkerShape::Cross,
            size: 6.0,
            ..MarkerStyle::default()
        };
        let [horizontal, vertical] = style.cross_strokes(ScreenPoint::new(10.0, 20.0));
        assert_eq!(horizontal.start, ScreenPoint::new(7.0, 20.0));
        assert_eq!(horizontal.end, ScreenPoint::new(13.0, 20.0));
        assert_eq!(vertical.start, ScreenPoint::new(10.0, 17.0));
        assert_eq!(vertical.end, ScreenPoint::new(10.0, 23.0));

        let tiny = MarkerStyle { size: 0.5, ..style };
        assert_eq!(tiny.half_extent(), 1.0);
    }
}
