use gpui::{
    App, BorderStyle, Bounds, ContentMask, Corners, Edges, PathBuilder, Pixels, TextRun, Window,
    font, point, px, quad,
};

use crate::geom::{ScreenPoint, ScreenRect};
use crate::render::{
    Color, LineSegment, LineStyle, MarkerShape, MarkerStyle, RenderCommand, RenderList, TextStyle,
};

/// Screen rectangle covering GPUI element bounds.
pub fn screen_rect(bounds: Bounds<Pixels>) -> ScreenRect {
    let min = ScreenPoint::new(f32::from(bounds.origin.x), f32::from(bounds.origin.y));
    ScreenRect::new(
        min,
        ScreenPoint::new(
            min.x + f32::from(bounds.size.width),
            min.y + f32::from(bounds.size.height),
        ),
    )
}

/// Paint a spot plot render list.
///
/// Clip rectangles nest; drawing commands use the innermost one.
pub fn paint_render_list(list: &RenderList, window: &mut Window, cx: &mut App) {
    let mut clips: Vec<ContentMask<Pixels>> = Vec::new();
    for command in list.commands() {
        match command {
            RenderCommand::ClipRect(rect) => clips.push(ContentMask {
                bounds: pixel_bounds(*rect),
            }),
            RenderCommand::ClipEnd => {
                clips.pop();
            }
            _ => {
                let mask = clips.last().cloned();
                window.with_content_mask(mask, |window| draw(window, cx, command));
            }
        }
    }
}

fn draw(window: &mut Window, cx: &mut App, command: &RenderCommand) {
    match command {
        RenderCommand::LineSegments { segments, style } => {
            stroke_segments(window, segments.iter().copied(), *style);
        }
        RenderCommand::Points { points, style } => paint_markers(window, points, *style),
        RenderCommand::Text {
            position,
            text,
            style,
        } => paint_label(window, cx, *position, text, style),
        RenderCommand::ClipRect(_) | RenderCommand::ClipEnd => {}
    }
}

fn stroke_segments(
    window: &mut Window,
    segments: impl IntoIterator<Item = LineSegment>,
    style: LineStyle,
) {
    let mut builder = PathBuilder::stroke(px(style.width.max(0.5)));
    let mut empty = true;
    for segment in segments {
        builder.move_to(point(px(segment.start.x), px(segment.start.y)));
        builder.line_to(point(px(segment.end.x), px(segment.end.y)));
        empty = false;
    }
    if empty {
        return;
    }
    if let Ok(path) = builder.build() {
        window.paint_path(path, rgba(style.color));
    }
}

fn paint_markers(window: &mut Window, points: &[ScreenPoint], style: MarkerStyle) {
    match style.shape {
        MarkerShape::Circle => {
            let half = style.half_extent();
            for center in points {
                let bounds = Bounds::from_corners(
                    point(px(center.x - half), px(center.y - half)),
                    point(px(center.x + half), px(center.y + half)),
                );
                window.paint_quad(quad(
                    bounds,
                    Corners::all(px(half)),
                    rgba(style.color),
                    Edges::all(px(0.0)),
                    rgba(style.color),
                    BorderStyle::default(),
                ));
            }
        }
        MarkerShape::Cross => {
            let strokes = points
                .iter()
                .flat_map(|center| style.cross_strokes(*center));
            let line = LineStyle {
                color: style.color,
                width: 1.0,
            };
            stroke_segments(window, strokes, line);
        }
    }
}

fn paint_label(
    window: &mut Window,
    cx: &mut App,
    position: ScreenPoint,
    text: &str,
    style: &TextStyle,
) {
    if text.is_empty() {
        return;
    }
    let run = TextRun {
        len: text.len(),
        font: font(".SystemUIFont"),
        color: gpui::Hsla::from(rgba(style.color)),
        background_color: None,
        underline: None,
        strikethrough: None,
    };
    let shaped = window
        .text_system()
        .shape_line(text.to_string().into(), px(style.size), &[run], None);
    let line_height = shaped.ascent + shaped.descent;
    let _ = shaped.paint(point(px(position.x), px(position.y)), line_height, window, cx);
}

fn rgba(color: Color) -> gpui::Rgba {
    gpui::Rgba {
        r: color.r,
        g: color.g,
        b: color.b,
        a: color.a,
    }
}

fn pixel_bounds(rect: ScreenRect) -> Bounds<Pixels> {
    Bounds::from_corners(
        point(px(rect.min.x), px(rect.min.y)),
        point(px(rect.max.x), px(rect.max.y)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_rect_matches_pixel_bounds() {
        let rect = ScreenRect::new(ScreenPoint::new(12.0, 8.0), ScreenPoint::new(412.0, 308.0));
        assert_eq!(screen_rect(pixel_bounds(rect)), rect);
    }

    #[test]
    fn colors_keep_alpha() {
        let color = rgba(Color::new(0.1, 0.2, 0.3, 0.6));
        assert_eq!((color.r, color.g, color.b, color.a), (0.1, 0.2, 0.3, 0.6));
    }
}
