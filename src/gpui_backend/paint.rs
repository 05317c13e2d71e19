use gpui::{
    App, BorderStyle, Bounds, ContentMask, Corners, Edges, FontWeight, PathBuilder, Pixels,
    TextRun, Window, font, point, px, quad,
};

use crate::geom::{ScreenPoint, ScreenRect};
use crate::render::{
    CircleMarker, Color, LineSegment, LineStyle, RectStyle, RenderCommand, TextAnchor, TextStyle,
};

use super::frame::{CanvasMapping, ChartFrame};

pub(crate) fn paint_frame(frame: &ChartFrame, window: &mut Window, cx: &mut App) {
    let mapping = &frame.mapping;
    let mut clip_stack: Vec<ContentMask<Pixels>> = Vec::new();
    for command in frame.render.commands() {
        match command {
            RenderCommand::ClipRect(rect) => {
                clip_stack.push(ContentMask {
                    bounds: to_bounds(mapping, *rect),
                });
            }
            RenderCommand::ClipEnd => {
                clip_stack.pop();
            }
            RenderCommand::LineSegments { segments, style } => {
                with_clip(window, &clip_stack, |window| {
                    paint_lines(window, mapping, segments, *style);
                });
            }
            RenderCommand::Circles(markers) => {
                with_clip(window, &clip_stack, |window| {
                    paint_circles(window, mapping, markers);
                });
            }
            RenderCommand::Rect { rect, style } => {
                with_clip(window, &clip_stack, |window| {
                    paint_rect(window, mapping, *rect, *style);
                });
            }
            RenderCommand::Text {
                position,
                text,
                style,
            } => {
                with_clip(window, &clip_stack, |window| {
                    paint_text(window, cx, mapping, &frame.font_family, *position, text, style);
                });
            }
        }
    }
}

fn paint_lines(
    window: &mut Window,
    mapping: &CanvasMapping,
    segments: &[LineSegment],
    style: LineStyle,
) {
    if segments.is_empty() {
        return;
    }
    let width = mapping.length(style.width).max(0.5);
    let mut builder = PathBuilder::stroke(px(width));
    for segment in segments {
        let start = mapping.to_window(segment.start);
        let end = mapping.to_window(segment.end);
        builder.move_to(point(px(start.x), px(start.y)));
        builder.line_to(point(px(end.x), px(end.y)));
    }
    if let Ok(path) = builder.build() {
        window.paint_path(path, to_rgba(style.color));
    }
}

fn paint_circles(window: &mut Window, mapping: &CanvasMapping, markers: &[CircleMarker]) {
    for marker in markers {
        let radius = mapping.length(marker.radius);
        if radius <= 0.0 || marker.opacity <= 0.0 {
            continue;
        }
        let center = mapping.to_window(marker.center);
        let bounds = Bounds::from_corners(
            point(px(center.x - radius), px(center.y - radius)),
            point(px(center.x + radius), px(center.y + radius)),
        );
        window.paint_quad(quad(
            bounds,
            Corners::all(px(radius)),
            to_rgba(marker.fill.fade(marker.opacity)),
            Edges::all(px(mapping.length(marker.stroke_width))),
            to_rgba(marker.stroke.fade(marker.opacity)),
            BorderStyle::default(),
        ));
    }
}

fn paint_rect(window: &mut Window, mapping: &CanvasMapping, rect: ScreenRect, style: RectStyle) {
    let bounds = to_bounds(mapping, rect);
    let quad = quad(
        bounds,
        Corners::all(px(mapping.length(style.corner_radius))),
        to_rgba(style.fill),
        Edges::all(px(mapping.length(style.stroke_width))),
        to_rgba(style.stroke),
        BorderStyle::default(),
    );
    window.paint_quad(quad);
}

fn paint_text(
    window: &mut Window,
    cx: &mut App,
    mapping: &CanvasMapping,
    family: &str,
    position: ScreenPoint,
    text: &str,
    style: &TextStyle,
) {
    if text.is_empty() || style.color.a <= 0.0 {
        return;
    }
    let mut text_font = font(family.to_string());
    if style.bold {
        text_font.weight = FontWeight::BOLD;
    }
    let run = TextRun {
        len: text.len(),
        font: text_font,
        color: to_hsla(style.color),
        background_color: None,
        underline: None,
        strikethrough: None,
    };
    let shaped = window.text_system().shape_line(
        text.to_string().into(),
        px(mapping.length(style.size)),
        &[run],
        None,
    );
    let width = f32::from(shaped.width);
    let ascent = f32::from(shaped.ascent);
    let anchor = mapping.to_window(position);
    let x = match style.anchor {
        TextAnchor::Start => anchor.x,
        TextAnchor::Middle => anchor.x - width * 0.5,
        TextAnchor::End => anchor.x - width,
    };
    let line_height = shaped.ascent + shaped.descent;
    let origin = point(px(x), px(anchor.y - ascent));
    if let Err(err) = shaped.paint(origin, line_height, window, cx) {
        log::trace!("text paint failed: {err}");
    }
}

fn to_rgba(color: Color) -> gpui::Rgba {
    gpui::Rgba {
        r: color.r,
        g: color.g,
        b: color.b,
        a: color.a,
    }
}

pub(crate) fn to_hsla(color: Color) -> gpui::Hsla {
    gpui::Hsla::from(to_rgba(color))
}

fn to_bounds(mapping: &CanvasMapping, rect: ScreenRect) -> Bounds<Pixels> {
    let min = mapping.to_window(rect.min);
    let max = mapping.to_window(rect.max);
    Bounds::from_corners(point(px(min.x), px(min.y)), point(px(max.x), px(max.y)))
}

fn with_clip(window: &mut Window, stack: &[ContentMask<Pixels>], f: impl FnOnce(&mut Window)) {
    if let Some(mask) = stack.last() {
        window.with_content_mask(Some(mask.clone()), f);
    } else {
        f(window);
    }
}
