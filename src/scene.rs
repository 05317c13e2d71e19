//! Scene construction and per-frame rendering.
//!
//! A [`Scene`] is built once from a configuration and a point set. It owns
//! the points, the base scales, the layout, and the tooltip overlay. Each
//! frame, [`Scene::render`] reads the controller state and emits a
//! [`RenderList`]; nothing derived from the view transform is cached.

use std::time::Instant;

use crate::axis::{AxisConfig, AxisLayout, AxisOrient, LinearScale};
use crate::config::ChartConfig;
use crate::controller::{InteractionController, TooltipState};
use crate::data::ScatterPoint;
use crate::error::ChartError;
use crate::geom::{ScreenPoint, ScreenRect};
use crate::interaction::{ChartRegions, marker_radius_factor};
use crate::render::{
    CircleMarker, Color, LineSegment, LineStyle, RectStyle, RenderCommand, RenderList, TextAnchor,
    TextStyle,
};
use crate::style::Theme;
use crate::transform::{PlotTransform, ViewTransform};
use crate::view::Range;

const TITLE_BASELINE: f32 = 25.0;
const TITLE_FONT_SIZE: f32 = 18.0;
const AXIS_FONT_SIZE: f32 = 10.0;
const TICK_SIZE: f32 = 6.0;
const TICK_PADDING: f32 = 3.0;

const BUTTON_WIDTH: f32 = 160.0;
const BUTTON_HEIGHT: f32 = 30.0;
const BUTTON_SPACING: f32 = 40.0;
const BUTTON_INSET: f32 = 170.0;
const BUTTON_RADIUS: f32 = 5.0;
const BUTTON_FONT_SIZE: f32 = 12.0;
const BUTTON_TEXT_BASELINE: f32 = 20.0;

pub const TOGGLE_LABEL: &str = "Toggle Area Selection";
pub const RESET_LABEL: &str = "Reset View";

const HIGHLIGHT_SCALE: f32 = 1.8;
const MARKER_STROKE_WIDTH: f32 = 1.5;
const HIGHLIGHT_STROKE_WIDTH: f32 = 3.0;
const GLOW_RADIUS: f32 = 3.0;

/// Canvas geometry derived from the configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneLayout {
    /// Whole logical canvas.
    pub canvas: ScreenRect,
    /// Plot area inside the margins.
    pub plot: ScreenRect,
    /// Hit-test regions (plot area and buttons).
    pub regions: ChartRegions,
}

impl SceneLayout {
    fn from_config(config: &ChartConfig) -> Self {
        let canvas = ScreenRect::from_origin_size(
            ScreenPoint::new(0.0, 0.0),
            config.width,
            config.height,
        );
        let plot = ScreenRect::from_origin_size(
            ScreenPoint::new(config.margins.left, config.margins.top),
            config.plot_width(),
            config.plot_height(),
        );
        let button_origin = ScreenPoint::new(
            config.plot_width() + config.margins.left - BUTTON_INSET,
            config.margins.top,
        );
        let toggle_button = ScreenRect::from_origin_size(button_origin, BUTTON_WIDTH, BUTTON_HEIGHT);
        let reset_button = toggle_button.translate(0.0, BUTTON_SPACING);
        Self {
            canvas,
            plot,
            regions: ChartRegions {
                plot,
                toggle_button,
                reset_button,
            },
        }
    }
}

/// Floating tooltip owned by one chart instance.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipOverlay {
    /// Offset from the pointer to the tooltip's top-left corner.
    pub offset: (f32, f32),
    /// Inner padding.
    pub padding: f32,
    /// Font size of every line.
    pub font_size: f32,
    /// Distance between baselines.
    pub line_height: f32,
    /// Corner radius of the background.
    pub corner_radius: f32,
}

impl Default for TooltipOverlay {
    fn default() -> Self {
        Self {
            offset: (10.0, -28.0),
            padding: 10.0,
            font_size: 12.0,
            line_height: 16.0,
            corner_radius: 5.0,
        }
    }
}

impl TooltipOverlay {
    /// Lines describing a point.
    pub fn lines(point: &ScatterPoint) -> [String; 3] {
        [
            format!("Cluster: {}", point.cluster),
            format!("Value: {}", point.value),
            format!("Position: ({:.2}, {:.2})", point.x, point.y),
        ]
    }

    /// Background box for `lines` next to a canvas-space pointer position.
    pub fn frame(&self, pointer: ScreenPoint, lines: &[String]) -> ScreenRect {
        let widest = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);
        // No font metrics in the core; 0.6em approximates the average glyph.
        let text_width = widest as f32 * self.font_size * 0.6;
        let text_height = lines.len() as f32 * self.line_height;
        ScreenRect::from_origin_size(
            pointer.offset(self.offset.0, self.offset.1),
            text_width + self.padding * 2.0,
            text_height + self.padding * 2.0,
        )
    }
}

/// The static scene plus everything needed to render a frame.
#[derive(Debug, Clone)]
pub struct Scene {
    config: ChartConfig,
    theme: Theme,
    points: Vec<ScatterPoint>,
    x_scale: LinearScale,
    y_scale: LinearScale,
    x_axis: AxisConfig,
    y_axis: AxisConfig,
    layout: SceneLayout,
    tooltip: Option<TooltipOverlay>,
}

impl Scene {
    /// Build the scene for `points`.
    pub fn build(config: &ChartConfig, points: Vec<ScatterPoint>) -> Result<Self, ChartError> {
        config.validate()?;
        if points.is_empty() {
            return Err(ChartError::NoData);
        }
        let layout = SceneLayout::from_config(config);
        let max_x = Range::from_values(points.iter().map(|p| p.x)).map_or(0.0, |r| r.max);
        let max_y = Range::from_values(points.iter().map(|p| p.y)).map_or(0.0, |r| r.max);
        let x_scale = LinearScale::new(
            Range::zero_based_with_headroom(max_x, config.domain_headroom),
            0.0,
            config.plot_width() as f64,
        );
        let y_scale = LinearScale::new(
            Range::zero_based_with_headroom(max_y, config.domain_headroom),
            config.plot_height() as f64,
            0.0,
        );
        log::debug!(
            "scene built: {} points, x domain {:?}, y domain {:?}",
            points.len(),
            x_scale.domain(),
            y_scale.domain()
        );
        Ok(Self {
            config: config.clone(),
            theme: Theme::default(),
            points,
            x_scale,
            y_scale,
            x_axis: AxisConfig::bottom().with_tick_count(config.tick_count),
            y_axis: AxisConfig::left().with_tick_count(config.tick_count),
            layout,
            tooltip: Some(TooltipOverlay::default()),
        })
    }

    /// Replace the theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Replace the axis configurations (for custom titles or formatters).
    pub fn with_axes(mut self, x_axis: AxisConfig, y_axis: AxisConfig) -> Self {
        self.x_axis = x_axis;
        self.y_axis = y_axis;
        self
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn points(&self) -> &[ScatterPoint] {
        &self.points
    }

    pub fn layout(&self) -> &SceneLayout {
        &self.layout
    }

    /// Fixed horizontal scale.
    pub fn x_scale(&self) -> &LinearScale {
        &self.x_scale
    }

    /// Fixed vertical scale.
    pub fn y_scale(&self) -> &LinearScale {
        &self.y_scale
    }

    /// Whether the tooltip overlay is still attached.
    pub fn has_tooltip_overlay(&self) -> bool {
        self.tooltip.is_some()
    }

    /// Release the tooltip overlay.
    pub fn teardown(&mut self) {
        if self.tooltip.take().is_some() {
            log::debug!("tooltip overlay released");
        }
    }

    /// Data-to-canvas mapping under `view`.
    pub fn plot_transform(&self, view: ViewTransform) -> Option<PlotTransform> {
        PlotTransform::new(self.x_scale, self.y_scale, view, self.layout.plot)
    }

    /// Base-scale pixel position of a point (plot-local, identity view).
    pub fn base_position(&self, index: usize) -> Option<(f64, f64)> {
        let point = self.points.get(index)?;
        Some((self.x_scale.map(point.x), self.y_scale.map(point.y)))
    }

    /// Topmost marker under a canvas position, if any.
    pub fn point_at(
        &self,
        position: ScreenPoint,
        controller: &InteractionController,
        now: Instant,
    ) -> Option<usize> {
        if !self.layout.plot.contains(position) {
            return None;
        }
        let transform = self.plot_transform(controller.transform())?;
        let k = controller.transform().k;
        self.points
            .iter()
            .enumerate()
            .rev()
            .find(|(index, point)| {
                let center = transform.data_to_screen(point.position());
                let radius = self.marker_radius(point, k, controller.emphasis(*index, now));
                let (dx, dy) = (position.x - center.x, position.y - center.y);
                dx * dx + dy * dy <= radius * radius
            })
            .map(|(index, _)| index)
    }

    /// Render the current frame.
    pub fn render(&self, controller: &InteractionController, now: Instant) -> RenderList {
        let mut list = RenderList::new();
        let Some(transform) = self.plot_transform(controller.transform()) else {
            return list;
        };

        list.push(RenderCommand::Rect {
            rect: self.layout.canvas,
            style: RectStyle {
                fill: self.theme.background,
                stroke: Color::TRANSPARENT,
                stroke_width: 0.0,
                corner_radius: 0.0,
            },
        });
        list.push(RenderCommand::Text {
            position: ScreenPoint::new(self.config.width * 0.5, TITLE_BASELINE),
            text: self.config.title.clone(),
            style: TextStyle {
                color: self.theme.title,
                size: TITLE_FONT_SIZE,
                bold: true,
                anchor: TextAnchor::Middle,
            },
        });

        let x_layout = self.x_axis.layout(&transform.visible_x_scale());
        let y_layout = self.y_axis.layout(&transform.visible_y_scale());
        self.push_axis(&mut list, &x_layout, self.x_axis.title());
        self.push_axis(&mut list, &y_layout, self.y_axis.title());

        list.push(RenderCommand::ClipRect(self.layout.plot));
        list.push(RenderCommand::Circles(self.markers(
            &transform,
            controller,
            now,
        )));
        if controller.gesture_config().brush_armed {
            if let Some(selection) = controller.brush_selection() {
                let plot = self.layout.plot;
                list.push(RenderCommand::Rect {
                    rect: selection.translate(plot.min.x, plot.min.y),
                    style: RectStyle {
                        fill: self.theme.brush_fill,
                        stroke: self.theme.brush_stroke,
                        stroke_width: 1.0,
                        corner_radius: 0.0,
                    },
                });
            }
        }
        list.push(RenderCommand::ClipEnd);

        let area_select = controller.mode().is_area_select();
        self.push_button(
            &mut list,
            self.layout.regions.toggle_button,
            TOGGLE_LABEL,
            self.theme.toggle_fill(area_select),
        );
        self.push_button(
            &mut list,
            self.layout.regions.reset_button,
            RESET_LABEL,
            self.theme.button_fill,
        );

        if let (Some(overlay), Some(state)) = (&self.tooltip, controller.tooltip()) {
            self.push_tooltip(&mut list, overlay, state, now);
        }
        list
    }

    fn marker_radius(&self, point: &ScatterPoint, k: f64, emphasis: f32) -> f32 {
        let rest = point.size * marker_radius_factor(k) as f32;
        let highlighted = point.size * HIGHLIGHT_SCALE;
        rest + (highlighted - rest) * emphasis
    }

    fn markers(
        &self,
        transform: &PlotTransform,
        controller: &InteractionController,
        now: Instant,
    ) -> Vec<CircleMarker> {
        let k = transform.view().k;
        let mut markers = Vec::with_capacity(self.points.len());
        for (index, point) in self.points.iter().enumerate() {
            let center = transform.data_to_screen(point.position());
            let emphasis = controller.emphasis(index, now);
            let radius = self.marker_radius(point, k, emphasis);
            if emphasis > 0.0 {
                markers.push(CircleMarker {
                    center,
                    radius: radius + GLOW_RADIUS * emphasis,
                    fill: self.theme.marker_glow,
                    stroke: Color::TRANSPARENT,
                    stroke_width: 0.0,
                    opacity: emphasis,
                });
            }
            markers.push(CircleMarker {
                center,
                radius,
                fill: point.color,
                stroke: self
                    .theme
                    .marker_stroke
                    .lerp(self.theme.marker_highlight_stroke, emphasis),
                stroke_width: MARKER_STROKE_WIDTH
                    + (HIGHLIGHT_STROKE_WIDTH - MARKER_STROKE_WIDTH) * emphasis,
                opacity: self.theme.marker_opacity + (1.0 - self.theme.marker_opacity) * emphasis,
            });
        }
        markers
    }

    fn push_axis(&self, list: &mut RenderList, layout: &AxisLayout, title: Option<&str>) {
        let plot = self.layout.plot;
        let style = LineStyle {
            color: self.theme.axis,
            width: 1.0,
        };
        let label_style = |anchor| TextStyle {
            color: self.theme.axis,
            size: AXIS_FONT_SIZE,
            bold: false,
            anchor,
        };
        let (start, end) = layout.extent;
        let visible = |position: f32| position >= start - 0.5 && position <= end + 0.5;
        let mut segments = Vec::with_capacity(layout.ticks.len() + 3);
        let mut labels = Vec::with_capacity(layout.ticks.len());

        match layout.orient {
            AxisOrient::Bottom => {
                let y = plot.max.y;
                let left = plot.min.x + start;
                let right = plot.min.x + end;
                segments.push(LineSegment::new(
                    ScreenPoint::new(left, y),
                    ScreenPoint::new(right, y),
                ));
                for x in [left, right] {
                    segments.push(LineSegment::new(
                        ScreenPoint::new(x, y),
                        ScreenPoint::new(x, y + TICK_SIZE),
                    ));
                }
                for tick in layout.ticks.iter().filter(|tick| visible(tick.position)) {
                    let x = plot.min.x + tick.position;
                    segments.push(LineSegment::new(
                        ScreenPoint::new(x, y),
                        ScreenPoint::new(x, y + TICK_SIZE),
                    ));
                    labels.push((
                        ScreenPoint::new(x, y + TICK_SIZE + TICK_PADDING + AXIS_FONT_SIZE),
                        tick.label.clone(),
                    ));
                }
                if let Some(title) = title {
                    labels.push((
                        ScreenPoint::new(plot.center().x, y + TICK_SIZE + 2.0 * AXIS_FONT_SIZE + 12.0),
                        title.to_string(),
                    ));
                }
                list.push(RenderCommand::LineSegments { segments, style });
                for (position, text) in labels {
                    list.push(RenderCommand::Text {
                        position,
                        text,
                        style: label_style(TextAnchor::Middle),
                    });
                }
            }
            AxisOrient::Left => {
                let x = plot.min.x;
                let top = plot.min.y + start;
                let bottom = plot.min.y + end;
                segments.push(LineSegment::new(
                    ScreenPoint::new(x, top),
                    ScreenPoint::new(x, bottom),
                ));
                for y in [top, bottom] {
                    segments.push(LineSegment::new(
                        ScreenPoint::new(x - TICK_SIZE, y),
                        ScreenPoint::new(x, y),
                    ));
                }
                for tick in layout.ticks.iter().filter(|tick| visible(tick.position)) {
                    let y = plot.min.y + tick.position;
                    segments.push(LineSegment::new(
                        ScreenPoint::new(x - TICK_SIZE, y),
                        ScreenPoint::new(x, y),
                    ));
                    labels.push((
                        ScreenPoint::new(x - TICK_SIZE - TICK_PADDING, y + AXIS_FONT_SIZE * 0.32),
                        tick.label.clone(),
                    ));
                }
                list.push(RenderCommand::LineSegments { segments, style });
                for (position, text) in labels {
                    list.push(RenderCommand::Text {
                        position,
                        text,
                        style: label_style(TextAnchor::End),
                    });
                }
                if let Some(title) = title {
                    list.push(RenderCommand::Text {
                        position: ScreenPoint::new(x, plot.min.y - 8.0),
                        text: title.to_string(),
                        style: label_style(TextAnchor::Middle),
                    });
                }
            }
        }
    }

    fn push_button(&self, list: &mut RenderList, rect: ScreenRect, label: &str, fill: Color) {
        list.push(RenderCommand::Rect {
            rect,
            style: RectStyle {
                fill,
                stroke: self.theme.button_stroke,
                stroke_width: 1.0,
                corner_radius: BUTTON_RADIUS,
            },
        });
        list.push(RenderCommand::Text {
            position: ScreenPoint::new(rect.center().x, rect.min.y + BUTTON_TEXT_BASELINE),
            text: label.to_string(),
            style: TextStyle {
                color: self.theme.button_text,
                size: BUTTON_FONT_SIZE,
                bold: false,
                anchor: TextAnchor::Middle,
            },
        });
    }

    fn push_tooltip(
        &self,
        list: &mut RenderList,
        overlay: &TooltipOverlay,
        state: &TooltipState,
        now: Instant,
    ) {
        let opacity = state.opacity.value(now);
        if opacity <= 0.0 {
            return;
        }
        let Some(point) = self.points.get(state.point) else {
            return;
        };
        let plot = self.layout.plot;
        let pointer = ScreenPoint::new(
            plot.min.x + state.anchor.0 as f32,
            plot.min.y + state.anchor.1 as f32,
        );
        let lines = TooltipOverlay::lines(point);
        let frame = overlay.frame(pointer, &lines);
        list.push(RenderCommand::Rect {
            rect: frame,
            style: RectStyle {
                fill: self.theme.tooltip_bg.fade(opacity),
                stroke: Color::TRANSPARENT,
                stroke_width: 0.0,
                corner_radius: overlay.corner_radius,
            },
        });
        let mut baseline = frame.min.y + overlay.padding + overlay.font_size;
        for line in lines {
            list.push(RenderCommand::Text {
                position: ScreenPoint::new(frame.min.x + overlay.padding, baseline),
                text: line,
                style: TextStyle {
                    color: self.theme.tooltip_text.fade(opacity),
                    size: overlay.font_size,
                    bold: false,
                    anchor: TextAnchor::Start,
                },
            });
            baseline += overlay.line_height;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::data::generate_points;
    use crate::interaction::{InteractionMode, WheelDelta};

    fn scene() -> (Scene, InteractionController) {
        let config = ChartConfig::default();
        let points = generate_points(&mut StdRng::seed_from_u64(42), &config);
        let scene = Scene::build(&config, points).unwrap();
        (scene, InteractionController::new(&config))
    }

    fn marker_circles(list: &RenderList) -> Vec<CircleMarker> {
        list.circles().copied().collect()
    }

    #[test]
    fn layout_matches_widget() {
        let (scene, _) = scene();
        let layout = scene.layout();
        assert_eq!(layout.plot.min, ScreenPoint::new(50.0, 50.0));
        assert_eq!(layout.plot.width(), 700.0);
        assert_eq!(layout.plot.height(), 400.0);
        assert_eq!(layout.regions.toggle_button.min, ScreenPoint::new(580.0, 50.0));
        assert_eq!(layout.regions.toggle_button.width(), 160.0);
        assert_eq!(layout.regions.reset_button.min, ScreenPoint::new(580.0, 90.0));
    }

    #[test]
    fn domains_carry_headroom() {
        let (scene, _) = scene();
        let max_x = scene.points().iter().map(|p| p.x).fold(f64::MIN, f64::max);
        let domain = scene.x_scale().domain();
        assert_eq!(domain.min, 0.0);
        assert!((domain.max - max_x * 1.1).abs() < 1e-9);
        assert_eq!(scene.y_scale().range(), (400.0, 0.0));
    }

    #[test]
    fn identity_renders_points_at_base_scale() {
        let (scene, controller) = scene();
        let list = scene.render(&controller, Instant::now());
        let circles = marker_circles(&list);
        assert_eq!(circles.len(), scene.points().len());
        for (circle, point) in circles.iter().zip(scene.points()) {
            let expected = ScreenPoint::new(
                50.0 + scene.x_scale().map(point.x) as f32,
                50.0 + scene.y_scale().map(point.y) as f32,
            );
            assert_eq!(circle.center, expected);
            assert_eq!(circle.radius, point.size);
            assert_eq!(circle.fill, point.color);
            assert_eq!(circle.stroke, Color::WHITE);
            assert_eq!(circle.stroke_width, 1.5);
            assert_eq!(circle.opacity, 0.8);
        }
    }

    #[test]
    fn render_order() {
        let (scene, controller) = scene();
        let list = scene.render(&controller, Instant::now());
        let commands = list.commands();
        assert!(matches!(commands[0], RenderCommand::Rect { .. }));
        assert!(
            matches!(&commands[1], RenderCommand::Text { text, .. } if text == "Interactive Scatter Chart")
        );
        let clip = commands
            .iter()
            .position(|c| matches!(c, RenderCommand::ClipRect(_)))
            .unwrap();
        assert!(matches!(commands[clip + 1], RenderCommand::Circles(_)));
        assert!(matches!(commands[clip + 2], RenderCommand::ClipEnd));
        let texts: Vec<&str> = list.texts().collect();
        let toggle = texts.iter().position(|t| *t == TOGGLE_LABEL).unwrap();
        assert_eq!(texts[toggle + 1], RESET_LABEL);
        assert_eq!(texts.last(), Some(&RESET_LABEL));
    }

    #[test]
    fn zoom_moves_points_and_shrinks_markers() {
        let (scene, mut controller) = scene();
        let now = Instant::now();
        controller.wheel((350.0, 200.0), -1000.0, WheelDelta::Pixels, now);
        let k = controller.transform().k;
        assert!((k - 4.0).abs() < 1e-9);
        let list = scene.render(&controller, now);
        let view = controller.transform();
        for (circle, (index, point)) in marker_circles(&list).iter().zip(scene.points().iter().enumerate()) {
            let (bx, by) = scene.base_position(index).unwrap();
            let (lx, ly) = view.apply((bx, by));
            assert!((circle.center.x - (50.0 + lx as f32)).abs() < 1e-3);
            assert!((circle.center.y - (50.0 + ly as f32)).abs() < 1e-3);
            assert!((circle.radius - point.size * 0.7).abs() < 1e-5);
        }
    }

    #[test]
    fn axes_follow_the_view() {
        let (scene, mut controller) = scene();
        let now = Instant::now();
        let before: Vec<String> = scene.render(&controller, now).texts().map(str::to_string).collect();
        controller.wheel((0.0, 400.0), -2500.0, WheelDelta::Pixels, now);
        let after: Vec<String> = scene.render(&controller, now).texts().map(str::to_string).collect();
        assert_ne!(before, after);
        assert!(before.iter().any(|label| label == "0"));
    }

    #[test]
    fn toggle_button_fill_tracks_mode() {
        let (scene, mut controller) = scene();
        let now = Instant::now();
        let fill = |list: &RenderList| {
            list.commands()
                .iter()
                .find_map(|command| match command {
                    RenderCommand::Rect { rect, style } if *rect == scene.layout().regions.toggle_button => {
                        Some(style.fill)
                    }
                    _ => None,
                })
                .unwrap()
        };
        assert_eq!(fill(&scene.render(&controller, now)), Color::from_hex(0xf0f0f0));
        controller.toggle_mode(now);
        assert_eq!(controller.mode(), InteractionMode::AreaSelect);
        assert_eq!(fill(&scene.render(&controller, now)), Color::from_hex(0xd0d0d0));
    }

    #[test]
    fn brush_rect_only_while_selecting() {
        let (scene, mut controller) = scene();
        let now = Instant::now();
        let brush_rects = |list: &RenderList| {
            list.commands()
                .iter()
                .filter(|command| {
                    matches!(command, RenderCommand::Rect { style, .. } if style.fill == Theme::default().brush_fill)
                })
                .count()
        };
        controller.toggle_mode(now);
        assert_eq!(brush_rects(&scene.render(&controller, now)), 0);
        controller.pointer_down((10.0, 10.0), now);
        controller.pointer_move((80.0, 60.0), now);
        let list = scene.render(&controller, now);
        assert_eq!(brush_rects(&list), 1);
        controller.pointer_up((80.0, 60.0), now);
        assert_eq!(brush_rects(&scene.render(&controller, now)), 0);
    }

    #[test]
    fn hovered_marker_grows_and_gets_tooltip() {
        let (scene, mut controller) = scene();
        let now = Instant::now();
        let index = 7;
        let (bx, by) = scene.base_position(index).unwrap();
        let pointer = ScreenPoint::new(50.0 + bx as f32, 50.0 + by as f32);
        assert!(scene.point_at(pointer, &controller, now).is_some());
        controller.set_hover(Some(index), Some((bx, by)), now);
        controller.wheel((350.0, 200.0), -1000.0, WheelDelta::Pixels, now);
        let later = now + Duration::from_millis(250);
        let list = scene.render(&controller, later);
        let point = &scene.points()[index];
        let circles = marker_circles(&list);
        assert_eq!(circles.len(), scene.points().len() + 1);
        let grown = circles
            .iter()
            .find(|circle| circle.fill == point.color && (circle.radius - point.size * 1.8).abs() < 1e-4)
            .unwrap();
        assert_eq!(grown.stroke_width, 3.0);
        assert_eq!(grown.opacity, 1.0);

        let texts: Vec<&str> = list.texts().collect();
        assert!(texts.contains(&format!("Cluster: {}", point.cluster).as_str()));
        assert!(texts.contains(&format!("Value: {}", point.value).as_str()));
        let position = format!("Position: ({:.2}, {:.2})", point.x, point.y);
        assert!(texts.contains(&position.as_str()));
    }

    #[test]
    fn point_at_finds_marker_under_pointer() {
        let (scene, controller) = scene();
        let now = Instant::now();
        let index = scene.points().len() - 1;
        let (bx, by) = scene.base_position(index).unwrap();
        let pointer = ScreenPoint::new(50.0 + bx as f32, 50.0 + by as f32);
        let hit = scene.point_at(pointer, &controller, now).unwrap();
        let (hx, hy) = scene.base_position(hit).unwrap();
        let radius = scene.points()[hit].size as f64;
        assert!((hx - bx).hypot(hy - by) <= radius + 1e-3);
        assert_eq!(scene.point_at(ScreenPoint::new(5.0, 5.0), &controller, now), None);
    }

    #[test]
    fn teardown_removes_tooltip() {
        let (mut scene, mut controller) = scene();
        let now = Instant::now();
        controller.set_hover(Some(0), Some((20.0, 20.0)), now);
        let shown = now + Duration::from_millis(300);
        assert!(scene.render(&controller, shown).texts().any(|t| t.starts_with("Cluster:")));
        scene.teardown();
        assert!(!scene.has_tooltip_overlay());
        assert!(!scene.render(&controller, shown).texts().any(|t| t.starts_with("Cluster:")));
    }

    #[test]
    fn tooltip_sits_next_to_pointer() {
        let overlay = TooltipOverlay::default();
        let lines = ["Cluster: 1".to_string(), "Value: 2".to_string()];
        let frame = overlay.frame(ScreenPoint::new(100.0, 100.0), &lines);
        assert_eq!(frame.min, ScreenPoint::new(110.0, 72.0));
        assert_eq!(frame.height(), 2.0 * 16.0 + 20.0);
    }

    #[test]
    fn theme_drives_background() {
        let (scene, controller) = scene();
        let scene = scene.with_theme(Theme::dark());
        let list = scene.render(&controller, Instant::now());
        assert!(matches!(
            &list.commands()[0],
            RenderCommand::Rect { style, .. } if style.fill == Theme::dark().background
        ));
    }

    #[test]
    fn build_rejects_bad_input() {
        let config = ChartConfig::default();
        assert_eq!(Scene::build(&config, Vec::new()).unwrap_err(), ChartError::NoData);
        let bad = ChartConfig::default().with_size(0.0, 500.0);
        let points = generate_points(&mut StdRng::seed_from_u64(1), &config);
        assert!(matches!(
            Scene::build(&bad, points),
            Err(ChartError::InvalidCanvas { .. })
        ));
    }
}
