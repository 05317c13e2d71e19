//! The scatter chart widget: a scene plus its interaction controller.
//!
//! [`ScatterChart`] takes pointer input in logical canvas coordinates, routes
//! it to the buttons, markers, or the controller, and renders frames.

use std::time::Instant;

use crate::config::ChartConfig;
use crate::controller::{GestureEnd, GestureState, InteractionController};
use crate::data::{ScatterPoint, generate_random_points};
use crate::error::ChartError;
use crate::geom::ScreenPoint;
use crate::interaction::{GestureConfig, HitRegion, InteractionMode, WheelDelta};
use crate::render::RenderList;
use crate::scene::Scene;
use crate::style::Theme;
use crate::transform::ViewTransform;

/// Cursor the host should show over a canvas position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    /// Plain arrow.
    Default,
    /// Over a button or a clickable marker.
    Pointer,
    /// Over the plot area with pan armed.
    Grab,
    /// While drag-panning.
    Grabbing,
    /// Over the plot area with the brush armed.
    Crosshair,
}

#[derive(Debug, Clone, Copy)]
struct Press {
    region: HitRegion,
    point: Option<usize>,
}

/// Interactive scatter chart.
#[derive(Debug, Clone)]
pub struct ScatterChart {
    scene: Scene,
    controller: InteractionController,
    press: Option<Press>,
    pointer: Option<ScreenPoint>,
}

impl ScatterChart {
    /// Build a chart over `points`.
    pub fn new(config: ChartConfig, points: Vec<ScatterPoint>) -> Result<Self, ChartError> {
        let scene = Scene::build(&config, points)?;
        let controller = InteractionController::new(&config);
        Ok(Self {
            scene,
            controller,
            press: None,
            pointer: None,
        })
    }

    /// Build a chart over freshly generated random clusters.
    pub fn with_random_points(config: ChartConfig) -> Result<Self, ChartError> {
        config.validate()?;
        let points = generate_random_points(&config);
        Self::new(config, points)
    }

    /// Replace the theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.scene = self.scene.with_theme(theme);
        self
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    /// Current view transform.
    pub fn transform(&self) -> ViewTransform {
        self.controller.transform()
    }

    /// Current interaction mode.
    pub fn mode(&self) -> InteractionMode {
        self.controller.mode()
    }

    /// Current gesture wiring.
    pub fn gesture_config(&self) -> GestureConfig {
        self.controller.gesture_config()
    }

    /// Logical canvas size.
    pub fn canvas_size(&self) -> (f32, f32) {
        let canvas = self.scene.layout().canvas;
        (canvas.width(), canvas.height())
    }

    /// Canvas position of a point under the current transform.
    pub fn screen_position(&self, index: usize) -> Option<ScreenPoint> {
        let point = self.scene.points().get(index)?;
        let transform = self.scene.plot_transform(self.controller.transform())?;
        Some(transform.data_to_screen(point.position()))
    }

    /// Pointer pressed. Returns whether a redraw is needed.
    pub fn pointer_down(&mut self, position: ScreenPoint, now: Instant) -> bool {
        if !self.controller.is_mounted() {
            return false;
        }
        self.pointer = Some(position);
        let region = self.scene.layout().regions.hit_test(position);
        let point = match region {
            HitRegion::Plot if self.controller.gesture_config().pan_zoom_armed => {
                self.scene.point_at(position, &self.controller, now)
            }
            _ => None,
        };
        self.press = Some(Press { region, point });
        match region {
            HitRegion::Plot => self.controller.pointer_down(self.local(position), now),
            HitRegion::Outside if self.on_zoom_surface(position) => {
                self.controller.pointer_down(self.local(position), now)
            }
            HitRegion::ToggleButton | HitRegion::ResetButton | HitRegion::Outside => false,
        }
    }

    /// Pointer moved. Returns whether a redraw is needed.
    pub fn pointer_move(&mut self, position: ScreenPoint, now: Instant) -> bool {
        if !self.controller.is_mounted() {
            return false;
        }
        self.pointer = Some(position);
        let changed = self.controller.pointer_move(self.local(position), now);
        let hover_changed = match self.controller.gesture() {
            GestureState::Idle | GestureState::Zooming { .. } => self.update_hover(position, now),
            GestureState::Panning { .. } | GestureState::BrushSelecting { .. } => false,
        };
        changed || hover_changed
    }

    /// Pointer released. Returns whether a redraw is needed.
    pub fn pointer_up(&mut self, position: ScreenPoint, now: Instant) -> bool {
        let Some(press) = self.press.take() else {
            return self.controller.pointer_up(self.local(position), now) != GestureEnd::None;
        };
        let region = self.scene.layout().regions.hit_test(position);
        match press.region {
            HitRegion::ToggleButton if region == HitRegion::ToggleButton => {
                self.toggle_area_selection(now);
                true
            }
            HitRegion::ResetButton if region == HitRegion::ResetButton => {
                self.reset_view(now);
                true
            }
            HitRegion::Plot | HitRegion::Outside => match self.controller.pointer_up(self.local(position), now) {
                GestureEnd::Click => match press.point {
                    Some(index) => self.click_point(index, now).is_some(),
                    None => false,
                },
                GestureEnd::None => false,
                GestureEnd::Panned | GestureEnd::Brushed(_) => true,
            },
            HitRegion::ToggleButton | HitRegion::ResetButton => false,
        }
    }

    /// The button was released somewhere the host could not report, such as
    /// outside its window. Ends any drag in progress.
    pub fn pointer_cancel(&mut self) -> bool {
        self.press = None;
        self.controller.cancel_gesture()
    }

    /// Pointer left the canvas.
    pub fn pointer_leave(&mut self, now: Instant) -> bool {
        self.pointer = None;
        let had_hover = self.controller.hovered().is_some();
        self.controller.set_hover(None, None, now);
        had_hover
    }

    /// Wheel input anywhere on the canvas. Returns whether the view changed.
    pub fn wheel(&mut self, position: ScreenPoint, delta_y: f64, unit: WheelDelta, now: Instant) -> bool {
        if !self.scene.layout().canvas.contains(position) {
            return false;
        }
        let applied = self.controller.wheel(self.local(position), delta_y, unit, now);
        if applied {
            self.refresh_hover(now);
        }
        applied
    }

    /// Flip between pan/zoom and area selection.
    pub fn toggle_area_selection(&mut self, now: Instant) -> InteractionMode {
        self.controller.toggle_mode(now).mode
    }

    /// Animate back to the initial view.
    pub fn reset_view(&mut self, now: Instant) {
        self.controller.reset(now);
    }

    /// Zoom in on a point. Returns the target transform.
    pub fn click_point(&mut self, index: usize, now: Instant) -> Option<ViewTransform> {
        if !self.controller.is_mounted() {
            return None;
        }
        let base = self.scene.base_position(index)?;
        Some(self.controller.click_point(base, now))
    }

    /// Advance animations. Returns whether another frame is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let revision = self.controller.revision();
        let animating = self.controller.tick(now);
        let hover_changed = self.controller.revision() != revision && self.refresh_hover(now);
        animating || hover_changed
    }

    /// Render the frame at `now`.
    pub fn render(&self, now: Instant) -> RenderList {
        self.scene.render(&self.controller, now)
    }

    /// Cursor to show over `position`.
    pub fn cursor_at(&self, position: ScreenPoint, now: Instant) -> CursorHint {
        if matches!(self.controller.gesture(), GestureState::Panning { .. }) {
            return CursorHint::Grabbing;
        }
        match self.scene.layout().regions.hit_test(position) {
            HitRegion::ToggleButton | HitRegion::ResetButton => CursorHint::Pointer,
            HitRegion::Plot if self.controller.gesture_config().brush_armed => CursorHint::Crosshair,
            HitRegion::Plot => {
                if self.scene.point_at(position, &self.controller, now).is_some() {
                    CursorHint::Pointer
                } else {
                    CursorHint::Grab
                }
            }
            HitRegion::Outside if self.on_zoom_surface(position) => CursorHint::Grab,
            HitRegion::Outside => CursorHint::Default,
        }
    }

    /// Detach input and release the tooltip overlay.
    pub fn unmount(&mut self) {
        self.press = None;
        self.pointer = None;
        self.controller.unmount();
        self.scene.teardown();
    }

    /// Whether the chart still accepts input.
    pub fn is_mounted(&self) -> bool {
        self.controller.is_mounted()
    }

    fn local(&self, position: ScreenPoint) -> (f64, f64) {
        let plot = self.scene.layout().plot;
        ((position.x - plot.min.x) as f64, (position.y - plot.min.y) as f64)
    }

    /// The zoom surface spans the whole canvas, margins included, but only
    /// while pan/zoom is armed. Buttons are excluded by the hit test.
    fn on_zoom_surface(&self, position: ScreenPoint) -> bool {
        self.controller.gesture_config().pan_zoom_armed && self.scene.layout().canvas.contains(position)
    }

    /// Re-run the hit test at the last pointer position after the view moved
    /// under it. Returns whether the hovered point changed.
    fn refresh_hover(&mut self, now: Instant) -> bool {
        let Some(pointer) = self.pointer else {
            return false;
        };
        if !matches!(
            self.controller.gesture(),
            GestureState::Idle | GestureState::Zooming { .. }
        ) {
            return false;
        }
        let before = self.controller.hovered();
        self.update_hover(pointer, now);
        before != self.controller.hovered()
    }

    fn update_hover(&mut self, position: ScreenPoint, now: Instant) -> bool {
        let before = self.controller.hovered();
        let point = self.scene.point_at(position, &self.controller, now);
        self.controller.set_hover(point, Some(self.local(position)), now);
        before != self.controller.hovered() || self.controller.hovered().is_some()
    }
}
