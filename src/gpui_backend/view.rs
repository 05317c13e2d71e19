use std::sync::{Arc, RwLock};
use std::time::Instant;

use gpui::prelude::*;
use gpui::{
    CursorStyle, MouseButton, MouseDownEvent, MouseMoveEvent, MouseUpEvent, Pixels, Point,
    ScrollDelta, ScrollWheelEvent, Window, canvas, div,
};

use crate::chart::{CursorHint, ScatterChart};
use crate::geom::ScreenPoint;
use crate::interaction::{InteractionMode, WheelDelta};
use crate::transform::ViewTransform;

use super::config::ChartViewConfig;
use super::frame::{CanvasMapping, build_frame};
use super::paint::{paint_frame, to_hsla};

/// A GPUI view that renders a [`ScatterChart`] and feeds it pointer input.
///
/// Dropping the view unmounts the chart: gestures are detached and the
/// tooltip overlay is released.
pub struct GpuiScatterView {
    chart: Arc<RwLock<ScatterChart>>,
    mapping: Arc<RwLock<CanvasMapping>>,
    config: ChartViewConfig,
    last_pointer: Option<ScreenPoint>,
}

impl GpuiScatterView {
    /// Create a view for the given chart.
    ///
    /// Uses the default [`ChartViewConfig`].
    pub fn new(chart: ScatterChart) -> Self {
        Self::with_config(chart, ChartViewConfig::default())
    }

    /// Create a view with a custom configuration.
    pub fn with_config(chart: ScatterChart, config: ChartViewConfig) -> Self {
        Self {
            chart: Arc::new(RwLock::new(chart)),
            mapping: Arc::new(RwLock::new(CanvasMapping::default())),
            config,
            last_pointer: None,
        }
    }

    /// Get a handle for driving the chart from outside the view.
    pub fn chart_handle(&self) -> ChartHandle {
        ChartHandle {
            chart: Arc::clone(&self.chart),
        }
    }

    fn logical(&self, position: Point<Pixels>) -> ScreenPoint {
        let window = ScreenPoint::new(f32::from(position.x), f32::from(position.y));
        self.mapping.read().expect("canvas mapping lock").to_logical(window)
    }

    fn on_mouse_down(&mut self, ev: &MouseDownEvent, cx: &mut Context<Self>) {
        let pos = self.logical(ev.position);
        self.last_pointer = Some(pos);
        let changed = self
            .chart
            .write()
            .expect("chart lock")
            .pointer_down(pos, Instant::now());
        if changed {
            cx.notify();
        }
    }

    fn on_mouse_move(&mut self, ev: &MouseMoveEvent, cx: &mut Context<Self>) {
        let pos = self.logical(ev.position);
        self.last_pointer = Some(pos);
        let mut chart = self.chart.write().expect("chart lock");
        // A release outside the window never reaches us.
        let cancelled = ev.pressed_button.is_none() && chart.pointer_cancel();
        let moved = chart.pointer_move(pos, Instant::now());
        drop(chart);
        if cancelled || moved {
            cx.notify();
        }
    }

    fn on_mouse_up(&mut self, ev: &MouseUpEvent, cx: &mut Context<Self>) {
        let pos = self.logical(ev.position);
        let changed = self
            .chart
            .write()
            .expect("chart lock")
            .pointer_up(pos, Instant::now());
        if changed {
            cx.notify();
        }
    }

    fn on_hover(&mut self, hovered: bool, cx: &mut Context<Self>) {
        if hovered {
            return;
        }
        self.last_pointer = None;
        if self
            .chart
            .write()
            .expect("chart lock")
            .pointer_leave(Instant::now())
        {
            cx.notify();
        }
    }

    fn on_scroll(&mut self, ev: &ScrollWheelEvent, cx: &mut Context<Self>) {
        let pos = self.logical(ev.position);
        let (delta_y, unit) = match ev.delta {
            ScrollDelta::Pixels(delta) => (f32::from(delta.y) as f64, WheelDelta::Pixels),
            ScrollDelta::Lines(delta) => (delta.y as f64, WheelDelta::Lines),
        };
        if delta_y.abs() < 0.01 {
            return;
        }
        let changed = self
            .chart
            .write()
            .expect("chart lock")
            .wheel(pos, delta_y, unit, Instant::now());
        if changed {
            cx.notify();
        }
    }

    fn cursor_style(&self, now: Instant) -> CursorStyle {
        let Some(pos) = self.last_pointer else {
            return CursorStyle::Arrow;
        };
        match self.chart.read().expect("chart lock").cursor_at(pos, now) {
            CursorHint::Default => CursorStyle::Arrow,
            CursorHint::Pointer => CursorStyle::PointingHand,
            CursorHint::Grab => CursorStyle::OpenHand,
            CursorHint::Grabbing => CursorStyle::ClosedHand,
            CursorHint::Crosshair => CursorStyle::Crosshair,
        }
    }
}

impl Drop for GpuiScatterView {
    fn drop(&mut self) {
        if let Ok(mut chart) = self.chart.write() {
            chart.unmount();
        }
    }
}

impl Render for GpuiScatterView {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let now = Instant::now();
        let (animating, background) = {
            let mut chart = self.chart.write().expect("chart lock");
            (chart.tick(now), chart.scene().theme().background)
        };
        if animating {
            window.request_animation_frame();
        }

        let chart = Arc::clone(&self.chart);
        let mapping = Arc::clone(&self.mapping);
        let config = self.config.clone();
        let cursor = self.cursor_style(now);

        div()
            .id("scatter-chart")
            .size_full()
            .bg(to_hsla(background))
            .cursor(cursor)
            .child(
                canvas(
                    move |bounds, _, _| {
                        let chart = chart.read().expect("chart lock");
                        let frame = build_frame(&chart, &config, bounds, now);
                        *mapping.write().expect("canvas mapping lock") = frame.mapping;
                        frame
                    },
                    move |_, frame, window, cx| {
                        paint_frame(&frame, window, cx);
                    },
                )
                .size_full(),
            )
            .on_mouse_down(
                MouseButton::Left,
                cx.listener(|this, ev, _, cx| {
                    this.on_mouse_down(ev, cx);
                }),
            )
            .on_mouse_move(cx.listener(|this, ev, _, cx| {
                this.on_mouse_move(ev, cx);
            }))
            .on_mouse_up(
                MouseButton::Left,
                cx.listener(|this, ev, _, cx| {
                    this.on_mouse_up(ev, cx);
                }),
            )
            .on_mouse_up_out(
                MouseButton::Left,
                cx.listener(|this, ev, _, cx| {
                    this.on_mouse_up(ev, cx);
                }),
            )
            .on_hover(cx.listener(|this, hovered: &bool, _, cx| {
                this.on_hover(*hovered, cx);
            }))
            .on_scroll_wheel(cx.listener(|this, ev, _, cx| {
                this.on_scroll(ev, cx);
            }))
    }
}

/// A handle for driving a [`ScatterChart`] held inside a `GpuiScatterView`.
///
/// The handle clones cheaply. Changes made through it show up on the next
/// frame; call `cx.notify()` on the view entity to request one.
#[derive(Clone)]
pub struct ChartHandle {
    chart: Arc<RwLock<ScatterChart>>,
}

impl ChartHandle {
    /// Read the chart state.
    ///
    /// The chart is locked for the duration of the callback.
    pub fn read<R>(&self, f: impl FnOnce(&ScatterChart) -> R) -> R {
        let chart = self.chart.read().expect("chart lock");
        f(&chart)
    }

    /// Mutate the chart state.
    ///
    /// The chart is locked for the duration of the callback.
    pub fn write<R>(&self, f: impl FnOnce(&mut ScatterChart) -> R) -> R {
        let mut chart = self.chart.write().expect("chart lock");
        f(&mut chart)
    }

    /// Current view transform.
    pub fn transform(&self) -> ViewTransform {
        self.read(ScatterChart::transform)
    }

    /// Flip between pan/zoom and area selection.
    pub fn toggle_area_selection(&self) -> InteractionMode {
        self.write(|chart| chart.toggle_area_selection(Instant::now()))
    }

    /// Animate back to the initial view.
    pub fn reset_view(&self) {
        self.write(|chart| chart.reset_view(Instant::now()));
    }
}
