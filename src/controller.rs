//! Interaction controller: the single owner of the view transform.
//!
//! The controller is a small state machine driven by pointer events and an
//! explicit clock. All coordinates are plot-local pixels (origin at the top
//! left of the plot area). Hit testing against buttons and markers happens
//! one level up, in [`crate::chart::ScatterChart`].

use std::time::{Duration, Instant};

use crate::animation::{Fade, ViewTransition};
use crate::config::ChartConfig;
use crate::geom::{ScreenPoint, ScreenRect};
use crate::interaction::{
    BrushOutcome, GestureConfig, InteractionMode, WheelDelta, brush_zoom_target,
    click_zoom_target, configure_interaction, pan_by, wheel_scale_factor, zoom_at,
};
use crate::transform::{ScaleExtent, ViewTransform};

/// Quiet period after the last wheel event before zooming counts as over.
const WHEEL_IDLE: Duration = Duration::from_millis(150);
/// Pointer travel (pixels) below which a press/release pair is a click.
const CLICK_TOLERANCE_PX: f64 = 3.0;
/// Tooltip opacity when fully shown.
pub const TOOLTIP_OPACITY: f32 = 0.9;

/// Gesture currently in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureState {
    /// No gesture.
    Idle,
    /// Drag-panning.
    Panning {
        /// Where the drag started.
        start: (f64, f64),
        /// Last pointer position.
        last: (f64, f64),
        /// Pointer travelled far enough to no longer count as a click.
        moved: bool,
    },
    /// Wheel zooming; ends after a short quiet period.
    Zooming {
        /// Time of the last wheel event.
        last_wheel: Instant,
    },
    /// Dragging out a brush rectangle.
    BrushSelecting {
        /// Corner where the brush started.
        start: (f64, f64),
        /// Opposite corner, clamped to the plot area.
        current: (f64, f64),
    },
}

/// What a pointer release amounted to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEnd {
    /// No gesture was in progress.
    None,
    /// Press and release without meaningful travel.
    Click,
    /// A drag pan finished.
    Panned,
    /// A brush finished.
    Brushed(BrushOutcome),
}

/// Tooltip overlay state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipState {
    /// Index of the point being described.
    pub point: usize,
    /// Pointer position the tooltip follows (plot-local).
    pub anchor: (f64, f64),
    /// Opacity animation.
    pub opacity: Fade,
}

#[derive(Debug, Clone)]
struct Settings {
    width: f64,
    height: f64,
    extent: ScaleExtent,
    click_zoom: f64,
    brush_fill: f64,
    brush_min_size: f32,
    zoom_duration: Duration,
    hover_in: Duration,
    hover_out: Duration,
}

impl Settings {
    fn from_config(config: &ChartConfig) -> Self {
        Self {
            width: config.plot_width() as f64,
            height: config.plot_height() as f64,
            extent: config.scale_extent,
            click_zoom: config.click_zoom,
            brush_fill: config.brush_fill,
            brush_min_size: config.brush_min_size,
            zoom_duration: config.zoom_duration,
            hover_in: config.hover_in_duration,
            hover_out: config.hover_out_duration,
        }
    }

    fn center(&self) -> (f64, f64) {
        (self.width * 0.5, self.height * 0.5)
    }
}

/// Owns the view transform, the interaction mode, and gesture state.
#[derive(Debug, Clone)]
pub struct InteractionController {
    settings: Settings,
    transform: ViewTransform,
    gestures: GestureConfig,
    gesture: GestureState,
    transition: Option<ViewTransition>,
    hovered: Option<usize>,
    emphasis: Vec<(usize, Fade)>,
    tooltip: Option<TooltipState>,
    mounted: bool,
    revision: u64,
}

impl InteractionController {
    /// Create a controller at the identity transform.
    pub fn new(config: &ChartConfig) -> Self {
        Self {
            settings: Settings::from_config(config),
            transform: ViewTransform::IDENTITY,
            gestures: configure_interaction(config.initial_mode),
            gesture: GestureState::Idle,
            transition: None,
            hovered: None,
            emphasis: Vec::new(),
            tooltip: None,
            mounted: true,
            revision: 0,
        }
    }

    /// Current view transform.
    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    /// Active interaction mode.
    pub fn mode(&self) -> InteractionMode {
        self.gestures.mode
    }

    /// Current gesture wiring.
    pub fn gesture_config(&self) -> GestureConfig {
        self.gestures
    }

    /// Gesture in progress.
    pub fn gesture(&self) -> GestureState {
        self.gesture
    }

    /// Target of the running transition, if any.
    pub fn transition_target(&self) -> Option<ViewTransform> {
        self.transition.as_ref().map(ViewTransition::target)
    }

    /// Index of the hovered point.
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Tooltip overlay state.
    pub fn tooltip(&self) -> Option<&TooltipState> {
        self.tooltip.as_ref()
    }

    /// Whether the controller still accepts input.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Counter bumped on every transform change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Plot-area size in pixels.
    pub fn plot_size(&self) -> (f64, f64) {
        (self.settings.width, self.settings.height)
    }

    /// Active brush rectangle (plot-local), while brushing.
    pub fn brush_selection(&self) -> Option<ScreenRect> {
        match self.gesture {
            GestureState::BrushSelecting { start, current } => Some(
                ScreenRect::new(
                    ScreenPoint::new(start.0 as f32, start.1 as f32),
                    ScreenPoint::new(current.0 as f32, current.1 as f32),
                )
                .normalized(),
            ),
            _ => None,
        }
    }

    /// Arm the gesture family for `mode`, disarming the other.
    ///
    /// Calling this again with the current mode changes nothing. Switching
    /// aborts a gesture of the family being disarmed.
    pub fn configure_interaction(&mut self, mode: InteractionMode) -> GestureConfig {
        let next = configure_interaction(mode);
        if next == self.gestures {
            return next;
        }
        self.gesture = match self.gesture {
            GestureState::Panning { .. } | GestureState::Zooming { .. }
                if !next.pan_zoom_armed =>
            {
                GestureState::Idle
            }
            GestureState::BrushSelecting { .. } if !next.brush_armed => GestureState::Idle,
            other => other,
        };
        self.gestures = next;
        log::debug!(
            "interaction mode {:?}: pan/zoom armed={}, brush armed={}",
            next.mode,
            next.pan_zoom_armed,
            next.brush_armed
        );
        next
    }

    /// Flip between pan/zoom and area selection.
    ///
    /// Entering area selection drops hover, since the brush overlay covers
    /// the markers.
    pub fn toggle_mode(&mut self, now: Instant) -> GestureConfig {
        if !self.mounted {
            return self.gestures;
        }
        let config = self.configure_interaction(self.mode().toggled());
        if config.brush_armed {
            self.set_hover(None, None, now);
        }
        config
    }

    /// Pointer pressed inside the plot area.
    pub fn pointer_down(&mut self, local: (f64, f64), _now: Instant) -> bool {
        if !self.mounted {
            return false;
        }
        if self.gestures.pan_zoom_armed {
            self.interrupt_transition();
            self.gesture = GestureState::Panning {
                start: local,
                last: local,
                moved: false,
            };
        } else {
            let start = self.clamp_to_plot(local);
            self.gesture = GestureState::BrushSelecting {
                start,
                current: start,
            };
        }
        true
    }

    /// Pointer moved. Returns whether anything visible changed.
    pub fn pointer_move(&mut self, local: (f64, f64), _now: Instant) -> bool {
        match self.gesture {
            GestureState::Panning { start, last, moved } => {
                let (dx, dy) = (local.0 - last.0, local.1 - last.1);
                let travel = (local.0 - start.0).hypot(local.1 - start.1);
                self.gesture = GestureState::Panning {
                    start,
                    last: local,
                    moved: moved || travel > CLICK_TOLERANCE_PX,
                };
                if dx == 0.0 && dy == 0.0 {
                    return false;
                }
                self.set_transform(pan_by(self.transform, dx, dy));
                true
            }
            GestureState::BrushSelecting { start, .. } => {
                self.gesture = GestureState::BrushSelecting {
                    start,
                    current: self.clamp_to_plot(local),
                };
                true
            }
            GestureState::Idle | GestureState::Zooming { .. } => false,
        }
    }

    /// Pointer released.
    pub fn pointer_up(&mut self, local: (f64, f64), now: Instant) -> GestureEnd {
        match self.gesture {
            GestureState::Panning { moved, .. } => {
                self.gesture = GestureState::Idle;
                if moved {
                    GestureEnd::Panned
                } else {
                    GestureEnd::Click
                }
            }
            GestureState::BrushSelecting { start, .. } => {
                let current = self.clamp_to_plot(local);
                self.gesture = GestureState::Idle;
                let selection = ScreenRect::new(
                    ScreenPoint::new(start.0 as f32, start.1 as f32),
                    ScreenPoint::new(current.0 as f32, current.1 as f32),
                );
                let outcome = brush_zoom_target(
                    self.transform,
                    selection,
                    self.settings.width,
                    self.settings.height,
                    self.settings.brush_fill,
                    self.settings.brush_min_size,
                    self.settings.extent,
                );
                match outcome {
                    BrushOutcome::Discarded => {
                        log::trace!(
                            "brush {:.1}x{:.1} below threshold, discarded",
                            selection.normalized().width(),
                            selection.normalized().height()
                        );
                    }
                    BrushOutcome::ZoomTo(target) => {
                        log::debug!("brush zoom to {target:?}");
                        self.start_transition(target, now);
                    }
                }
                GestureEnd::Brushed(outcome)
            }
            GestureState::Idle | GestureState::Zooming { .. } => GestureEnd::None,
        }
    }

    /// Drop an in-progress pan or brush whose release never arrived.
    ///
    /// A pan keeps the offset applied so far; a brush is discarded.
    pub fn cancel_gesture(&mut self) -> bool {
        match self.gesture {
            GestureState::Panning { .. } | GestureState::BrushSelecting { .. } => {
                log::trace!("gesture {:?} cancelled", self.gesture);
                self.gesture = GestureState::Idle;
                true
            }
            GestureState::Idle | GestureState::Zooming { .. } => false,
        }
    }

    /// Wheel input at a plot-local anchor. Returns whether it was applied.
    pub fn wheel(&mut self, anchor: (f64, f64), delta_y: f64, unit: WheelDelta, now: Instant) -> bool {
        if !self.mounted || !self.gestures.pan_zoom_armed {
            return false;
        }
        let factor = wheel_scale_factor(delta_y, unit);
        self.interrupt_transition();
        let next = zoom_at(self.transform, anchor, factor, self.settings.extent);
        log::trace!("wheel {delta_y} -> k={:.3}", next.k);
        self.set_transform(next);
        if !matches!(self.gesture, GestureState::Panning { .. }) {
            self.gesture = GestureState::Zooming { last_wheel: now };
        }
        true
    }

    /// Zoom to center a point given in base-scale pixels. Returns the
    /// target transform.
    pub fn click_point(&mut self, base: (f64, f64), now: Instant) -> ViewTransform {
        let target = click_zoom_target(
            base,
            self.settings.width,
            self.settings.height,
            self.settings.click_zoom,
            self.settings.extent,
        );
        if self.mounted {
            log::debug!("click zoom on ({:.1}, {:.1}) to {target:?}", base.0, base.1);
            self.start_transition(target, now);
        }
        target
    }

    /// Animate back to the identity transform.
    pub fn reset(&mut self, now: Instant) {
        if !self.mounted {
            return;
        }
        log::debug!("reset view");
        self.start_transition(ViewTransform::IDENTITY, now);
    }

    /// Update the hovered point and the tooltip anchor.
    pub fn set_hover(&mut self, point: Option<usize>, anchor: Option<(f64, f64)>, now: Instant) {
        if !self.mounted {
            return;
        }
        let point = if self.gestures.brush_armed { None } else { point };
        if point == self.hovered {
            if let (Some(tooltip), Some(anchor)) = (self.tooltip.as_mut(), anchor) {
                if point.is_some() {
                    tooltip.anchor = anchor;
                }
            }
            return;
        }

        let hover_out = self.settings.hover_out;
        if let Some(previous) = self.hovered {
            self.emphasis_mut(previous, now).retarget(0.0, now, hover_out);
        }
        match point {
            Some(index) => {
                let hover_in = self.settings.hover_in;
                self.emphasis_mut(index, now).retarget(1.0, now, hover_in);
                let mut opacity = self
                    .tooltip
                    .map(|tooltip| tooltip.opacity)
                    .unwrap_or_else(|| Fade::settled(0.0, now));
                opacity.retarget(TOOLTIP_OPACITY, now, hover_in);
                self.tooltip = Some(TooltipState {
                    point: index,
                    anchor: anchor.unwrap_or_default(),
                    opacity,
                });
            }
            None => {
                if let Some(tooltip) = self.tooltip.as_mut() {
                    tooltip.opacity.retarget(0.0, now, hover_out);
                }
            }
        }
        self.hovered = point;
    }

    /// Highlight strength of a point in `[0, 1]`.
    pub fn emphasis(&self, index: usize, now: Instant) -> f32 {
        self.emphasis
            .iter()
            .find(|(point, _)| *point == index)
            .map(|(_, fade)| fade.value(now))
            .unwrap_or(0.0)
    }

    /// Advance animations to `now`. Returns whether another frame is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if let Some(transition) = self.transition.take() {
            self.set_transform(transition.sample(now));
            if !transition.is_finished(now) {
                self.transition = Some(transition);
            }
        }

        if let GestureState::Zooming { last_wheel } = self.gesture {
            if now.saturating_duration_since(last_wheel) >= WHEEL_IDLE {
                self.gesture = GestureState::Idle;
            }
        }

        let hovered = self.hovered;
        self.emphasis
            .retain(|(point, fade)| Some(*point) == hovered || fade.is_running(now) || fade.target() > 0.0);
        if let Some(tooltip) = self.tooltip {
            if tooltip.opacity.target() == 0.0 && !tooltip.opacity.is_running(now) {
                self.tooltip = None;
            }
        }

        self.transition.is_some()
            || matches!(self.gesture, GestureState::Zooming { .. })
            || self.emphasis.iter().any(|(_, fade)| fade.is_running(now))
            || self
                .tooltip
                .is_some_and(|tooltip| tooltip.opacity.is_running(now))
    }

    /// Detach all gestures and drop transient state. Input is ignored
    /// afterwards.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.gesture = GestureState::Idle;
        self.transition = None;
        self.hovered = None;
        self.emphasis.clear();
        self.tooltip = None;
        log::debug!("interaction controller unmounted");
    }

    fn start_transition(&mut self, target: ViewTransform, now: Instant) {
        if self.settings.zoom_duration.is_zero() {
            self.transition = None;
            self.set_transform(target);
            return;
        }
        self.transition = Some(ViewTransition::new(
            self.transform,
            target,
            now,
            self.settings.zoom_duration,
            self.settings.width,
            self.settings.height,
        ));
    }

    fn interrupt_transition(&mut self) {
        if self.transition.take().is_some() {
            log::trace!("transition interrupted at {:?}", self.transform);
        }
    }

    fn set_transform(&mut self, next: ViewTransform) {
        if !next.is_valid() {
            return;
        }
        let next = next.constrain(self.settings.extent, self.settings.center());
        if next != self.transform {
            self.transform = next;
            self.revision += 1;
        }
    }

    fn clamp_to_plot(&self, local: (f64, f64)) -> (f64, f64) {
        (
            local.0.clamp(0.0, self.settings.width),
            local.1.clamp(0.0, self.settings.height),
        )
    }

    fn emphasis_mut(&mut self, index: usize, now: Instant) -> &mut Fade {
        let position = match self.emphasis.iter().position(|(point, _)| *point == index) {
            Some(position) => position,
            None => {
                self.emphasis.push((index, Fade::settled(0.0, now)));
                self.emphasis.len() - 1
            }
        };
        &mut self.emphasis[position].1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn controller() -> InteractionController {
        InteractionController::new(&ChartConfig::default())
    }

    fn settle(controller: &mut InteractionController, now: Instant) -> Instant {
        let end = now + Duration::from_secs(2);
        controller.tick(end);
        end
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn starts_in_pan_zoom_at_identity() {
        let controller = controller();
        assert!(controller.transform().is_identity());
        assert_eq!(controller.mode(), InteractionMode::PanZoom);
        assert!(controller.gesture_config().pan_zoom_armed);
        assert!(!controller.gesture_config().brush_armed);
        assert_eq!(controller.gesture(), GestureState::Idle);
    }

    #[test]
    fn drag_pans_and_returns_to_idle() {
        let mut controller = controller();
        let now = Instant::now();
        assert!(controller.pointer_down((100.0, 100.0), now));
        controller.pointer_move((130.0, 90.0), now);
        assert!(matches!(controller.gesture(), GestureState::Panning { moved: true, .. }));
        assert_eq!(controller.pointer_up((130.0, 90.0), now), GestureEnd::Panned);
        assert_eq!(controller.transform(), ViewTransform::new(30.0, -10.0, 1.0));
        assert_eq!(controller.gesture(), GestureState::Idle);
    }

    #[test]
    fn press_release_without_travel_is_a_click() {
        let mut controller = controller();
        let now = Instant::now();
        controller.pointer_down((10.0, 10.0), now);
        controller.pointer_move((11.0, 11.0), now);
        assert_eq!(controller.pointer_up((11.0, 11.0), now), GestureEnd::Click);
    }

    #[test]
    fn wheel_zooms_then_goes_idle() {
        let mut controller = controller();
        let now = Instant::now();
        assert!(controller.wheel((350.0, 200.0), -500.0, WheelDelta::Pixels, now));
        assert!(close(controller.transform().k, 2.0));
        assert!(matches!(controller.gesture(), GestureState::Zooming { .. }));
        assert!(controller.tick(now + ms(100)));
        assert!(!controller.tick(now + ms(200)));
        assert_eq!(controller.gesture(), GestureState::Idle);
    }

    #[test]
    fn scale_stays_within_extent_for_any_sequence() {
        let mut controller = controller();
        let mut now = Instant::now();
        let deltas = [-3000.0, -900.0, 5000.0, 120.0, -10000.0, 77.0, -42.0, 9000.0];
        for (step, delta) in deltas.iter().enumerate() {
            now += ms(20);
            let anchor = (step as f64 * 90.0, step as f64 * 45.0);
            controller.wheel(anchor, *delta, WheelDelta::Pixels, now);
            let k = controller.transform().k;
            assert!((1.0..=40.0).contains(&k), "k={k}");
            controller.pointer_down(anchor, now);
            controller.pointer_move((anchor.0 + 250.0, anchor.1 - 80.0), now);
            controller.pointer_up((anchor.0 + 250.0, anchor.1 - 80.0), now);
            assert!((1.0..=40.0).contains(&controller.transform().k));
        }
        controller.click_point((10.0, 10.0), now);
        for frame in 0..50 {
            controller.tick(now + ms(frame * 16));
            let k = controller.transform().k;
            assert!((1.0..=40.0).contains(&k), "k={k}");
        }
    }

    #[test]
    fn click_centers_point_regardless_of_prior_transform() {
        let priors = [
            ViewTransform::IDENTITY,
            ViewTransform::new(-500.0, 120.0, 3.0),
            ViewTransform::new(40.0, -900.0, 17.5),
        ];
        let base = (123.0, 321.0);
        for prior in priors {
            let mut controller = controller();
            controller.set_transform(prior);
            let now = Instant::now();
            let target = controller.click_point(base, now);
            let (x, y) = target.apply(base);
            assert!(close(x, 350.0) && close(y, 200.0));
            assert_eq!(target.k, 5.0);
            settle(&mut controller, now);
            assert_eq!(controller.transform(), target);
        }
    }

    #[test]
    fn reset_restores_exact_identity() {
        let mut controller = controller();
        let mut now = Instant::now();
        for _ in 0..5 {
            controller.wheel((100.0, 100.0), -300.0, WheelDelta::Pixels, now);
            now += ms(10);
        }
        controller.click_point((100.0, 100.0), now);
        now = settle(&mut controller, now);
        assert!(!controller.transform().is_identity());
        controller.reset(now);
        assert!(controller.tick(now + ms(375)));
        assert!(!controller.transform().is_identity());
        settle(&mut controller, now);
        assert_eq!(controller.transform(), ViewTransform::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn new_transition_supersedes_running_one() {
        let mut controller = controller();
        let now = Instant::now();
        controller.click_point((10.0, 10.0), now);
        controller.tick(now + ms(100));
        controller.reset(now + ms(100));
        assert_eq!(controller.transition_target(), Some(ViewTransform::IDENTITY));
        settle(&mut controller, now + ms(100));
        assert!(controller.transform().is_identity());
    }

    #[test]
    fn pan_interrupts_transition() {
        let mut controller = controller();
        let now = Instant::now();
        controller.click_point((10.0, 10.0), now);
        controller.tick(now + ms(200));
        controller.pointer_down((5.0, 5.0), now + ms(200));
        assert!(controller.transition_target().is_none());
    }

    #[test]
    fn area_select_gates_pan_and_wheel() {
        let mut controller = controller();
        let now = Instant::now();
        controller.toggle_mode(now);
        assert!(!controller.wheel((0.0, 0.0), -500.0, WheelDelta::Pixels, now));
        controller.pointer_down((10.0, 10.0), now);
        assert!(matches!(controller.gesture(), GestureState::BrushSelecting { .. }));
        controller.pointer_move((60.0, 60.0), now);
        assert!(controller.transform().is_identity());
    }

    #[test]
    fn small_brush_is_a_no_op() {
        let mut controller = controller();
        let now = Instant::now();
        controller.configure_interaction(InteractionMode::AreaSelect);
        controller.pointer_down((100.0, 100.0), now);
        controller.pointer_move((300.0, 108.0), now);
        let end = controller.pointer_up((300.0, 108.0), now);
        assert_eq!(end, GestureEnd::Brushed(BrushOutcome::Discarded));
        assert!(controller.transition_target().is_none());
        assert!(controller.brush_selection().is_none());
        settle(&mut controller, now);
        assert!(controller.transform().is_identity());
    }

    #[test]
    fn brush_zooms_and_clears_selection() {
        let mut controller = controller();
        let now = Instant::now();
        controller.configure_interaction(InteractionMode::AreaSelect);
        controller.pointer_down((240.0, 160.0), now);
        controller.pointer_move((100.0, 100.0), now);
        assert!(controller.brush_selection().is_some());
        let end = controller.pointer_up((100.0, 100.0), now);
        let GestureEnd::Brushed(BrushOutcome::ZoomTo(target)) = end else {
            panic!("expected zoom, got {end:?}");
        };
        assert!(controller.brush_selection().is_none());
        settle(&mut controller, now);
        assert_eq!(controller.transform(), target);
        assert!(close(target.k, 4.5));
    }

    #[test]
    fn brush_is_clamped_to_plot() {
        let mut controller = controller();
        let now = Instant::now();
        controller.configure_interaction(InteractionMode::AreaSelect);
        controller.pointer_down((-40.0, 20.0), now);
        controller.pointer_move((900.0, 80.0), now);
        let selection = controller.brush_selection().unwrap();
        assert_eq!(selection.min.x, 0.0);
        assert_eq!(selection.max.x, 700.0);
    }

    #[test]
    fn double_toggle_restores_gestures() {
        let mut controller = controller();
        let now = Instant::now();
        let original = controller.gesture_config();
        let toggled = controller.toggle_mode(now);
        assert_ne!(toggled, original);
        assert!(toggled.brush_armed && !toggled.pan_zoom_armed);
        assert_eq!(controller.toggle_mode(now), original);
    }

    #[test]
    fn configure_same_mode_is_idempotent() {
        let mut controller = controller();
        let now = Instant::now();
        controller.pointer_down((1.0, 1.0), now);
        let before = controller.gesture();
        let config = controller.configure_interaction(InteractionMode::PanZoom);
        assert_eq!(config, controller.configure_interaction(InteractionMode::PanZoom));
        assert_eq!(controller.gesture(), before);
    }

    #[test]
    fn toggling_aborts_disarmed_gesture() {
        let mut controller = controller();
        let now = Instant::now();
        controller.pointer_down((1.0, 1.0), now);
        controller.toggle_mode(now);
        assert_eq!(controller.gesture(), GestureState::Idle);
        assert_eq!(controller.pointer_up((5.0, 5.0), now), GestureEnd::None);
    }

    #[test]
    fn toggling_aborts_brush_in_progress() {
        let mut controller = controller();
        let now = Instant::now();
        controller.toggle_mode(now);
        controller.pointer_down((50.0, 50.0), now);
        controller.pointer_move((240.0, 240.0), now);
        assert!(controller.brush_selection().is_some());
        controller.toggle_mode(now);
        assert_eq!(controller.gesture(), GestureState::Idle);
        assert!(controller.brush_selection().is_none());
        assert_eq!(controller.pointer_up((240.0, 240.0), now), GestureEnd::None);
        assert!(!controller.tick(now + ms(1000)));
        assert!(controller.transform().is_identity());
    }

    #[test]
    fn cancel_ends_pan_and_discards_brush() {
        let mut controller = controller();
        let now = Instant::now();
        controller.pointer_down((100.0, 100.0), now);
        controller.pointer_move((150.0, 100.0), now);
        assert!(controller.cancel_gesture());
        assert_eq!(controller.gesture(), GestureState::Idle);
        assert!(!controller.pointer_move((300.0, 100.0), now));
        assert_eq!(controller.transform(), ViewTransform::new(50.0, 0.0, 1.0));
        assert!(!controller.cancel_gesture());

        controller.configure_interaction(InteractionMode::AreaSelect);
        controller.pointer_down((20.0, 20.0), now);
        controller.pointer_move((220.0, 220.0), now);
        assert!(controller.cancel_gesture());
        assert_eq!(controller.pointer_up((220.0, 220.0), now), GestureEnd::None);
        assert!(controller.transition_target().is_none());
    }

    #[test]
    fn hover_fades_emphasis_and_tooltip() {
        let mut controller = controller();
        let now = Instant::now();
        controller.set_hover(Some(3), Some((20.0, 30.0)), now);
        assert_eq!(controller.hovered(), Some(3));
        assert_eq!(controller.emphasis(3, now), 0.0);
        assert_eq!(controller.emphasis(3, now + ms(200)), 1.0);
        let tooltip = controller.tooltip().copied().unwrap();
        assert_eq!(tooltip.point, 3);
        assert_eq!(tooltip.opacity.value(now + ms(200)), TOOLTIP_OPACITY);

        controller.set_hover(None, None, now + ms(300));
        assert!(controller.tick(now + ms(400)));
        assert!(controller.tooltip().is_some());
        assert!(!controller.tick(now + ms(900)));
        assert!(controller.tooltip().is_none());
        assert_eq!(controller.emphasis(3, now + ms(900)), 0.0);
    }

    #[test]
    fn area_select_suppresses_hover() {
        let mut controller = controller();
        let now = Instant::now();
        controller.set_hover(Some(1), Some((0.0, 0.0)), now);
        controller.toggle_mode(now);
        assert_eq!(controller.hovered(), None);
        controller.set_hover(Some(2), Some((0.0, 0.0)), now);
        assert_eq!(controller.hovered(), None);
    }

    #[test]
    fn unmount_detaches_input() {
        let mut controller = controller();
        let now = Instant::now();
        controller.set_hover(Some(0), Some((1.0, 1.0)), now);
        controller.click_point((50.0, 50.0), now);
        controller.unmount();
        assert!(!controller.is_mounted());
        assert!(controller.tooltip().is_none());
        assert!(controller.transition_target().is_none());
        assert!(!controller.pointer_down((1.0, 1.0), now));
        assert!(!controller.wheel((1.0, 1.0), -100.0, WheelDelta::Pixels, now));
        controller.reset(now);
        assert!(!controller.tick(now + ms(1000)));
        assert!(controller.transform().is_identity());
    }

    #[test]
    fn zero_duration_applies_immediately() {
        let config = ChartConfig::default().with_zoom_duration(Duration::ZERO);
        let mut controller = InteractionController::new(&config);
        let target = controller.click_point((70.0, 40.0), Instant::now());
        assert_eq!(controller.transform(), target);
        assert!(controller.transition_target().is_none());
    }

    #[test]
    fn revision_tracks_transform_changes() {
        let mut controller = controller();
        let now = Instant::now();
        let start = controller.revision();
        controller.pointer_down((0.0, 0.0), now);
        controller.pointer_move((0.0, 0.0), now);
        assert_eq!(controller.revision(), start);
        controller.pointer_move((4.0, 0.0), now);
        assert_eq!(controller.revision(), start + 1);
    }
}
