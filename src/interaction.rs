//! Interaction helpers for panning, zooming, and area selection.
//!
//! These are pure functions over [`ViewTransform`]s so that every gesture has
//! a testable geometric core. The stateful side lives in
//! [`crate::controller`].

use serde::{Deserialize, Serialize};

use crate::geom::{ScreenPoint, ScreenRect};
use crate::transform::{ScaleExtent, ViewTransform};

/// Which gesture family currently drives the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InteractionMode {
    /// Wheel zoom and drag pan are armed.
    #[default]
    PanZoom,
    /// Rectangular brush selection is armed.
    AreaSelect,
}

impl InteractionMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            Self::PanZoom => Self::AreaSelect,
            Self::AreaSelect => Self::PanZoom,
        }
    }

    /// Whether area selection is enabled.
    pub fn is_area_select(self) -> bool {
        self == Self::AreaSelect
    }
}

/// Gate for wheel/drag input: pan/zoom responds only outside area selection.
pub fn pan_zoom_armed(mode: InteractionMode) -> bool {
    mode == InteractionMode::PanZoom
}

/// Gate for brush input, always the complement of [`pan_zoom_armed`].
pub fn brush_armed(mode: InteractionMode) -> bool {
    !pan_zoom_armed(mode)
}

/// Gesture wiring derived from an [`InteractionMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureConfig {
    /// Mode the configuration was derived from.
    pub mode: InteractionMode,
    /// Wheel and drag listeners are active.
    pub pan_zoom_armed: bool,
    /// Brush overlay is shown and listening.
    pub brush_armed: bool,
}

/// Derive the gesture wiring for `mode`. Pure, so repeated calls with the
/// same mode yield the same configuration.
pub fn configure_interaction(mode: InteractionMode) -> GestureConfig {
    GestureConfig {
        mode,
        pan_zoom_armed: pan_zoom_armed(mode),
        brush_armed: brush_armed(mode),
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        configure_interaction(InteractionMode::default())
    }
}

/// Interaction hit regions on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitRegion {
    /// "Toggle Area Selection" button.
    ToggleButton,
    /// "Reset View" button.
    ResetButton,
    /// Plot data area.
    Plot,
    /// Anywhere else on the canvas.
    Outside,
}

/// Screen regions for hit testing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartRegions {
    /// Plot data area.
    pub plot: ScreenRect,
    /// Mode toggle button.
    pub toggle_button: ScreenRect,
    /// Reset button.
    pub reset_button: ScreenRect,
}

impl ChartRegions {
    /// Determine which region contains the point. Buttons sit on top of the
    /// plot area and win.
    pub fn hit_test(&self, point: ScreenPoint) -> HitRegion {
        if self.toggle_button.contains(point) {
            HitRegion::ToggleButton
        } else if self.reset_button.contains(point) {
            HitRegion::ResetButton
        } else if self.plot.contains(point) {
            HitRegion::Plot
        } else {
            HitRegion::Outside
        }
    }
}

/// How a wheel delta is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelDelta {
    /// Delta in pixels.
    Pixels,
    /// Delta in lines.
    Lines,
}

/// Scale multiplier for a vertical wheel delta (positive = scroll down =
/// zoom out).
pub fn wheel_scale_factor(delta_y: f64, unit: WheelDelta) -> f64 {
    let per_unit = match unit {
        WheelDelta::Pixels => 0.002,
        WheelDelta::Lines => 0.05,
    };
    2_f64.powf(-delta_y * per_unit)
}

/// Zoom by `factor` around a plot-local anchor, clamped to `extent`.
pub fn zoom_at(
    transform: ViewTransform,
    anchor: (f64, f64),
    factor: f64,
    extent: ScaleExtent,
) -> ViewTransform {
    let k = extent.clamp(transform.k * factor);
    transform.scale_about(anchor, k)
}

/// Pan by a pixel delta.
pub fn pan_by(transform: ViewTransform, dx: f64, dy: f64) -> ViewTransform {
    ViewTransform::new(transform.x + dx, transform.y + dy, transform.k)
}

/// Transform that centers a base-scale point in a `width` x `height`
/// viewport at scale `zoom`, clamped to `extent`.
pub fn click_zoom_target(
    base_point: (f64, f64),
    width: f64,
    height: f64,
    zoom: f64,
    extent: ScaleExtent,
) -> ViewTransform {
    ViewTransform::centered_on(
        base_point,
        (width * 0.5, height * 0.5),
        extent.clamp(zoom),
    )
}

/// Result of releasing a brush.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BrushOutcome {
    /// Selection was below the noise threshold and is ignored.
    Discarded,
    /// Zoom to this transform.
    ZoomTo(ViewTransform),
}

/// Map a brush rectangle (plot-local displayed pixels) to a transform that
/// makes it fill `fill` of the viewport, centered.
///
/// Rectangles narrower or shorter than `min_size` are discarded.
pub fn brush_zoom_target(
    current: ViewTransform,
    selection: ScreenRect,
    width: f64,
    height: f64,
    fill: f64,
    min_size: f32,
    extent: ScaleExtent,
) -> BrushOutcome {
    let selection = selection.normalized();
    if selection.width() < min_size || selection.height() < min_size {
        return BrushOutcome::Discarded;
    }
    let dx = selection.width() as f64;
    let dy = selection.height() as f64;
    let relative = fill / (dx / width).max(dy / height);
    let k = extent.clamp(current.k * relative);
    let center = selection.center();
    let base_center = current.invert((center.x as f64, center.y as f64));
    BrushOutcome::ZoomTo(ViewTransform::centered_on(
        base_center,
        (width * 0.5, height * 0.5),
        k,
    ))
}

/// Radius multiplier for non-highlighted markers at scale `k`.
pub fn marker_radius_factor(k: f64) -> f64 {
    (1.0 / k.sqrt()).max(0.7)
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: f64 = 700.0;
    const H: f64 = 400.0;

    fn rect(x0: f32, y0: f32, x1: f32, y1: f32) -> ScreenRect {
        ScreenRect::new(ScreenPoint::new(x0, y0), ScreenPoint::new(x1, y1))
    }

    #[test]
    fn configure_is_idempotent_and_exclusive() {
        for mode in [InteractionMode::PanZoom, InteractionMode::AreaSelect] {
            let config = configure_interaction(mode);
            assert_eq!(config, configure_interaction(mode));
            assert_ne!(config.pan_zoom_armed, config.brush_armed);
        }
        assert!(configure_interaction(InteractionMode::PanZoom).pan_zoom_armed);
        assert!(configure_interaction(InteractionMode::AreaSelect).brush_armed);
    }

    #[test]
    fn double_toggle_restores_mode() {
        let mode = InteractionMode::default();
        assert_eq!(mode.toggled().toggled(), mode);
    }

    #[test]
    fn hit_test_prefers_buttons() {
        let regions = ChartRegions {
            plot: rect(50.0, 50.0, 750.0, 450.0),
            toggle_button: rect(580.0, 50.0, 740.0, 80.0),
            reset_button: rect(580.0, 90.0, 740.0, 120.0),
        };
        assert_eq!(
            regions.hit_test(ScreenPoint::new(600.0, 60.0)),
            HitRegion::ToggleButton
        );
        assert_eq!(
            regions.hit_test(ScreenPoint::new(600.0, 100.0)),
            HitRegion::ResetButton
        );
        assert_eq!(
            regions.hit_test(ScreenPoint::new(100.0, 300.0)),
            HitRegion::Plot
        );
        assert_eq!(
            regions.hit_test(ScreenPoint::new(10.0, 10.0)),
            HitRegion::Outside
        );
    }

    #[test]
    fn wheel_factor_direction() {
        assert!(wheel_scale_factor(-100.0, WheelDelta::Pixels) > 1.0);
        assert!(wheel_scale_factor(100.0, WheelDelta::Pixels) < 1.0);
        assert!((wheel_scale_factor(-500.0, WheelDelta::Pixels) - 2.0).abs() < 1e-12);
        assert!((wheel_scale_factor(-20.0, WheelDelta::Lines) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn zoom_at_clamps_and_keeps_anchor() {
        let extent = ScaleExtent::default();
        let t = zoom_at(ViewTransform::IDENTITY, (100.0, 100.0), 1000.0, extent);
        assert_eq!(t.k, 40.0);
        let (bx, by) = t.invert((100.0, 100.0));
        assert!((bx - 100.0).abs() < 1e-9 && (by - 100.0).abs() < 1e-9);
        let out = zoom_at(t, (0.0, 0.0), 1e-6, extent);
        assert_eq!(out.k, 1.0);
    }

    #[test]
    fn click_target_centers_point() {
        let t = click_zoom_target((120.0, 80.0), W, H, 5.0, ScaleExtent::default());
        let (x, y) = t.apply((120.0, 80.0));
        assert!((x - W / 2.0).abs() < 1e-9 && (y - H / 2.0).abs() < 1e-9);
        assert_eq!(t.k, 5.0);
    }

    #[test]
    fn small_brush_is_discarded() {
        let extent = ScaleExtent::default();
        let current = ViewTransform::IDENTITY;
        let narrow = rect(10.0, 10.0, 19.0, 200.0);
        let short = rect(10.0, 10.0, 200.0, 19.5);
        for selection in [narrow, short] {
            assert_eq!(
                brush_zoom_target(current, selection, W, H, 0.9, 10.0, extent),
                BrushOutcome::Discarded
            );
        }
    }

    #[test]
    fn brush_fills_ninety_percent() {
        let extent = ScaleExtent::default();
        let selection = rect(100.0, 100.0, 240.0, 160.0);
        let BrushOutcome::ZoomTo(t) =
            brush_zoom_target(ViewTransform::IDENTITY, selection, W, H, 0.9, 10.0, extent)
        else {
            panic!("brush should zoom");
        };
        // 140 px wide is the limiting side: 0.9 / (140 / 700) = 4.5
        assert!((t.k - 4.5).abs() < 1e-9);
        let (cx, cy) = t.apply((170.0, 130.0));
        assert!((cx - W / 2.0).abs() < 1e-9 && (cy - H / 2.0).abs() < 1e-9);
        let (x0, _) = t.apply((100.0, 100.0));
        let (x1, _) = t.apply((240.0, 100.0));
        assert!(((x1 - x0) / W - 0.9).abs() < 1e-9);
    }

    #[test]
    fn brush_composes_with_current_zoom() {
        let extent = ScaleExtent::default();
        let current = ViewTransform::new(-350.0, -200.0, 2.0);
        let selection = rect(300.0, 150.0, 440.0, 250.0);
        let BrushOutcome::ZoomTo(t) =
            brush_zoom_target(current, selection, W, H, 0.9, 10.0, extent)
        else {
            panic!("brush should zoom");
        };
        // limited by height: 0.9 / (100 / 400) = 3.6 on top of k = 2
        assert!((t.k - 7.2).abs() < 1e-9);
        let base_center = current.invert((370.0, 200.0));
        let (cx, cy) = t.apply(base_center);
        assert!((cx - W / 2.0).abs() < 1e-9 && (cy - H / 2.0).abs() < 1e-9);
    }

    #[test]
    fn radius_factor_bounds() {
        assert_eq!(marker_radius_factor(1.0), 1.0);
        assert!((marker_radius_factor(1.5) - 1.0 / 1.5_f64.sqrt()).abs() < 1e-12);
        assert_eq!(marker_radius_factor(40.0), 0.7);
    }
}
