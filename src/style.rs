//! Colors and theming.

use crate::render::Color;

/// Visual theme for the scatter chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Canvas background.
    pub background: Color,
    /// Axis lines, ticks, and labels.
    pub axis: Color,
    /// Title text.
    pub title: Color,
    /// Marker outline.
    pub marker_stroke: Color,
    /// Marker outline while hovered.
    pub marker_highlight_stroke: Color,
    /// Marker opacity at rest.
    pub marker_opacity: f32,
    /// Halo drawn behind a hovered marker.
    pub marker_glow: Color,
    /// Button fill in the default state.
    pub button_fill: Color,
    /// Button fill while the toggle is on.
    pub button_active_fill: Color,
    /// Button outline.
    pub button_stroke: Color,
    /// Button label.
    pub button_text: Color,
    /// Brush selection fill.
    pub brush_fill: Color,
    /// Brush selection outline.
    pub brush_stroke: Color,
    /// Tooltip background at full opacity.
    pub tooltip_bg: Color,
    /// Tooltip text.
    pub tooltip_text: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl Theme {
    /// Light theme matching the stock widget.
    pub fn light() -> Self {
        Self {
            background: Color::from_hex(0xf8f9fa),
            axis: Color::BLACK,
            title: Color::BLACK,
            marker_stroke: Color::WHITE,
            marker_highlight_stroke: Color::WHITE,
            marker_opacity: 0.8,
            marker_glow: Color::new(1.0, 1.0, 1.0, 0.7),
            button_fill: Color::from_hex(0xf0f0f0),
            button_active_fill: Color::from_hex(0xd0d0d0),
            button_stroke: Color::from_hex(0xaaaaaa),
            button_text: Color::BLACK,
            brush_fill: Color::new(0.47, 0.47, 0.47, 0.3),
            brush_stroke: Color::WHITE,
            tooltip_bg: Color::new(0.0, 0.0, 0.0, 0.7),
            tooltip_text: Color::WHITE,
        }
    }

    /// Dark theme.
    pub fn dark() -> Self {
        Self {
            background: Color::from_hex(0x16181d),
            axis: Color::from_hex(0xc8ccd4),
            title: Color::from_hex(0xe6e8ec),
            marker_stroke: Color::from_hex(0x16181d),
            marker_highlight_stroke: Color::WHITE,
            marker_opacity: 0.85,
            marker_glow: Color::new(0.8, 0.85, 1.0, 0.5),
            button_fill: Color::from_hex(0x2a2e36),
            button_active_fill: Color::from_hex(0x4a5060),
            button_stroke: Color::from_hex(0x5c6370),
            button_text: Color::from_hex(0xe6e8ec),
            brush_fill: Color::new(0.6, 0.7, 0.9, 0.25),
            brush_stroke: Color::from_hex(0xc8ccd4),
            tooltip_bg: Color::new(0.95, 0.95, 0.95, 0.85),
            tooltip_text: Color::BLACK,
        }
    }

    /// Toggle button fill for the given state.
    pub fn toggle_fill(&self, active: bool) -> Color {
        if active {
            self.button_active_fill
        } else {
            self.button_fill
        }
    }
}

/// Cyclical rainbow color scale over `t` in `[0, 1)`, in the cubehelix
/// color space.
pub fn rainbow(t: f64) -> Color {
    let t = t - t.floor();
    let ts = (t - 0.5).abs();
    let hue = 360.0 * t - 100.0;
    let saturation = 1.5 - 1.5 * ts;
    let lightness = 0.8 - 0.9 * ts;
    cubehelix(hue, saturation, lightness)
}

fn cubehelix(hue: f64, saturation: f64, lightness: f64) -> Color {
    const A: f64 = -0.14861;
    const B: f64 = 1.78277;
    const C: f64 = -0.29227;
    const D: f64 = -0.90649;
    const E: f64 = 1.97294;

    let h = (hue + 120.0).to_radians();
    let amplitude = saturation * lightness * (1.0 - lightness);
    let (sin_h, cos_h) = h.sin_cos();
    let channel = |value: f64| value.clamp(0.0, 1.0) as f32;
    Color::new(
        channel(lightness + amplitude * (A * cos_h + B * sin_h)),
        channel(lightness + amplitude * (C * cos_h + D * sin_h)),
        channel(lightness + amplitude * (E * cos_h)),
        1.0,
    )
}
