use std::time::Instant;

use gpui::{Bounds, Pixels};

use crate::chart::ScatterChart;
use crate::geom::ScreenPoint;
use crate::render::RenderList;

use super::config::ChartViewConfig;

/// Maps the chart's logical canvas into window pixels.
///
/// With `preserve_aspect` the canvas is scaled uniformly and centered in the
/// available bounds, like an SVG `viewBox` with `xMidYMid meet`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CanvasMapping {
    pub(crate) origin: ScreenPoint,
    pub(crate) scale_x: f32,
    pub(crate) scale_y: f32,
}

impl Default for CanvasMapping {
    fn default() -> Self {
        Self {
            origin: ScreenPoint::new(0.0, 0.0),
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}

impl CanvasMapping {
    pub(crate) fn fit(
        origin: ScreenPoint,
        available: (f32, f32),
        canvas: (f32, f32),
        preserve_aspect: bool,
    ) -> Self {
        if canvas.0 <= 0.0 || canvas.1 <= 0.0 || available.0 <= 0.0 || available.1 <= 0.0 {
            return Self {
                origin,
                ..Self::default()
            };
        }
        let sx = available.0 / canvas.0;
        let sy = available.1 / canvas.1;
        if !preserve_aspect {
            return Self {
                origin,
                scale_x: sx,
                scale_y: sy,
            };
        }
        let scale = sx.min(sy);
        Self {
            origin: origin.offset(
                (available.0 - canvas.0 * scale) * 0.5,
                (available.1 - canvas.1 * scale) * 0.5,
            ),
            scale_x: scale,
            scale_y: scale,
        }
    }

    pub(crate) fn to_window(&self, point: ScreenPoint) -> ScreenPoint {
        ScreenPoint::new(
            self.origin.x + point.x * self.scale_x,
            self.origin.y + point.y * self.scale_y,
        )
    }

    pub(crate) fn to_logical(&self, point: ScreenPoint) -> ScreenPoint {
        ScreenPoint::new(
            (point.x - self.origin.x) / self.scale_x,
            (point.y - self.origin.y) / self.scale_y,
        )
    }

    /// Scale for lengths that have no direction (radii, stroke and font
    /// sizes).
    pub(crate) fn length(&self, value: f32) -> f32 {
        value * self.scale_x.min(self.scale_y)
    }
}

pub(crate) struct ChartFrame {
    pub(crate) render: RenderList,
    pub(crate) mapping: CanvasMapping,
    pub(crate) font_family: String,
}

pub(crate) fn build_frame(
    chart: &ScatterChart,
    config: &ChartViewConfig,
    bounds: Bounds<Pixels>,
    now: Instant,
) -> ChartFrame {
    let origin = ScreenPoint::new(f32::from(bounds.origin.x), f32::from(bounds.origin.y));
    let available = (
        f32::from(bounds.size.width),
        f32::from(bounds.size.height),
    );
    let mapping = CanvasMapping::fit(
        origin,
        available,
        chart.canvas_size(),
        config.preserve_aspect,
    );
    ChartFrame {
        render: chart.render(now),
        mapping,
        font_family: config.font_family.clone(),
    }
}
