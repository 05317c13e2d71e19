//! Chart configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ChartError;
use crate::interaction::InteractionMode;
use crate::transform::ScaleExtent;

/// Margins around the plot area, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    /// Top margin.
    pub top: f32,
    /// Right margin.
    pub right: f32,
    /// Bottom margin.
    pub bottom: f32,
    /// Left margin.
    pub left: f32,
}

impl Margins {
    /// Same margin on every side.
    pub const fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(50.0)
    }
}

/// Configuration for a scatter chart.
///
/// Defaults reproduce the stock widget: an 800x500 canvas with 50 px margins,
/// five clusters of thirty points, zoom clamped to `[1, 40]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Logical canvas width.
    pub width: f32,
    /// Logical canvas height.
    pub height: f32,
    /// Margins around the plot area.
    pub margins: Margins,
    /// Chart title drawn above the plot.
    pub title: String,
    /// Number of generated clusters.
    pub clusters: usize,
    /// Points generated per cluster.
    pub points_per_cluster: usize,
    /// Headroom added above the largest value on each axis.
    pub domain_headroom: f64,
    /// Allowed zoom range.
    pub scale_extent: ScaleExtent,
    /// Absolute zoom factor applied when a point is clicked.
    pub click_zoom: f64,
    /// Fraction of the viewport a brushed rectangle is zoomed to fill.
    pub brush_fill: f64,
    /// Brushes narrower or shorter than this (pixels) are ignored.
    pub brush_min_size: f32,
    /// Duration of click, brush, and reset transitions.
    #[serde(with = "millis")]
    pub zoom_duration: Duration,
    /// Duration of the hover highlight and tooltip fade-in.
    #[serde(with = "millis")]
    pub hover_in_duration: Duration,
    /// Duration of the hover highlight and tooltip fade-out.
    #[serde(with = "millis")]
    pub hover_out_duration: Duration,
    /// Interaction mode at mount.
    pub initial_mode: InteractionMode,
    /// Requested tick count per axis.
    pub tick_count: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 500.0,
            margins: Margins::default(),
            title: "Interactive Scatter Chart".to_string(),
            clusters: 5,
            points_per_cluster: 30,
            domain_headroom: 0.1,
            scale_extent: ScaleExtent::default(),
            click_zoom: 5.0,
            brush_fill: 0.9,
            brush_min_size: 10.0,
            zoom_duration: Duration::from_millis(750),
            hover_in_duration: Duration::from_millis(200),
            hover_out_duration: Duration::from_millis(500),
            initial_mode: InteractionMode::PanZoom,
            tick_count: crate::axis::DEFAULT_TICK_COUNT,
        }
    }
}

impl ChartConfig {
    /// Set the canvas size.
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the margins.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the generator shape.
    pub fn with_clusters(mut self, clusters: usize, points_per_cluster: usize) -> Self {
        self.clusters = clusters;
        self.points_per_cluster = points_per_cluster;
        self
    }

    /// Set the initial interaction mode.
    pub fn with_initial_mode(mut self, mode: InteractionMode) -> Self {
        self.initial_mode = mode;
        self
    }

    /// Set the zoom transition duration.
    pub fn with_zoom_duration(mut self, duration: Duration) -> Self {
        self.zoom_duration = duration;
        self
    }

    /// Plot-area width (canvas minus horizontal margins).
    pub fn plot_width(&self) -> f32 {
        self.width - self.margins.left - self.margins.right
    }

    /// Plot-area height (canvas minus vertical margins).
    pub fn plot_height(&self) -> f32 {
        self.height - self.margins.top - self.margins.bottom
    }

    /// Check the configuration for values the chart cannot work with.
    pub fn validate(&self) -> Result<(), ChartError> {
        if !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
        {
            return Err(ChartError::InvalidCanvas {
                width: self.width,
                height: self.height,
            });
        }
        let (plot_width, plot_height) = (self.plot_width(), self.plot_height());
        if plot_width <= 0.0 || plot_height <= 0.0 {
            return Err(ChartError::EmptyPlotArea {
                width: plot_width,
                height: plot_height,
            });
        }
        let extent = self.scale_extent;
        if !(extent.min.is_finite() && extent.max.is_finite())
            || extent.min < 1.0
            || extent.max < extent.min
        {
            return Err(ChartError::InvalidScaleExtent {
                min: extent.min,
                max: extent.max,
            });
        }
        if self.clusters == 0 || self.points_per_cluster == 0 {
            return Err(ChartError::InvalidParameter {
                name: "clusters",
                reason: "cluster and point counts must be positive",
            });
        }
        if !(self.click_zoom.is_finite() && self.click_zoom > 0.0) {
            return Err(ChartError::InvalidParameter {
                name: "click_zoom",
                reason: "must be a positive number",
            });
        }
        if !(self.brush_fill > 0.0 && self.brush_fill <= 1.0) {
            return Err(ChartError::InvalidParameter {
                name: "brush_fill",
                reason: "must be in (0, 1]",
            });
        }
        if !(self.domain_headroom.is_finite() && self.domain_headroom >= 0.0) {
            return Err(ChartError::InvalidParameter {
                name: "domain_headroom",
                reason: "must be non-negative",
            });
        }
        Ok(())
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
