//! Error types.

use thiserror::Error;

/// Errors raised while validating configuration or building a scene.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    /// Canvas width or height is not a positive finite number.
    #[error("canvas size must be positive, got {width}x{height}")]
    InvalidCanvas {
        /// Configured canvas width.
        width: f32,
        /// Configured canvas height.
        height: f32,
    },
    /// Margins leave no room for the plot area.
    #[error("margins leave an empty plot area ({width}x{height})")]
    EmptyPlotArea {
        /// Remaining plot width.
        width: f32,
        /// Remaining plot height.
        height: f32,
    },
    /// Scale extent is not `1 <= min <= max` with finite bounds.
    #[error("invalid scale extent [{min}, {max}]")]
    InvalidScaleExtent {
        /// Configured lower bound.
        min: f64,
        /// Configured upper bound.
        max: f64,
    },
    /// A generator or zoom parameter is out of range.
    #[error("invalid {name}: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Why it was rejected.
        reason: &'static str,
    },
    /// The scene was built with no points.
    #[error("scatter chart needs at least one point")]
    NoData,
}
