//! scatter_zoom is an interactive scatter chart with pan, wheel zoom,
//! click-to-zoom, and brush (area) zoom, built for GPUI.
//!
//! The core (scales, view transform, interaction state machine, render
//! command list) is backend-agnostic and driven by explicit timestamps. The
//! `gpui` feature adds a view that paints the command list and forwards
//! pointer input.

#![forbid(unsafe_code)]

pub mod animation;
pub mod axis;
pub mod chart;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod geom;
pub mod interaction;
pub mod render;
pub mod scene;
pub mod style;
pub mod transform;
pub mod view;

#[cfg(feature = "gpui")]
pub mod gpui_backend;

pub use axis::{AxisConfig, AxisFormatter, LinearScale};
pub use chart::{CursorHint, ScatterChart};
pub use config::{ChartConfig, Margins};
pub use controller::{GestureEnd, GestureState, InteractionController};
pub use data::{ScatterPoint, generate_points, generate_random_points};
pub use error::ChartError;
pub use geom::{Point, ScreenPoint, ScreenRect};
pub use interaction::{
    BrushOutcome, GestureConfig, InteractionMode, WheelDelta, brush_armed, configure_interaction,
    pan_zoom_armed,
};
pub use render::{Color, RenderCommand, RenderList};
pub use scene::Scene;
pub use style::Theme;
pub use transform::{ScaleExtent, ViewTransform};
pub use view::Range;
