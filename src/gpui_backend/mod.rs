//! GPUI integration for scatter_zoom.
//!
//! This module provides a GPUI view that renders a
//! [`ScatterChart`](crate::chart::ScatterChart), scales its logical canvas
//! into the available bounds, and forwards pointer and wheel input.

#![allow(clippy::collapsible_if)]

mod config;
mod frame;
mod paint;
mod view;

pub use config::ChartViewConfig;
pub use view::{ChartHandle, GpuiScatterView};
