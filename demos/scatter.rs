#[cfg(feature = "gpui")]
use gpui::{AppContext, Application, Bounds, WindowBounds, WindowOptions, px, size};

#[cfg(feature = "gpui")]
use scatter_zoom::{ChartConfig, ScatterChart, gpui_backend::GpuiScatterView};

#[cfg(feature = "gpui")]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    Application::new().run(|cx| {
        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                None,
                size(px(900.0), px(600.0)),
                cx,
            ))),
            ..Default::default()
        };

        cx.open_window(options, |_window, cx| {
            let chart = match ScatterChart::with_random_points(ChartConfig::default()) {
                Ok(chart) => chart,
                Err(err) => panic!("default chart configuration rejected: {err}"),
            };
            log::info!(
                "scatter chart ready with {} points; drag to pan, scroll to zoom, click a point to zoom in",
                chart.scene().points().len()
            );
            cx.new(|_| GpuiScatterView::new(chart))
        })
        .unwrap();
    });
}

#[cfg(not(feature = "gpui"))]
fn main() {
    eprintln!("Enable the gpui feature to run this example.");
}
