//! Synthetic clustered data.

use rand::Rng;

use crate::config::ChartConfig;
use crate::geom::Point;
use crate::render::Color;
use crate::style::rainbow;

/// Side length of the square each cluster's points are jittered within.
const CLUSTER_SPREAD: f64 = 50.0;
/// Smallest marker radius.
const MIN_SIZE: f64 = 3.0;
/// Width of the random marker radius band above [`MIN_SIZE`].
const SIZE_SPREAD: f64 = 5.0;
/// Upper bound of the per-point value.
const MAX_VALUE: f64 = 100.0;

/// One scatter point. Immutable once generated.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    /// Stable identifier, `c{cluster}-p{index}`.
    pub id: String,
    /// X value in data space.
    pub x: f64,
    /// Y value in data space.
    pub y: f64,
    /// Marker radius in pixels at rest.
    pub size: f32,
    /// Fill color shared by the cluster.
    pub color: Color,
    /// Cluster index.
    pub cluster: usize,
    /// Payload value in `0..=100`.
    pub value: u32,
}

impl ScatterPoint {
    /// Position in data space.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Generate `config.clusters` clusters of `config.points_per_cluster` points
/// each, centered uniformly over the canvas.
pub fn generate_points<R: Rng + ?Sized>(rng: &mut R, config: &ChartConfig) -> Vec<ScatterPoint> {
    let clusters = config.clusters;
    let per_cluster = config.points_per_cluster;
    let mut points = Vec::with_capacity(clusters * per_cluster);

    for cluster in 0..clusters {
        let center_x = rng.r#gen::<f64>() * config.width as f64;
        let center_y = rng.r#gen::<f64>() * config.height as f64;
        let color = rainbow(cluster as f64 / clusters as f64);

        for index in 0..per_cluster {
            points.push(ScatterPoint {
                id: format!("c{cluster}-p{index}"),
                x: center_x + (rng.r#gen::<f64>() - 0.5) * CLUSTER_SPREAD,
                y: center_y + (rng.r#gen::<f64>() - 0.5) * CLUSTER_SPREAD,
                size: (rng.r#gen::<f64>() * SIZE_SPREAD + MIN_SIZE) as f32,
                color,
                cluster,
                value: (rng.r#gen::<f64>() * MAX_VALUE).round() as u32,
            });
        }
    }

    log::debug!(
        "generated {} points in {} clusters",
        points.len(),
        clusters
    );
    points
}

/// Generate a fresh, unseeded point set.
pub fn generate_random_points(config: &ChartConfig) -> Vec<ScatterPoint> {
    generate_points(&mut rand::thread_rng(), config)
}
