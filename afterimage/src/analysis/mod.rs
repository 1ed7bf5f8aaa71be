mod shape_info;

#[doc(inline)]
pub use shape_info::{SamplePoint, ShapeInfo};

use std::f32::consts::FRAC_1_SQRT_2;
use std::time::Instant;

use itertools::Itertools;
use log::{debug, info};

use crate::geometry::Shape;
use crate::geometry::primitives::Point;
use crate::util::AnalysisConfig;

/// Unit vectors of the 8 directions (cardinal and diagonal) marched from every sample
const DIRECTIONS: [(f32, f32); 8] = [
    (1.0, 0.0),
    (FRAC_1_SQRT_2, FRAC_1_SQRT_2),
    (0.0, 1.0),
    (-FRAC_1_SQRT_2, FRAC_1_SQRT_2),
    (-1.0, 0.0),
    (-FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
    (0.0, -1.0),
    (FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
];

/// Samples the interior of a [`Shape`] on a regular grid and estimates the free space around each sample.
///
/// The clearance estimate is a cheap, monotonic proxy for "how big a rectangle could be centered here",
/// not an exact medial-axis distance. No randomness is involved: analysing the same shape twice
/// yields the same [`ShapeInfo`].
#[derive(Clone, Debug)]
pub struct ShapeAnalyzer {
    pub config: AnalysisConfig,
}

impl ShapeAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        config.validate().expect("invalid analysis config");
        Self { config }
    }

    /// Returns `None` for a shape without contours.
    pub fn analyze(&self, shape: &Shape) -> Option<ShapeInfo> {
        let start = Instant::now();
        let bbox = shape.bbox()?;
        let step = self.config.grid_step;

        let n_cols = (bbox.width() / step).floor() as usize + 1;
        let n_rows = (bbox.height() / step).floor() as usize + 1;

        let samples = (0..n_rows)
            .cartesian_product(0..n_cols)
            .map(|(row, col)| {
                Point(
                    bbox.x_min + col as f32 * step,
                    bbox.y_min + row as f32 * step,
                )
            })
            .filter(|p| shape.contains(p))
            .map(|point| SamplePoint {
                point,
                local_space: self.local_space(shape, point),
            })
            .collect_vec();

        let total_area = samples.len() as f32 * step * step;
        let info = ShapeInfo {
            bbox,
            samples,
            total_area,
        };

        debug!(
            "[ANALYZE] {n_cols}x{n_rows} grid, mean local space: {:?}",
            info.mean_local_space()
        );
        info!(
            "[ANALYZE] {} interior samples, estimated area {:.0}px² ({:.3}ms)",
            info.samples.len(),
            info.total_area,
            start.elapsed().as_secs_f64() * 1000.0
        );
        Some(info)
    }

    /// Average over all directions of the distance to the first probe outside the shape,
    /// capped at the maximum ray distance.
    fn local_space(&self, shape: &Shape, origin: Point) -> f32 {
        let AnalysisConfig {
            ray_step,
            max_ray_distance,
            ..
        } = self.config;
        let n_steps = (max_ray_distance / ray_step).floor() as usize;

        let total: f32 = DIRECTIONS
            .iter()
            .map(|&(d_x, d_y)| {
                (1..=n_steps)
                    .map(|k| k as f32 * ray_step)
                    .find(|&d| !shape.contains(&origin.translate((d_x * d, d_y * d))))
                    .unwrap_or(max_ray_distance)
            })
            .sum();

        total / DIRECTIONS.len() as f32
    }
}
