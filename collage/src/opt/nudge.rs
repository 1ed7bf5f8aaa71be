use afterimage::entities::{Layout, PlacedRect};
use afterimage::geometry::Shape;
use afterimage::geometry::primitives::Point;
use itertools::Itertools;
use log::{debug, info};
use ordered_float::OrderedFloat;

use crate::config::PackingConfig;

/// Single relaxation pass spreading a packed collage outward.
pub struct PlacementOptimizer {
    pub config: PackingConfig,
}

impl PlacementOptimizer {
    pub fn new(config: PackingConfig) -> Self {
        config.validate().expect("invalid packing config");
        Self { config }
    }

    /// Moves every rectangle `nudge_distance` directly away from the centroid of all rectangle centers.
    ///
    /// Rectangles are visited from the outermost inward; a move is only kept if the rectangle
    /// remains valid with respect to the shape and all other rectangles.
    /// Rectangles sitting exactly at the centroid stay where they are.
    pub fn optimize(&self, shape: &Shape, placed: Vec<PlacedRect>) -> Vec<PlacedRect> {
        let Some(centroid) = Point::centroid_of(placed.iter().map(|p| p.center())) else {
            return placed;
        };
        let mut layout = Layout::from_placed(shape, self.config.validity(), placed);

        let visiting_order = layout
            .placed()
            .iter()
            .enumerate()
            .sorted_by_key(|(_, p)| OrderedFloat(-p.center().sq_distance(centroid)))
            .map(|(i, _)| i)
            .collect_vec();

        let mut n_moved = 0;
        for i in visiting_order {
            let p_rect = &layout.placed()[i];
            let Point(c_x, c_y) = p_rect.center();
            let (dx, dy) = (c_x - centroid.0, c_y - centroid.1);
            let dist = f32::hypot(dx, dy);
            if dist < f32::EPSILON {
                continue;
            }
            let step = self.config.nudge_distance / dist;
            let moved = p_rect.bbox.translate((dx * step, dy * step));
            if layout.is_valid(&moved, Some(i)) {
                layout.relocate(i, moved);
                n_moved += 1;
            } else {
                debug!("[OPT] rect #{i} cannot be nudged outward");
            }
        }

        info!(
            "[OPT] nudged {n_moved}/{} rects away from ({:.1}, {:.1})",
            layout.placed().len(),
            centroid.0,
            centroid.1
        );
        layout.into_placed()
    }
}
