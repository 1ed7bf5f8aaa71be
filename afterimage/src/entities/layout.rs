use log::debug;

use crate::entities::PlacedRect;
use crate::geometry::Shape;
use crate::geometry::geo_traits::{CollidesWith, DistanceTo};
use crate::geometry::primitives::Rect;
use crate::util::ValidityConfig;
use crate::util::assertions;

/// A [`Shape`] together with the rectangles placed inside it so far.
///
/// Every rectangle entering the layout is checked against the validity predicate,
/// see [`Layout::is_valid`].
#[derive(Clone, Debug)]
pub struct Layout<'a> {
    shape: &'a Shape,
    placed: Vec<PlacedRect>,
    pub config: ValidityConfig,
}

impl<'a> Layout<'a> {
    pub fn new(shape: &'a Shape, config: ValidityConfig) -> Self {
        Self {
            shape,
            placed: vec![],
            config,
        }
    }

    /// Creates a layout from rectangles that were placed before, e.g. to post-process them.
    pub fn from_placed(shape: &'a Shape, config: ValidityConfig, placed: Vec<PlacedRect>) -> Self {
        let layout = Self {
            shape,
            placed,
            config,
        };
        debug_assert!(assertions::layout_is_valid(&layout));
        layout
    }

    /// A rectangle is valid iff all of the following hold:
    /// * its corners, edge midpoints and center lie inside the shape
    /// * it does not overlap any placed rectangle
    /// * it keeps at least the minimum spacing to every placed rectangle
    /// * its area is not below the minimum area
    ///
    /// The placed rectangle at index `ignore` (if any) is skipped, which allows re-validating a moved rectangle.
    pub fn is_valid(&self, rect: &Rect, ignore: Option<usize>) -> bool {
        if rect.area() < self.config.min_area {
            return false;
        }
        //cheap pairwise checks first, containment requires ray casting
        let sq_min_spacing = self.config.min_spacing.powi(2);
        let clashes = self
            .placed
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != ignore)
            .any(|(_, p)| {
                p.bbox.collides_with(rect)
                    || (sq_min_spacing > 0.0 && p.bbox.sq_distance_to(rect) < sq_min_spacing)
            });

        !clashes && self.shape.contains_rect(rect)
    }

    /// Adds a rectangle to the layout, returns its index.
    pub fn place(&mut self, p_rect: PlacedRect) -> usize {
        debug_assert!(self.is_valid(&p_rect.bbox, None));
        self.placed.push(p_rect);
        debug!(
            "[LAYOUT] placed #{} at ({:.1}, {:.1}), {:.1}x{:.1}",
            self.placed.len() - 1,
            p_rect.x(),
            p_rect.y(),
            p_rect.width(),
            p_rect.height()
        );
        self.placed.len() - 1
    }

    /// Moves the placed rectangle at `index` to `bbox`.
    pub fn relocate(&mut self, index: usize, bbox: Rect) {
        debug_assert!(self.is_valid(&bbox, Some(index)));
        self.placed[index].bbox = bbox;
    }

    pub fn shape(&self) -> &'a Shape {
        self.shape
    }

    pub fn placed(&self) -> &[PlacedRect] {
        &self.placed
    }

    pub fn into_placed(self) -> Vec<PlacedRect> {
        self.placed
    }

    pub fn placed_area(&self) -> f32 {
        self.placed.iter().map(|p| p.area()).sum()
    }

    /// Fraction of `total_area` covered by placed rectangles
    pub fn utilization(&self, total_area: f32) -> f32 {
        match total_area > 0.0 {
            true => self.placed_area() / total_area,
            false => 0.0,
        }
    }
}
