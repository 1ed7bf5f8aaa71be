use itertools::Itertools;

use crate::geometry::geo_traits::CollidesWith;
use crate::geometry::primitives::{Contour, Point, Rect};

/// All contours produced by one extraction pass.
///
/// The longest contour (by number of points) is the *main contour*: it is the sole polygon used
/// for containment. Secondary contours are only carried along for rendering.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Shape {
    contours: Vec<Contour>,
    main: Option<usize>,
}

impl Shape {
    pub fn new(contours: Vec<Contour>) -> Self {
        let main = contours
            .iter()
            .position_max_by_key(|c| c.number_of_points());
        Shape { contours, main }
    }

    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    pub fn main_contour(&self) -> Option<&Contour> {
        self.main.map(|i| &self.contours[i])
    }

    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    /// Bounding box of all points of all contours
    pub fn bbox(&self) -> Option<Rect> {
        self.contours
            .iter()
            .map(|c| c.bbox())
            .reduce(Rect::bounding_rect)
    }

    /// Point-in-polygon oracle, tested against the main contour only.
    pub fn contains(&self, point: &Point) -> bool {
        self.main_contour()
            .is_some_and(|main| main.collides_with(point))
    }

    /// Whether every probe point of `rect` (corners, edge midpoints and centroid) lies inside the shape
    pub fn contains_rect(&self, rect: &Rect) -> bool {
        rect.probe_points().iter().all(|p| self.contains(p))
    }
}
