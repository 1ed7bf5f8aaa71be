use crate::geometry::geo_traits::CollidesWith;
use crate::geometry::primitives::{Point, Rect};

/// Closed outline traced from a mask: an ordered sequence of points where the last point connects back to the first.
/// Immutable once created.
#[derive(Clone, Debug, PartialEq)]
pub struct Contour {
    points: Vec<Point>,
    bbox: Rect,
}

impl Contour {
    pub fn new(points: Vec<Point>) -> Self {
        assert!(
            points.len() >= 3,
            "contour must have at least 3 points, got {}",
            points.len()
        );
        let bbox = Rect::bounding_box(points.iter().copied()).expect("contour has points");
        Contour { points, bbox }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn number_of_points(&self) -> usize {
        self.points.len()
    }

    /// Bounding box of all points of the contour, may be degenerate
    pub fn bbox(&self) -> Rect {
        self.bbox
    }

    /// Iterates over all segments of the contour, including the closing one (last to first point)
    pub fn segment_iter(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    //https://en.wikipedia.org/wiki/Shoelace_formula
    pub fn area(&self) -> f32 {
        let sigma: f32 = self
            .segment_iter()
            .map(|(Point(x_i, y_i), Point(x_j, y_j))| (y_i + y_j) * (x_i - x_j))
            .sum();
        (0.5 * sigma).abs()
    }
}

impl CollidesWith<Point> for Contour {
    fn collides_with(&self, point: &Point) -> bool {
        //based on the ray casting algorithm: https://en.wikipedia.org/wiki/Point_in_polygon#Ray_casting_algorithm
        if !self.bbox.collides_with(point) {
            return false;
        }
        //horizontal ray shot to the right, toggle parity for every segment it crosses.
        //Segments are treated as half-open in y, so a ray through a vertex is counted exactly once.
        let Point(p_x, p_y) = *point;
        let mut inside = false;
        for (Point(s_x, s_y), Point(e_x, e_y)) in self.segment_iter() {
            if (s_y > p_y) != (e_y > p_y) {
                let x_cross = s_x + (p_y - s_y) * (e_x - s_x) / (e_y - s_y);
                if p_x < x_cross {
                    inside = !inside;
                }
            }
        }
        inside
    }
}
