use serde::{Deserialize, Serialize};

use crate::geometry::geo_traits::CollidesWith;

/// Geometric primitive representing a point in image space (y axis pointing down)
#[derive(Debug, Clone, PartialEq, Copy, Default, Serialize, Deserialize)]
pub struct Point(pub f32, pub f32);

impl Point {
    #[inline(always)]
    pub fn x(&self) -> f32 {
        self.0
    }

    #[inline(always)]
    pub fn y(&self) -> f32 {
        self.1
    }

    pub fn distance(&self, other: Point) -> f32 {
        self.sq_distance(other).sqrt()
    }

    pub fn sq_distance(&self, other: Point) -> f32 {
        (self.0 - other.0).powi(2) + (self.1 - other.1).powi(2)
    }

    /// Returns a new point shifted by `(dx, dy)`
    pub fn translate(self, (dx, dy): (f32, f32)) -> Point {
        Point(self.0 + dx, self.1 + dy)
    }

    /// Centroid of a set of points, `None` if the set is empty
    pub fn centroid_of(points: impl IntoIterator<Item = Point>) -> Option<Point> {
        let (sum_x, sum_y, n) = points
            .into_iter()
            .fold((0.0, 0.0, 0usize), |(sx, sy, n), Point(x, y)| {
                (sx + x, sy + y, n + 1)
            });
        match n {
            0 => None,
            n => Some(Point(sum_x / n as f32, sum_y / n as f32)),
        }
    }
}

impl From<Point> for (f32, f32) {
    fn from(p: Point) -> Self {
        (p.0, p.1)
    }
}

impl From<(f32, f32)> for Point {
    fn from(p: (f32, f32)) -> Self {
        Point(p.0, p.1)
    }
}

impl<T> CollidesWith<T> for Point
where
    T: CollidesWith<Point>,
{
    fn collides_with(&self, other: &T) -> bool {
        other.collides_with(self)
    }
}
