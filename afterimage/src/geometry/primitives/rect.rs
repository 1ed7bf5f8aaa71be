use anyhow::Result;
use anyhow::ensure;
use serde::{Deserialize, Serialize};

use crate::geometry::geo_traits::{CollidesWith, DistanceTo};
use crate::geometry::primitives::Point;

///Axis-aligned rectangle
#[derive(Clone, Debug, PartialEq, Copy, Serialize, Deserialize)]
pub struct Rect {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

impl Rect {
    pub fn try_new(x_min: f32, y_min: f32, x_max: f32, y_max: f32) -> Result<Self> {
        ensure!(
            x_min < x_max && y_min < y_max,
            "invalid rectangle, x_min: {x_min}, x_max: {x_max}, y_min: {y_min}, y_max: {y_max}"
        );
        Ok(Rect {
            x_min,
            y_min,
            x_max,
            y_max,
        })
    }

    /// Creates a rectangle of the given dimensions centered around `center`.
    pub fn centered_at(center: Point, width: f32, height: f32) -> Result<Self> {
        let Point(c_x, c_y) = center;
        let (half_w, half_h) = (width / 2.0, height / 2.0);
        Rect::try_new(c_x - half_w, c_y - half_h, c_x + half_w, c_y + half_h)
    }

    /// Smallest rectangle containing all `points`.
    /// Unlike [Rect::try_new], the result may be degenerate (zero width or height),
    /// returns `None` for an empty set of points.
    pub fn bounding_box(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        points.into_iter().fold(None, |bbox, Point(x, y)| {
            Some(match bbox {
                None => Rect {
                    x_min: x,
                    y_min: y,
                    x_max: x,
                    y_max: y,
                },
                Some(r) => Rect {
                    x_min: r.x_min.min(x),
                    y_min: r.y_min.min(y),
                    x_max: r.x_max.max(x),
                    y_max: r.y_max.max(y),
                },
            })
        })
    }

    /// Returns the smallest rectangle that contains both `a` and `b`.
    pub fn bounding_rect(a: Rect, b: Rect) -> Rect {
        Rect {
            x_min: f32::min(a.x_min, b.x_min),
            y_min: f32::min(a.y_min, b.y_min),
            x_max: f32::max(a.x_max, b.x_max),
            y_max: f32::max(a.y_max, b.y_max),
        }
    }

    /// Returns the four corners of `self`, counterclockwise starting from the top right.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point(self.x_max, self.y_min),
            Point(self.x_min, self.y_min),
            Point(self.x_min, self.y_max),
            Point(self.x_max, self.y_max),
        ]
    }

    /// Returns the midpoints of the four edges of `self`, in the same order as [Rect::corners].
    pub fn edge_midpoints(&self) -> [Point; 4] {
        let Point(c_x, c_y) = self.centroid();
        [
            Point(c_x, self.y_min),
            Point(self.x_min, c_y),
            Point(c_x, self.y_max),
            Point(self.x_max, c_y),
        ]
    }

    /// Points which must all lie inside a shape for the rectangle to be considered contained by it:
    /// the corners, the edge midpoints and the centroid.
    pub fn probe_points(&self) -> [Point; 9] {
        let [c0, c1, c2, c3] = self.corners();
        let [m0, m1, m2, m3] = self.edge_midpoints();
        [c0, m0, c1, m1, c2, m2, c3, m3, self.centroid()]
    }

    /// Returns a copy of `self` moved by `(dx, dy)`.
    pub fn translate(self, (dx, dy): (f32, f32)) -> Self {
        Rect {
            x_min: self.x_min + dx,
            y_min: self.y_min + dy,
            x_max: self.x_max + dx,
            y_max: self.y_max + dy,
        }
    }

    /// Returns a new rectangle with the same centroid but scaled by `factor`.
    pub fn scale(self, factor: f32) -> Self {
        let dx = self.width() * (factor - 1.0) / 2.0;
        let dy = self.height() * (factor - 1.0) / 2.0;
        Rect {
            x_min: self.x_min - dx,
            y_min: self.y_min - dy,
            x_max: self.x_max + dx,
            y_max: self.y_max + dy,
        }
    }

    pub fn width(&self) -> f32 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f32 {
        self.y_max - self.y_min
    }

    pub fn centroid(&self) -> Point {
        Point(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }

    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }
}

impl CollidesWith<Rect> for Rect {
    #[inline(always)]
    fn collides_with(&self, other: &Rect) -> bool {
        f32::max(self.x_min, other.x_min) <= f32::min(self.x_max, other.x_max)
            && f32::max(self.y_min, other.y_min) <= f32::min(self.y_max, other.y_max)
    }
}

impl CollidesWith<Point> for Rect {
    #[inline(always)]
    fn collides_with(&self, point: &Point) -> bool {
        let Point(x, y) = *point;
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }
}

impl DistanceTo<Rect> for Rect {
    /// Gap between two rectangles: edge-to-edge when they share an x or y interval,
    /// corner-to-corner when they are diagonally offset.
    #[inline(always)]
    fn distance_to(&self, other: &Rect) -> f32 {
        self.sq_distance_to(other).sqrt()
    }

    #[inline(always)]
    fn sq_distance_to(&self, other: &Rect) -> f32 {
        let dx = f32::max(0.0, f32::max(other.x_min - self.x_max, self.x_min - other.x_max));
        let dy = f32::max(0.0, f32::max(other.y_min - self.y_max, self.y_min - other.y_max));
        dx.powi(2) + dy.powi(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_degenerate_rectangles() {
        assert!(Rect::try_new(0.0, 0.0, 0.0, 10.0).is_err());
        assert!(Rect::try_new(5.0, 0.0, 1.0, 10.0).is_err());
        assert!(Rect::centered_at(Point(0.0, 0.0), -2.0, 4.0).is_err());
    }

    #[test]
    fn probe_points_cover_corners_midpoints_and_center() {
        let r = Rect::try_new(0.0, 0.0, 10.0, 20.0).unwrap();
        let probes = r.probe_points();
        assert!(probes.contains(&Point(10.0, 0.0)));
        assert!(probes.contains(&Point(0.0, 20.0)));
        assert!(probes.contains(&Point(5.0, 0.0)));
        assert!(probes.contains(&Point(10.0, 10.0)));
        assert_eq!(probes[8], Point(5.0, 10.0));
        assert!(probes.iter().all(|p| r.collides_with(p)));
    }

    #[test]
    fn gap_distance() {
        let a = Rect::try_new(0.0, 0.0, 10.0, 10.0).unwrap();
        //side by side
        let b = Rect::try_new(14.0, 2.0, 20.0, 8.0).unwrap();
        assert_eq!(a.distance_to(&b), 4.0);
        //diagonally offset: corner to corner
        let c = Rect::try_new(13.0, 14.0, 20.0, 20.0).unwrap();
        assert_eq!(a.distance_to(&c), 5.0);
        //overlapping
        let d = Rect::try_new(5.0, 5.0, 20.0, 20.0).unwrap();
        assert_eq!(a.distance_to(&d), 0.0);
        assert!(a.collides_with(&d));
        assert!(!a.collides_with(&b));
    }
}
