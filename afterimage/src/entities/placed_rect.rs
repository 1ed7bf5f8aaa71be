use crate::entities::ImageRef;
use crate::geometry::primitives::{Point, Rect};

/// A rectangle that has been placed inside a shape, handed over to the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedRect {
    pub bbox: Rect,
    pub image: Option<ImageRef>,
    /// Aspect ratio (width / height) the rectangle was requested with
    pub aspect_ratio: f32,
}

impl PlacedRect {
    pub fn x(&self) -> f32 {
        self.bbox.x_min
    }

    pub fn y(&self) -> f32 {
        self.bbox.y_min
    }

    pub fn width(&self) -> f32 {
        self.bbox.width()
    }

    pub fn height(&self) -> f32 {
        self.bbox.height()
    }

    pub fn center(&self) -> Point {
        self.bbox.centroid()
    }

    pub fn area(&self) -> f32 {
        self.bbox.area()
    }
}
