use serde::{Deserialize, Serialize};

/// External representation of a [`PlacedRect`](crate::entities::PlacedRect).
/// Coordinates are in image space, `(x, y)` is the top left corner.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtPlacedRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub center_x: f32,
    pub center_y: f32,
    pub aspect_ratio: f32,
    /// Index of the assigned image in the pool, none if a fallback aspect ratio was used
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub image_id: Option<usize>,
}

/// External representation of a [`Contour`](crate::geometry::primitives::Contour), a closed polyline.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtContour {
    pub points: Vec<(f32, f32)>,
}
