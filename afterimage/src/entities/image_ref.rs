use serde::{Deserialize, Serialize};

/// Reference to a decoded image of the pool, exposing its native pixel dimensions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageRef {
    /// Index of the image in its pool
    pub id: usize,
    pub width: u32,
    pub height: u32,
}

impl ImageRef {
    pub fn new(id: usize, width: u32, height: u32) -> Self {
        assert!(
            width > 0 && height > 0,
            "image {id} has no pixels: {width}x{height}"
        );
        Self { id, width, height }
    }

    /// Native aspect ratio (width / height)
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}
