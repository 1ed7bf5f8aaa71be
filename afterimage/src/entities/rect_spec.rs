use serde::{Deserialize, Serialize};

use crate::entities::ImageRef;

/// Size class of a requested rectangle. Larger tiers are placed first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SizeTier {
    Small,
    Medium,
    Large,
}

impl SizeTier {
    pub const ALL: [SizeTier; 3] = [SizeTier::Large, SizeTier::Medium, SizeTier::Small];

    /// Placement priority, higher is placed earlier
    pub fn priority(&self) -> u8 {
        match self {
            SizeTier::Large => 3,
            SizeTier::Medium => 2,
            SizeTier::Small => 1,
        }
    }
}

/// Request for a rectangle to be placed inside a shape
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectSpec {
    pub width: f32,
    pub height: f32,
    /// Aspect ratio (width / height) to preserve, taken from the assigned image if any
    pub aspect_ratio: f32,
    pub image: Option<ImageRef>,
    pub tier: SizeTier,
    pub priority: u8,
}

impl RectSpec {
    /// Creates a spec whose longest side equals `base_size`, respecting `aspect_ratio`.
    ///
    /// Landscape (aspect >= 1): `width = base_size`, `height = base_size / aspect`.
    /// Portrait: `height = base_size`, `width = base_size * aspect`.
    pub fn new(base_size: f32, aspect_ratio: f32, image: Option<ImageRef>, tier: SizeTier) -> Self {
        assert!(aspect_ratio > 0.0 && base_size > 0.0);
        let (width, height) = match aspect_ratio >= 1.0 {
            true => (base_size, base_size / aspect_ratio),
            false => (base_size * aspect_ratio, base_size),
        };
        Self {
            width,
            height,
            aspect_ratio,
            image,
            tier,
            priority: tier.priority(),
        }
    }

    pub fn min_side(&self) -> f32 {
        f32::min(self.width, self.height)
    }

    /// Returns a copy with both sides multiplied by `factor`, keeping the aspect ratio.
    pub fn shrunk(&self, factor: f32) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
            ..*self
        }
    }
}
