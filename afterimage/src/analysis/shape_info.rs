use crate::geometry::primitives::{Point, Rect};

/// Grid point lying inside a shape, annotated with its approximate clearance
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplePoint {
    pub point: Point,
    /// Average distance one can travel in 8 directions before leaving the shape
    pub local_space: f32,
}

/// Aggregate description of the interior of a shape, derived once per capture and shared read-only
/// by spec generation, packing and optimization.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeInfo {
    /// Bounding box of all contours of the shape
    pub bbox: Rect,
    /// Interior grid samples, in row-major grid order
    pub samples: Vec<SamplePoint>,
    /// Area estimate: number of samples times the area of a grid cell
    pub total_area: f32,
}

impl ShapeInfo {
    /// Mean clearance over all samples, `None` if the shape has no interior samples
    pub fn mean_local_space(&self) -> Option<f32> {
        match self.samples.len() {
            0 => None,
            n => Some(self.samples.iter().map(|s| s.local_space).sum::<f32>() / n as f32),
        }
    }

    /// Samples offering at least `min_space` clearance
    pub fn candidates(&self, min_space: f32) -> impl Iterator<Item = &SamplePoint> + '_ {
        self.samples.iter().filter(move |s| s.local_space >= min_space)
    }
}
