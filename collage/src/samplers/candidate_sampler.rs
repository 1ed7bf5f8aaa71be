use afterimage::analysis::{SamplePoint, ShapeInfo};
use afterimage::geometry::primitives::Point;
use rand::Rng;
use rand::seq::IndexedRandom;

/// Samples placement centers uniformly from the interior samples with enough clearance for a rectangle.
pub struct CandidateSampler<'a> {
    candidates: Vec<&'a SamplePoint>,
    pub n_samples: usize,
}

impl<'a> CandidateSampler<'a> {
    /// Retains the samples with a local space of at least half the smallest side of the rectangle.
    pub fn new(shape_info: &'a ShapeInfo, width: f32, height: f32) -> Self {
        let min_space = f32::min(width, height) / 2.0;
        let candidates = shape_info.candidates(min_space).collect();
        Self {
            candidates,
            n_samples: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn n_candidates(&self) -> usize {
        self.candidates.len()
    }

    pub fn sample(&mut self, rng: &mut impl Rng) -> Option<Point> {
        let candidate = self.candidates.choose(rng)?;
        self.n_samples += 1;
        Some(candidate.point)
    }
}
