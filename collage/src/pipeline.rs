use std::time::Instant;

use afterimage::analysis::{ShapeAnalyzer, ShapeInfo};
use afterimage::entities::{ImageRef, Layout, PlacedRect};
use afterimage::extraction::{ContourExtractor, Mask};
use afterimage::geometry::Shape;
use log::{info, warn};
use rand::Rng;

use crate::config::CollageConfig;
use crate::opt::nudge::PlacementOptimizer;
use crate::opt::packer::IterativePacker;
use crate::spec_gen::SpecGenerator;

/// Everything produced by a single capture
#[derive(Clone, Debug, Default)]
pub struct CaptureResult {
    pub shape: Shape,
    /// `None` if no silhouette was found
    pub shape_info: Option<ShapeInfo>,
    pub placed: Vec<PlacedRect>,
    /// Fraction of the estimated shape area covered by the placed rectangles
    pub utilization: f32,
}

impl CaptureResult {
    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }
}

/// Runs extraction, analysis, spec generation, packing and optimization for one capture trigger.
pub struct CapturePipeline {
    pub config: CollageConfig,
    extractor: ContourExtractor,
    analyzer: ShapeAnalyzer,
    generator: SpecGenerator,
    optimizer: PlacementOptimizer,
}

impl CapturePipeline {
    pub fn new(config: CollageConfig) -> Self {
        config.validate().expect("invalid collage config");
        Self {
            config,
            extractor: ContourExtractor::new(config.extraction),
            analyzer: ShapeAnalyzer::new(config.analysis),
            generator: SpecGenerator::new(config.packing),
            optimizer: PlacementOptimizer::new(config.packing),
        }
    }

    /// Degenerate input (no mask, no silhouette, no interior) results in an empty [`CaptureResult`].
    pub fn run(
        &self,
        mask: Option<&Mask>,
        images: &[ImageRef],
        target_count: usize,
        rng: &mut impl Rng,
    ) -> CaptureResult {
        let start = Instant::now();

        let shape = self.extractor.extract_shape(mask);
        let Some(shape_info) = self.analyzer.analyze(&shape) else {
            warn!("[CAPTURE] no silhouette found, nothing to place");
            return CaptureResult::default();
        };

        let specs = self
            .generator
            .generate(&shape_info, images, target_count, rng);
        let mut packer = IterativePacker::new(self.config.packing);
        let placed = packer.place(&specs, &shape, &shape_info, rng);

        let placed = match self.config.packing.optimize {
            true => self.optimizer.optimize(&shape, placed),
            false => placed,
        };

        let layout = Layout::from_placed(&shape, self.config.packing.validity(), placed);
        let utilization = layout.utilization(shape_info.total_area);
        let placed = layout.into_placed();

        info!(
            "[CAPTURE] {}/{target_count} rects placed in {:.3}ms, {:.1}% of the shape covered",
            placed.len(),
            start.elapsed().as_secs_f64() * 1000.0,
            utilization * 100.0
        );

        CaptureResult {
            shape,
            shape_info: Some(shape_info),
            placed,
            utilization,
        }
    }
}
