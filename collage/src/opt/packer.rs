use std::time::Instant;

use afterimage::analysis::ShapeInfo;
use afterimage::entities::{Layout, PlacedRect, RectSpec};
use afterimage::geometry::Shape;
use afterimage::geometry::primitives::Rect;
use afterimage::util::assertions;
use log::{debug, info};
use rand::Rng;
use thousands::Separable;

use crate::config::PackingConfig;
use crate::samplers::candidate_sampler::CandidateSampler;

/// Places rectangle specs one by one at random interior samples, shrinking those that do not fit.
pub struct IterativePacker {
    pub config: PackingConfig,
    /// Total number of candidate centers sampled
    pub sample_counter: usize,
}

impl IterativePacker {
    pub fn new(config: PackingConfig) -> Self {
        config.validate().expect("invalid packing config");
        Self {
            config,
            sample_counter: 0,
        }
    }

    /// Places at most one rectangle per spec, in the order of `specs`.
    ///
    /// Each spec gets `attempt_budget` samples among the candidates with enough local space.
    /// When no candidate exists or the budget is spent, both sides are multiplied by `shrink_factor`
    /// and the budget is reset. Specs which would have to shrink below `min_image_size` are skipped.
    pub fn place(
        &mut self,
        specs: &[RectSpec],
        shape: &Shape,
        shape_info: &ShapeInfo,
        rng: &mut impl Rng,
    ) -> Vec<PlacedRect> {
        let start = Instant::now();
        let mut layout = Layout::new(shape, self.config.validity());
        let mut n_shrinks = 0;

        'spec: for (i, spec) in specs.iter().enumerate() {
            let mut spec = *spec;
            loop {
                let mut sampler = CandidateSampler::new(shape_info, spec.width, spec.height);
                let mut placement = None;
                for _ in 0..self.config.attempt_budget {
                    let Some(center) = sampler.sample(rng) else {
                        break;
                    };
                    let valid_bbox = Rect::centered_at(center, spec.width, spec.height)
                        .ok()
                        .filter(|bbox| layout.is_valid(bbox, None));
                    if valid_bbox.is_some() {
                        placement = valid_bbox;
                        break;
                    }
                }
                self.sample_counter += sampler.n_samples;

                match placement {
                    Some(bbox) => {
                        layout.place(PlacedRect {
                            bbox,
                            image: spec.image,
                            aspect_ratio: spec.aspect_ratio,
                        });
                        debug!(
                            "[PACK] spec {}/{} ({:?}) placed after {} samples",
                            i + 1,
                            specs.len(),
                            spec.tier,
                            sampler.n_samples
                        );
                        continue 'spec;
                    }
                    None => {
                        let shrunk = spec.shrunk(self.config.shrink_factor);
                        if shrunk.min_side() < self.config.min_image_size {
                            debug!(
                                "[PACK] spec {}/{} ({:?}) abandoned at {:.1}x{:.1}, {} candidates",
                                i + 1,
                                specs.len(),
                                spec.tier,
                                spec.width,
                                spec.height,
                                sampler.n_candidates()
                            );
                            continue 'spec;
                        }
                        debug!(
                            "[PACK] spec {}/{} does not fit, shrinking to {:.1}x{:.1}",
                            i + 1,
                            specs.len(),
                            shrunk.width,
                            shrunk.height
                        );
                        n_shrinks += 1;
                        spec = shrunk;
                    }
                }
            }
        }
        debug_assert!(assertions::layout_is_valid(&layout));

        info!(
            "[PACK] placed {}/{} rects in {:.3}ms ({} samples, {} shrinks)",
            layout.placed().len(),
            specs.len(),
            start.elapsed().as_secs_f64() * 1000.0,
            self.sample_counter.separate_with_commas(),
            n_shrinks
        );
        info!(
            "[PACK] rects cover {:.1}% of the shape",
            layout.utilization(shape_info.total_area) * 100.0
        );
        layout.into_placed()
    }
}
