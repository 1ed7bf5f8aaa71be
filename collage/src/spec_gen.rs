use afterimage::analysis::ShapeInfo;
use afterimage::entities::{ImageRef, RectSpec, SizeTier};
use log::{debug, info};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::config::PackingConfig;

/// Turns a target count and an image pool into a prioritized list of rectangle requests.
pub struct SpecGenerator {
    pub config: PackingConfig,
}

impl SpecGenerator {
    pub fn new(config: PackingConfig) -> Self {
        config.validate().expect("invalid packing config");
        Self { config }
    }

    /// Generates `target_count` specs, sorted by descending priority (large rectangles first).
    ///
    /// Every spec is assigned an image drawn uniformly from `images` and inherits its aspect ratio.
    /// With an empty pool, aspect ratios are drawn from the fallback palette and no image is assigned.
    /// Returns no specs if the shape has no interior samples.
    pub fn generate(
        &self,
        shape_info: &ShapeInfo,
        images: &[ImageRef],
        target_count: usize,
        rng: &mut impl Rng,
    ) -> Vec<RectSpec> {
        let Some(mean_space) = shape_info.mean_local_space() else {
            return vec![];
        };

        let mut specs = Vec::with_capacity(target_count);
        for (tier, count) in self.tier_counts(target_count) {
            let base_size = self.base_size(tier, mean_space);
            for _ in 0..count {
                let (aspect_ratio, image) = match images.choose(rng) {
                    Some(img) => (img.aspect_ratio(), Some(*img)),
                    None => {
                        let palette = &self.config.fallback_aspect_ratios;
                        (palette[rng.random_range(0..palette.len())], None)
                    }
                };
                specs.push(RectSpec::new(base_size, aspect_ratio, image, tier));
            }
            debug!("[SPEC] {count} {tier:?} specs with base size {base_size:.1}");
        }
        //stable, keeps generation order within a tier
        specs.sort_by_key(|s| std::cmp::Reverse(s.priority));

        info!(
            "[SPEC] generated {} specs (mean local space: {mean_space:.1}, pool: {} images)",
            specs.len(),
            images.len()
        );
        specs
    }

    /// Splits `target_count` over the tiers, large and medium are rounded, small takes the remainder.
    pub fn tier_counts(&self, target_count: usize) -> [(SizeTier, usize); 3] {
        let (large_frac, medium_frac) = self.config.tier_fractions;
        let n = target_count as f32;
        let large = usize::min((n * large_frac).round() as usize, target_count);
        let medium = usize::min((n * medium_frac).round() as usize, target_count - large);
        let small = target_count - large - medium;
        [
            (SizeTier::Large, large),
            (SizeTier::Medium, medium),
            (SizeTier::Small, small),
        ]
    }

    /// Base size of a tier: the mean local space scaled by the tier multiplier, clamped to the configured range
    pub fn base_size(&self, tier: SizeTier, mean_space: f32) -> f32 {
        let multiplier = match tier {
            SizeTier::Large => self.config.tier_multipliers[0],
            SizeTier::Medium => self.config.tier_multipliers[1],
            SizeTier::Small => self.config.tier_multipliers[2],
        };
        (mean_space * multiplier).clamp(self.config.min_image_size, self.config.max_image_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use afterimage::analysis::SamplePoint;
    use afterimage::geometry::primitives::{Point, Rect};
    use float_cmp::approx_eq;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use test_case::test_case;

    fn uniform_info(local_space: f32) -> ShapeInfo {
        ShapeInfo {
            bbox: Rect::try_new(0.0, 0.0, 100.0, 100.0).unwrap(),
            samples: vec![
                SamplePoint {
                    point: Point(50.0, 50.0),
                    local_space,
                },
                SamplePoint {
                    point: Point(58.0, 50.0),
                    local_space,
                },
            ],
            total_area: 128.0,
        }
    }

    #[test_case(0, [0, 0, 0]; "none")]
    #[test_case(1, [0, 0, 1]; "one")]
    #[test_case(2, [1, 1, 0]; "two")]
    #[test_case(6, [2, 3, 1]; "six")]
    #[test_case(10, [3, 4, 3]; "ten")]
    #[test_case(40, [11, 17, 12]; "forty")]
    fn tier_partition(target_count: usize, expected: [usize; 3]) {
        let generator = SpecGenerator::new(PackingConfig::default());
        let counts = generator.tier_counts(target_count).map(|(_, c)| c);
        assert_eq!(counts, expected);
        assert_eq!(counts.iter().sum::<usize>(), target_count);
    }

    #[test]
    fn base_sizes_are_clamped() {
        let generator = SpecGenerator::new(PackingConfig::default());
        assert_eq!(generator.base_size(SizeTier::Large, 100.0), 90.0);
        assert_eq!(generator.base_size(SizeTier::Small, 40.0), 50.0);
        assert_eq!(generator.base_size(SizeTier::Large, 400.0), 150.0);
    }

    #[test]
    fn specs_are_sorted_large_first() {
        let generator = SpecGenerator::new(PackingConfig::default());
        let mut rng = SmallRng::seed_from_u64(0);
        let specs = generator.generate(&uniform_info(100.0), &[], 10, &mut rng);
        assert_eq!(specs.len(), 10);
        assert!(specs.windows(2).all(|w| w[0].priority >= w[1].priority));
        assert_eq!(specs[0].tier, SizeTier::Large);
        assert_eq!(specs[9].tier, SizeTier::Small);
    }

    #[test]
    fn fallback_palette_without_images() {
        let config = PackingConfig::default();
        let generator = SpecGenerator::new(config);
        let mut rng = SmallRng::seed_from_u64(1);
        for spec in generator.generate(&uniform_info(100.0), &[], 20, &mut rng) {
            assert!(spec.image.is_none());
            assert!(config.fallback_aspect_ratios.contains(&spec.aspect_ratio));
            assert!(approx_eq!(
                f32,
                spec.width / spec.height,
                spec.aspect_ratio,
                epsilon = 1e-4
            ));
        }
    }

    #[test]
    fn specs_inherit_image_aspect_ratio() {
        let generator = SpecGenerator::new(PackingConfig::default());
        let images = [ImageRef::new(0, 1920, 1080), ImageRef::new(1, 600, 900)];
        let mut rng = SmallRng::seed_from_u64(2);
        let specs = generator.generate(&uniform_info(100.0), &images, 12, &mut rng);
        for spec in specs {
            let image = spec.image.unwrap();
            assert_eq!(spec.aspect_ratio, image.aspect_ratio());
            //the longest side equals the tier's base size
            let base = generator.base_size(spec.tier, 100.0);
            assert!(approx_eq!(f32, f32::max(spec.width, spec.height), base, ulps = 2));
        }
    }

    #[test]
    fn no_specs_for_a_shape_without_samples() {
        let generator = SpecGenerator::new(PackingConfig::default());
        let info = ShapeInfo {
            samples: vec![],
            total_area: 0.0,
            ..uniform_info(0.0)
        };
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(generator.generate(&info, &[], 6, &mut rng).is_empty());
    }
}
