use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

use afterimage::io::svg::SvgDrawOptions;
use afterimage::util::{AnalysisConfig, ExtractionConfig, ValidityConfig};

/// Configuration of a full capture: extraction, analysis, packing and output
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct CollageConfig {
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub packing: PackingConfig,
    /// Seed for the PRNG. If undefined, the packer will run in non-deterministic mode using entropy
    pub prng_seed: Option<u64>,
    /// Optional SVG drawing options
    #[serde(default)]
    pub svg_draw_options: SvgDrawOptions,
}

impl Default for CollageConfig {
    fn default() -> Self {
        Self {
            extraction: ExtractionConfig::default(),
            analysis: AnalysisConfig::default(),
            packing: PackingConfig::default(),
            prng_seed: None,
            svg_draw_options: SvgDrawOptions::default(),
        }
    }
}

impl CollageConfig {
    pub fn validate(&self) -> Result<()> {
        self.extraction.validate()?;
        self.analysis.validate()?;
        self.packing.validate()?;
        Ok(())
    }
}

/// Configuration of the rectangle spec generation, packing and optimization
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct PackingConfig {
    /// Lower bound on the base size of a rectangle, nothing is shrunk below it
    pub min_image_size: f32,
    /// Upper bound on the base size of a rectangle
    pub max_image_size: f32,
    /// Minimum gap between two placed rectangles
    pub min_spacing: f32,
    /// Fraction of the target count requested as large and medium rectangles, the rest is small
    pub tier_fractions: (f32, f32),
    /// Multipliers of the mean local space for the base size of large, medium and small rectangles
    pub tier_multipliers: [f32; 3],
    /// Aspect ratios to pick from when no images are available
    pub fallback_aspect_ratios: [f32; 6],
    /// Factor applied to both sides of a rectangle that does not fit
    pub shrink_factor: f32,
    /// Number of invalid placement attempts of a rectangle before it is shrunk
    pub attempt_budget: usize,
    /// Distance rectangles are pushed away from the centroid of the collage during optimization
    pub nudge_distance: f32,
    /// Run the placement optimizer after packing
    pub optimize: bool,
}

impl Default for PackingConfig {
    fn default() -> Self {
        Self {
            min_image_size: 50.0,
            max_image_size: 150.0,
            min_spacing: 6.0,
            tier_fractions: (0.275, 0.425),
            tier_multipliers: [0.9, 0.7, 0.5],
            fallback_aspect_ratios: [1.0, 1.5, 0.67, 1.33, 0.8, 1.25],
            shrink_factor: 0.9,
            attempt_budget: 80,
            nudge_distance: 3.0,
            optimize: true,
        }
    }
}

impl PackingConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.min_image_size > 0.0,
            "min image size must be positive, got {}",
            self.min_image_size
        );
        ensure!(
            self.min_image_size <= self.max_image_size,
            "min image size ({}) exceeds max image size ({})",
            self.min_image_size,
            self.max_image_size
        );
        ensure!(
            self.min_spacing >= 0.0,
            "min spacing cannot be negative, got {}",
            self.min_spacing
        );
        let (large, medium) = self.tier_fractions;
        ensure!(
            large >= 0.0 && medium >= 0.0 && large + medium <= 1.0,
            "tier fractions must be non-negative and sum to at most 1, got ({large}, {medium})"
        );
        ensure!(
            self.tier_multipliers.iter().all(|m| *m > 0.0),
            "tier multipliers must be positive, got {:?}",
            self.tier_multipliers
        );
        ensure!(
            self.fallback_aspect_ratios.iter().all(|a| *a > 0.0),
            "fallback aspect ratios must be positive, got {:?}",
            self.fallback_aspect_ratios
        );
        ensure!(
            self.shrink_factor > 0.0 && self.shrink_factor < 1.0,
            "shrink factor must lie in (0, 1), got {}",
            self.shrink_factor
        );
        ensure!(self.attempt_budget > 0, "attempt budget must be at least 1");
        ensure!(
            self.nudge_distance >= 0.0,
            "nudge distance cannot be negative, got {}",
            self.nudge_distance
        );
        Ok(())
    }

    /// Constraints every placed rectangle has to satisfy
    pub fn validity(&self) -> ValidityConfig {
        ValidityConfig {
            min_spacing: self.min_spacing,
            min_area: self.min_image_size.powi(2) / 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = CollageConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.packing.validity().min_area, 1250.0);
    }

    #[test]
    fn rejects_inverted_size_bounds() {
        let mut config = CollageConfig::default();
        config.packing.min_image_size = 200.0;
        assert!(config.validate().is_err());

        let mut config = CollageConfig::default();
        config.packing.shrink_factor = 1.0;
        assert!(config.validate().is_err());

        let mut config = CollageConfig::default();
        config.analysis.grid_step = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let json = r#"{
            "prng_seed": 7,
            "packing": { "min_image_size": 40.0, "optimize": false }
        }"#;
        let config: CollageConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.prng_seed, Some(7));
        assert_eq!(config.packing.min_image_size, 40.0);
        assert!(!config.packing.optimize);
        assert_eq!(config.packing.max_image_size, 150.0);
        assert_eq!(config.extraction, ExtractionConfig::default());
    }
}
