use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

///Configuration of the contour extraction
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ExtractionConfig {
    ///Minimum Sobel gradient magnitude of the alpha channel for a pixel to be considered an edge
    pub edge_threshold: f32,
    ///Edge components with this many pixels or fewer are discarded
    pub min_component_size: usize,
    ///Number of neighbours on each side averaged during smoothing
    pub smoothing_radius: usize,
    ///Contours with fewer points are discarded
    pub min_contour_len: usize,
    ///Contours shorter than this fraction of the longest contour are discarded
    pub min_relative_len: f32,
    ///Maximum number of contours retained
    pub max_contours: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            edge_threshold: 500.0,
            min_component_size: 10,
            smoothing_radius: 3,
            min_contour_len: 50,
            min_relative_len: 0.3,
            max_contours: 2,
        }
    }
}

impl ExtractionConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.edge_threshold > 0.0,
            "edge threshold must be positive, got {}",
            self.edge_threshold
        );
        ensure!(
            self.min_contour_len >= 3,
            "contours need at least 3 points, got min_contour_len {}",
            self.min_contour_len
        );
        ensure!(
            (0.0..=1.0).contains(&self.min_relative_len),
            "min_relative_len must be a fraction in [0, 1], got {}",
            self.min_relative_len
        );
        ensure!(self.max_contours > 0, "max_contours must be at least 1");
        Ok(())
    }
}

///Configuration of the interior analysis of a shape
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct AnalysisConfig {
    ///Spacing of the sampling grid laid over the bounding box of the shape
    pub grid_step: f32,
    ///Step size while marching outward from a sample to estimate its clearance
    pub ray_step: f32,
    ///Rays stop marching after this distance, upper bound of the clearance estimate
    pub max_ray_distance: f32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            grid_step: 8.0,
            ray_step: 2.0,
            max_ray_distance: 100.0,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.grid_step > 0.0,
            "grid step must be positive, got {}",
            self.grid_step
        );
        ensure!(
            self.ray_step > 0.0,
            "ray step must be positive, got {}",
            self.ray_step
        );
        ensure!(
            self.max_ray_distance >= self.ray_step,
            "max ray distance ({}) must be at least one ray step ({})",
            self.max_ray_distance,
            self.ray_step
        );
        Ok(())
    }
}

///Constraints a rectangle must satisfy to be placed in a layout
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ValidityConfig {
    ///Minimum edge-to-edge (or corner-to-corner) distance between two placed rectangles
    pub min_spacing: f32,
    ///Rectangles with a smaller area are rejected
    pub min_area: f32,
}

impl ValidityConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.min_spacing >= 0.0,
            "min spacing cannot be negative, got {}",
            self.min_spacing
        );
        ensure!(
            self.min_area >= 0.0,
            "min area cannot be negative, got {}",
            self.min_area
        );
        Ok(())
    }
}
