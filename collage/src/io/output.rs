use std::path::PathBuf;

use afterimage::io::ext_repr::{ExtContour, ExtPlacedRect};
use serde::{Deserialize, Serialize};

use crate::config::CollageConfig;

/// An image of the pool as read from disk
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtPoolImage {
    pub id: usize,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CollageOutput {
    pub mask: PathBuf,
    pub target_count: usize,
    pub images: Vec<ExtPoolImage>,
    pub contours: Vec<ExtContour>,
    pub placed: Vec<ExtPlacedRect>,
    /// Fraction of the estimated shape area covered by the placed rectangles
    pub utilization: f32,
    pub run_time_ms: u64,
    pub config: CollageConfig,
}
