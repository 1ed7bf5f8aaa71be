mod edges;
mod mask;
mod trace;

#[doc(inline)]
pub use edges::detect_edges;
#[doc(inline)]
pub use mask::Mask;
#[doc(inline)]
pub use trace::{EdgeComponent, label_components, trace_border};

use std::cmp::Reverse;
use std::time::Instant;

use itertools::Itertools;
use log::{debug, info};

use crate::geometry::Shape;
use crate::geometry::primitives::{Contour, Point};
use crate::util::ExtractionConfig;

/// Converts an alpha mask into a small set of smoothed polygon outlines.
///
/// Pipeline: gradient edge detection, 4-connected component grouping, border ordering,
/// length filtering and finally smoothing of the retained outlines.
#[derive(Clone, Debug)]
pub struct ContourExtractor {
    pub config: ExtractionConfig,
}

impl ContourExtractor {
    pub fn new(config: ExtractionConfig) -> Self {
        config.validate().expect("invalid extraction config");
        Self { config }
    }

    /// Extracts the outlines of the mask, longest first.
    /// A missing, zero-sized or edgeless mask yields no contours.
    pub fn extract(&self, mask: Option<&Mask>) -> Vec<Contour> {
        let Some(mask) = mask.filter(|m| !m.is_empty()) else {
            debug!("[EXTRACT] no mask available");
            return vec![];
        };
        let start = Instant::now();
        let config = &self.config;

        //a transparent frame closes the outlines of silhouettes cut off by the border of the image
        let framed = mask.padded(1);
        let edges = detect_edges(&framed, config.edge_threshold);
        let (labels, components) = label_components(&edges);

        let candidates = components
            .iter()
            .filter(|c| c.size > config.min_component_size)
            .map(|c| {
                trace_border(&labels, c)
                    .into_iter()
                    .map(|p| p.translate((-1.0, -1.0)))
                    .collect_vec()
            })
            .collect_vec();

        let n_candidates = candidates.len();
        let contours = filter_outlines(candidates, config)
            .into_iter()
            .map(|outline| Contour::new(smooth(&outline, config.smoothing_radius)))
            .collect_vec();
        for (i, contour) in contours.iter().enumerate() {
            debug!(
                "[EXTRACT] contour #{i}: {} points, area {:.0}px², bbox {:?}",
                contour.number_of_points(),
                contour.area(),
                contour.bbox()
            );
        }

        info!(
            "[EXTRACT] {}x{} mask: {} edge components, {} candidates, {} contours retained ({:.3}ms)",
            mask.width(),
            mask.height(),
            components.len(),
            n_candidates,
            contours.len(),
            start.elapsed().as_secs_f64() * 1000.0
        );
        contours
    }

    /// Extracts the contours of the mask and bundles them into a [`Shape`].
    pub fn extract_shape(&self, mask: Option<&Mask>) -> Shape {
        Shape::new(self.extract(mask))
    }
}

/// Keeps only the dominant outlines: sorted by length (descending), outlines shorter than the
/// absolute minimum or than a fraction of the longest one are dropped, and at most
/// `max_contours` survive. Segmentation noise produces many short spurious outlines.
fn filter_outlines(mut outlines: Vec<Vec<Point>>, config: &ExtractionConfig) -> Vec<Vec<Point>> {
    outlines.sort_by_key(|o| Reverse(o.len()));

    let longest = match outlines.first() {
        Some(o) if o.len() >= config.min_contour_len => o.len(),
        _ => return vec![],
    };
    let min_len = usize::max(
        config.min_contour_len,
        (config.min_relative_len * longest as f32).ceil() as usize,
    );

    outlines
        .into_iter()
        .take_while(|o| o.len() >= min_len)
        .take(config.max_contours)
        .collect()
}

/// Replaces every point by the centroid of the `2 * radius + 1` points centered around it,
/// wrapping around the closed outline.
fn smooth(points: &[Point], radius: usize) -> Vec<Point> {
    let n = points.len();
    let window = 2 * radius + 1;
    if radius == 0 || n < window {
        return points.to_vec();
    }
    (0..n)
        .map(|i| {
            let neighbourhood = (0..window).map(|k| points[(i + n + k - radius) % n]);
            Point::centroid_of(neighbourhood).expect("window is not empty")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rectangle_mask(x: usize, y: usize, w: usize, h: usize) -> Mask {
        Mask::from_fn(640, 480, |p_x, p_y| {
            let inside = (x..x + w).contains(&p_x) && (y..y + h).contains(&p_y);
            if inside { 255 } else { 0 }
        })
    }

    #[test]
    fn missing_or_empty_masks_yield_nothing() {
        let extractor = ContourExtractor::new(ExtractionConfig::default());
        assert!(extractor.extract(None).is_empty());
        let empty = Mask::new(0, 0, vec![]).unwrap();
        assert!(extractor.extract(Some(&empty)).is_empty());
        let blank = Mask::from_fn(64, 64, |_, _| 0);
        assert!(extractor.extract(Some(&blank)).is_empty());
    }

    #[test]
    fn filled_rectangle_yields_one_dominant_contour() {
        let extractor = ContourExtractor::new(ExtractionConfig::default());
        let mask = rectangle_mask(220, 40, 200, 400);
        let contours = extractor.extract(Some(&mask));

        assert_eq!(contours.len(), 1);
        let contour = &contours[0];
        assert!(contour.number_of_points() > 50);

        let bbox = contour.bbox();
        assert!((bbox.x_min - 220.0).abs() <= 3.0, "{bbox:?}");
        assert!((bbox.y_min - 40.0).abs() <= 3.0, "{bbox:?}");
        assert!((bbox.width() - 200.0).abs() <= 6.0, "{bbox:?}");
        assert!((bbox.height() - 400.0).abs() <= 6.0, "{bbox:?}");
    }

    #[test]
    fn silhouette_cut_off_by_the_frame_is_closed() {
        let extractor = ContourExtractor::new(ExtractionConfig::default());
        //torso running off the bottom and the left of the frame
        let mask = Mask::from_fn(320, 240, |x, y| {
            if x < 200 && y >= 60 { 255 } else { 0 }
        });
        let contours = extractor.extract(Some(&mask));
        assert_eq!(contours.len(), 1);

        let bbox = contours[0].bbox();
        assert!(bbox.x_min <= 3.0 && bbox.y_max >= 236.0, "{bbox:?}");
        //the outline encloses the body instead of tracing a thin strip around its edge
        assert!(contours[0].area() > 0.9 * 200.0 * 180.0);
        let shape = Shape::new(contours);
        assert!(shape.contains(&Point(100.0, 150.0)));
    }

    #[test]
    #[should_panic(expected = "invalid extraction config")]
    fn rejects_invalid_config() {
        ContourExtractor::new(ExtractionConfig {
            min_component_size: 0,
            min_contour_len: 0,
            ..ExtractionConfig::default()
        });
    }

    #[test]
    fn small_blobs_are_filtered_out() {
        let extractor = ContourExtractor::new(ExtractionConfig::default());
        //a large body and a speck of segmentation noise
        let mask = Mask::from_fn(320, 240, |x, y| {
            let body = (60..260).contains(&x) && (40..200).contains(&y);
            let speck = (10..14).contains(&x) && (10..14).contains(&y);
            if body || speck { 255 } else { 0 }
        });
        let contours = extractor.extract(Some(&mask));
        assert_eq!(contours.len(), 1);
        assert!(contours[0].bbox().x_min > 50.0);
    }

    #[test]
    fn retains_a_secondary_outline() {
        let extractor = ContourExtractor::new(ExtractionConfig::default());
        //two bodies of comparable size, and a third far smaller one
        let mask = Mask::from_fn(400, 200, |x, y| {
            let a = (20..140).contains(&x) && (20..180).contains(&y);
            let b = (200..300).contains(&x) && (30..170).contains(&y);
            let c = (340..360).contains(&x) && (90..110).contains(&y);
            if a || b || c { 255 } else { 0 }
        });
        let contours = extractor.extract(Some(&mask));
        assert_eq!(contours.len(), 2);
        assert!(contours[0].number_of_points() >= contours[1].number_of_points());
        assert!(contours[1].bbox().x_min > 190.0);
    }

    #[test]
    fn filtering_respects_thresholds() {
        let config = ExtractionConfig::default();
        let outline = |len: usize| vec![Point(0.0, 0.0); len];
        let kept = filter_outlines(
            vec![outline(60), outline(400), outline(130), outline(110)],
            &config,
        );
        //110 and 60 fall below 0.3 * 400, at most two are retained anyway
        assert_eq!(kept.iter().map(|o| o.len()).collect_vec(), vec![400, 130]);

        assert!(filter_outlines(vec![outline(49)], &config).is_empty());
    }

    #[test]
    fn smoothing_averages_neighbours() {
        let points = (0..10).map(|i| Point(i as f32, 0.0)).collect_vec();
        let smoothed = smooth(&points, 1);
        assert_eq!(smoothed.len(), 10);
        assert_eq!(smoothed[5], Point(5.0, 0.0));
        //wraps around the closed outline
        assert_eq!(smoothed[0], Point(10.0 / 3.0, 0.0));
        //too few points to smooth
        assert_eq!(smooth(&points[..3], 3), points[..3].to_vec());
    }
}
