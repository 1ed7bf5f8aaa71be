use ndarray::Array2;

use crate::extraction::Mask;

/// Marks every pixel whose alpha gradient magnitude exceeds `threshold`.
///
/// The gradient is obtained by applying the horizontal and vertical 3×3 Sobel kernels
/// and combining both responses as a Euclidean magnitude.
/// Pixels on the border of the mask are never marked.
pub fn detect_edges(mask: &Mask, threshold: f32) -> Array2<bool> {
    let (width, height) = (mask.width(), mask.height());
    let mut edges = Array2::from_elem((height, width), false);
    if width < 3 || height < 3 {
        return edges;
    }

    let a = mask.view();
    let px = |x: usize, y: usize| a[[y, x]] as f32;
    let sq_threshold = threshold * threshold;

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let g_x = (px(x + 1, y - 1) + 2.0 * px(x + 1, y) + px(x + 1, y + 1))
                - (px(x - 1, y - 1) + 2.0 * px(x - 1, y) + px(x - 1, y + 1));
            let g_y = (px(x - 1, y + 1) + 2.0 * px(x, y + 1) + px(x + 1, y + 1))
                - (px(x - 1, y - 1) + 2.0 * px(x, y - 1) + px(x + 1, y - 1));
            edges[[y, x]] = g_x * g_x + g_y * g_y > sq_threshold;
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_edge_is_marked_on_both_sides() {
        //left half transparent, right half opaque
        let mask = Mask::from_fn(10, 6, |x, _| if x >= 5 { 255 } else { 0 });
        let edges = detect_edges(&mask, 500.0);
        for y in 1..5 {
            assert!(edges[[y, 4]] && edges[[y, 5]]);
            assert!(!edges[[y, 3]] && !edges[[y, 6]]);
        }
        //border rows are never marked
        assert!(!edges[[0, 4]] && !edges[[5, 5]]);
    }

    #[test]
    fn soft_gradients_stay_below_threshold() {
        let mask = Mask::from_fn(10, 10, |x, _| (x * 20) as u8);
        let edges = detect_edges(&mask, 500.0);
        assert!(edges.iter().all(|e| !e));
    }

    #[test]
    fn tiny_masks_have_no_edges() {
        let mask = Mask::from_fn(2, 100, |_, _| 255);
        assert!(detect_edges(&mask, 500.0).iter().all(|e| !e));
    }
}
