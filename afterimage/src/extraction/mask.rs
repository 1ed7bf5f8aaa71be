use anyhow::{Result, ensure};
use ndarray::{Array2, ArrayView2, s};

/// Per-pixel opacity (0–255) of a segmented camera frame, indexed as `[[y, x]]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Mask {
    alpha: Array2<u8>,
}

impl Mask {
    /// Creates a mask from a row-major buffer of `width * height` alpha values.
    pub fn new(width: usize, height: usize, alpha: Vec<u8>) -> Result<Self> {
        ensure!(
            alpha.len() == width * height,
            "mask buffer holds {} values, expected {width}x{height}",
            alpha.len()
        );
        let alpha = Array2::from_shape_vec((height, width), alpha)?;
        Ok(Mask { alpha })
    }

    /// Creates a mask by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> u8) -> Self {
        let alpha = Array2::from_shape_fn((height, width), |(y, x)| f(x, y));
        Mask { alpha }
    }

    pub fn width(&self) -> usize {
        self.alpha.ncols()
    }

    pub fn height(&self) -> usize {
        self.alpha.nrows()
    }

    /// A mask without pixels carries no shape
    pub fn is_empty(&self) -> bool {
        self.alpha.is_empty()
    }

    #[inline(always)]
    pub fn alpha(&self, x: usize, y: usize) -> u8 {
        self.alpha[[y, x]]
    }

    pub fn view(&self) -> ArrayView2<'_, u8> {
        self.alpha.view()
    }

    /// Copy of the mask surrounded by a transparent border of `pad` pixels on every side.
    /// Pixel `(x, y)` of `self` becomes pixel `(x + pad, y + pad)` of the copy.
    pub fn padded(&self, pad: usize) -> Mask {
        let (height, width) = self.alpha.dim();
        let mut alpha = Array2::zeros((height + 2 * pad, width + 2 * pad));
        alpha
            .slice_mut(s![pad..pad + height, pad..pad + width])
            .assign(&self.alpha);
        Mask { alpha }
    }
}

impl From<Array2<u8>> for Mask {
    fn from(alpha: Array2<u8>) -> Self {
        Mask { alpha }
    }
}
