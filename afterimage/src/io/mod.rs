/// Serializable representations of the results of this library
pub mod ext_repr;

mod export;
/// Drawing shapes and layouts as SVG documents
pub mod svg;

#[doc(inline)]
pub use export::{export_contour, export_placed_rect};
