pub mod geo_traits;
pub mod primitives;

mod shape;

#[doc(inline)]
pub use shape::Shape;
