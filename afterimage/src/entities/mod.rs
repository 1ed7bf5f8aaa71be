mod image_ref;
mod layout;
mod placed_rect;
mod rect_spec;

#[doc(inline)]
pub use image_ref::ImageRef;
#[doc(inline)]
pub use layout::Layout;
#[doc(inline)]
pub use placed_rect::PlacedRect;
#[doc(inline)]
pub use rect_spec::{RectSpec, SizeTier};
