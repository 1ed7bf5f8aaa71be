use itertools::Itertools;
use log::error;

use crate::entities::{Layout, PlacedRect};
use crate::geometry::Shape;
use crate::geometry::geo_traits::{CollidesWith, DistanceTo};
use crate::util::FPA;
//Various checks to verify correctness of the state of the system
//Used in debug_assertion!() blocks and tests

/// Every probe point (corners, edge midpoints, center) of every rectangle lies inside the shape
pub fn rects_are_contained(shape: &Shape, rects: &[PlacedRect]) -> bool {
    rects.iter().enumerate().all(|(i, p)| {
        let contained = shape.contains_rect(&p.bbox);
        if !contained {
            error!("placed rect #{i} {:?} is not contained by the shape", p.bbox);
        }
        contained
    })
}

/// No two rectangles overlap
pub fn rects_are_disjoint(rects: &[PlacedRect]) -> bool {
    rects
        .iter()
        .enumerate()
        .tuple_combinations()
        .all(|((i, a), (j, b))| {
            let overlap = a.bbox.collides_with(&b.bbox);
            if overlap {
                error!("placed rects #{i} and #{j} overlap");
            }
            !overlap
        })
}

/// All pairs of rectangles are at least `min_spacing` apart
pub fn rects_are_spaced(rects: &[PlacedRect], min_spacing: f32) -> bool {
    rects
        .iter()
        .enumerate()
        .tuple_combinations()
        .all(|((i, a), (j, b))| {
            let distance = a.bbox.distance_to(&b.bbox);
            let spaced = FPA(distance) >= FPA(min_spacing);
            if !spaced {
                error!("placed rects #{i} and #{j} are {distance} apart (min: {min_spacing})");
            }
            spaced
        })
}

/// The dimensions of every rectangle match the aspect ratio it was requested with,
/// and that of its assigned image.
pub fn aspect_ratios_are_preserved(rects: &[PlacedRect]) -> bool {
    rects.iter().all(|p| {
        let ratio = FPA(p.width() / p.height());
        let requested = ratio == FPA(p.aspect_ratio);
        let native = p.image.is_none_or(|img| ratio == FPA(img.aspect_ratio()));
        requested && native
    })
}

pub fn layout_is_valid(layout: &Layout) -> bool {
    let placed = layout.placed();
    rects_are_contained(layout.shape(), placed)
        && rects_are_disjoint(placed)
        && rects_are_spaced(placed, layout.config.min_spacing)
        && aspect_ratios_are_preserved(placed)
}
