use crate::entities::PlacedRect;
use crate::geometry::primitives::Contour;
use crate::io::ext_repr::{ExtContour, ExtPlacedRect};

pub fn export_placed_rect(p_rect: &PlacedRect) -> ExtPlacedRect {
    let center = p_rect.center();
    ExtPlacedRect {
        x: p_rect.x(),
        y: p_rect.y(),
        width: p_rect.width(),
        height: p_rect.height(),
        center_x: center.x(),
        center_y: center.y(),
        aspect_ratio: p_rect.aspect_ratio,
        image_id: p_rect.image.map(|img| img.id),
    }
}

pub fn export_contour(contour: &Contour) -> ExtContour {
    ExtContour {
        points: contour.points().iter().map(|&p| p.into()).collect(),
    }
}
