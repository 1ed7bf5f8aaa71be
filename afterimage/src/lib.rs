//! Geometric core of the silhouette collage: turns an alpha mask into clean outlines,
//! analyses their interior and validates rectangle placements inside them.

/// Converting segmentation masks into polygon outlines
pub mod extraction;

/// Interior sampling and clearance estimation of a [`Shape`](geometry::Shape)
pub mod analysis;

/// Entities to model a placement problem: images, rectangle requests, placed rectangles and layouts
pub mod entities;

/// Geometric primitives and base algorithms
pub mod geometry;

/// Exporting layouts out of this library
pub mod io;

/// Helper functions which do not belong to any specific module
pub mod util;
