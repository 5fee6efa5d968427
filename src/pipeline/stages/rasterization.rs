//! Rasterization stage.
//!
//! Every visible triangle is scan-converted independently: each pixel center inside its
//! screen-clipped bounding box is tested against the triangle's edges, and covered pixels yield
//! a candidate fragment with interpolated depth, color, normal and object-space position.
//! Candidates are submitted to the fragment buffer, which keeps the nearest one per pixel.
//!
//! Pixel centers lying exactly on an edge follow the top-left rule, so two triangles sharing
//! an edge never both cover, nor both miss, a pixel on it.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::framebuffer::{Fragment, FragmentBuffer};
use crate::geometry::Dimensions;
use crate::interpolate::Interpolation;
use crate::parallel::Grid;
use crate::primitive::Triangle;

/// Scan-converts one triangle, calling `emit` with the pixel index and candidate fragment
/// for every covered pixel. Returns the number of fragments emitted.
pub fn rasterize_triangle<F>(triangle: &Triangle,
                             primitive: u32,
                             dimensions: Dimensions,
                             interpolation: Interpolation,
                             mut emit: F) -> usize where F: FnMut(usize, &Fragment) {
    let setup = match triangle.setup(dimensions) {
        Some(setup) => setup,
        None => return 0,
    };

    let mut emitted = 0;

    let mut pixel = setup.min;

    while pixel.y <= setup.max.y {
        pixel.x = setup.min.x;

        while pixel.x <= setup.max.x {
            if let Some(fragment) = setup.sample(pixel, primitive, interpolation) {
                emit(pixel.into_index(dimensions), &fragment);

                emitted += 1;
            }

            pixel.x += 1;
        }

        pixel.y += 1;
    }

    emitted
}

/// Runs rasterization for all triangles, returning the number of fragments submitted.
///
/// Triangles are identified by their index, which breaks depth ties.
pub fn run(grid: &mut Grid, triangles: &[Triangle], fragments: &dyn FragmentBuffer, interpolation: Interpolation) -> usize {
    let dimensions = fragments.dimensions();

    let submitted = AtomicUsize::new(0);

    grid.launch(triangles.len(), |i| {
        let emitted = rasterize_triangle(&triangles[i], i as u32, dimensions, interpolation, |index, fragment| {
            fragments.submit(index, fragment);
        });

        if emitted > 0 {
            submitted.fetch_add(emitted, Ordering::Relaxed);
        }
    });

    submitted.into_inner()
}
