//! Vertex stage.
//!
//! The vertex stage transforms every object-space vertex position into screen-space: it applies the
//! model-view-projection transform, performs the perspective divide, then maps normalized device
//! coordinates onto the pixel grid. This assumes a viewport in the shape of:
//!
//! ```text
//! 0,0-----------------x
//!  |                  |
//!  |                  |
//!  |                  |
//!  |                  |
//!  |                  |
//!  y-----------------x,y
//! ```
//!
//! where the y-axis is flipped, and depth is remapped from `[-1, 1]` to `[0, 1]`.

use nalgebra::{Matrix4, Point3};

use crate::geometry::{Dimensions, ScreenVertex};
use crate::parallel::Grid;

/// Clip-space `w` at or below which a vertex counts as behind the eye
pub const MIN_W: f32 = 1e-6;

/// Projects a single object-space position to screen-space
#[inline]
pub fn project(position: &Point3<f32>, mvp: &Matrix4<f32>, dimensions: Dimensions) -> ScreenVertex {
    let clip = mvp * position.to_homogeneous();

    if !(clip.w > MIN_W) {
        return ScreenVertex::invalid();
    }

    let inv_w = 1.0 / clip.w;

    let (width, height) = (dimensions.width as f32, dimensions.height as f32);

    ScreenVertex::new(Point3::new((1.0 + clip.x * inv_w) * width * 0.5,
                                  // Vertical is flipped
                                  (1.0 - clip.y * inv_w) * height * 0.5,
                                  (1.0 + clip.z * inv_w) * 0.5),
                      inv_w)
}

/// Runs the vertex stage, writing one screen-space vertex per input position.
pub fn run(grid: &mut Grid, positions: &[Point3<f32>], mvp: &Matrix4<f32>, dimensions: Dimensions, output: &mut [ScreenVertex]) {
    debug_assert_eq!(positions.len(), output.len());

    grid.map(output, |i, vertex| {
        *vertex = project(&positions[i], mvp, dimensions);
    });
}
