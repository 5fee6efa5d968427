use nalgebra::Point3;

/// A vertex position after projection, the perspective divide and the viewport mapping.
///
/// `position.x` and `position.y` are in pixels with the y-axis flipped so the origin
/// is the upper left corner, `position.z` is the normalized depth in `[0, 1]` for
/// anything between the near and far planes, and `inv_w` is the reciprocal of the
/// clip-space `w`, kept for perspective-correct interpolation.
///
/// Vertices at or behind the eye cannot be divided through; they are flagged invalid
/// instead, and every triangle using them is skipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenVertex {
    pub position: Point3<f32>,
    pub inv_w: f32,
    pub valid: bool,
}

impl ScreenVertex {
    #[inline]
    pub fn new(position: Point3<f32>, inv_w: f32) -> ScreenVertex {
        ScreenVertex { position, inv_w, valid: position.coords.iter().all(|c| c.is_finite()) && inv_w.is_finite() }
    }

    /// A vertex that failed the perspective divide
    #[inline]
    pub fn invalid() -> ScreenVertex {
        ScreenVertex { position: Point3::origin(), inv_w: 0.0, valid: false }
    }

    /// Screen-space vertex that was never projected, with `w = 1`.
    ///
    /// Useful for feeding pixel-space geometry straight into rasterization.
    #[inline]
    pub fn screen(x: f32, y: f32, depth: f32) -> ScreenVertex {
        ScreenVertex::new(Point3::new(x, y, depth), 1.0)
    }
}

impl Default for ScreenVertex {
    fn default() -> ScreenVertex { ScreenVertex::invalid() }
}
