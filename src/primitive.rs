//! Assembled triangles and their per-pixel coverage

use nalgebra::{Point3, Vector3};

use crate::color::Color;
use crate::framebuffer::Fragment;
use crate::geometry::{Coordinate, Dimensions, FaceWinding, ScreenVertex};
use crate::interpolate::{Interpolate, Interpolation};

/// Doubled screen-space area (in square pixels) at or below which a triangle is considered degenerate
pub const DEGENERATE_AREA: f32 = 1e-6;

/// One corner of an assembled triangle.
///
/// The object-space `position` is kept alongside the `transformed` screen-space position,
/// since rasterization needs the latter while shading needs the original surface point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corner {
    pub position: Point3<f32>,
    pub transformed: ScreenVertex,
    pub color: Color,
    pub normal: Vector3<f32>,
}

impl Corner {
    #[inline]
    pub fn new(position: Point3<f32>, transformed: ScreenVertex, color: Color, normal: Vector3<f32>) -> Corner {
        Corner { position, transformed, color, normal }
    }
}

impl Default for Corner {
    fn default() -> Corner {
        Corner::new(Point3::origin(), ScreenVertex::invalid(), Color::zeros(), Vector3::zeros())
    }
}

/// Outcome of primitive assembly for a single triangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriangleState {
    /// Will be rasterized
    Visible,
    /// Zero area on screen, or a corner could not be projected
    Degenerate,
    /// Removed by face culling
    Culled,
}

/// A self-contained triangle record produced by primitive assembly
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub corners: [Corner; 3],
    pub state: TriangleState,
}

impl Default for Triangle {
    fn default() -> Triangle {
        Triangle { corners: [Corner::default(); 3], state: TriangleState::Degenerate }
    }
}

#[inline(always)]
fn edge_from(a: &Point3<f32>, b: &Point3<f32>, x: f32, y: f32) -> f32 {
    (b.x - a.x) * (y - a.y) - (b.y - a.y) * (x - a.x)
}

/// Edge function of `(x, y)` against the directed edge `a -> b`.
///
/// Always evaluated from the lexicographically smaller endpoint, so the reversed edge of a
/// neighbouring triangle yields exactly the negated value and both agree on which side of
/// their shared edge every pixel center lies.
#[inline(always)]
fn edge(a: &Point3<f32>, b: &Point3<f32>, x: f32, y: f32) -> f32 {
    if (a.x, a.y) <= (b.x, b.y) {
        edge_from(a, b, x, y)
    } else {
        -edge_from(b, a, x, y)
    }
}

/// Top-left rule for pixel centers lying exactly on an edge.
///
/// With the triangle oriented so its area is positive (clockwise on screen),
/// top edges run in +x and left edges run in -y.
#[inline(always)]
fn owns_edge(from: &Point3<f32>, to: &Point3<f32>) -> bool {
    let dx = to.x - from.x;
    let dy = to.y - from.y;

    dy < 0.0 || (dy == 0.0 && dx > 0.0)
}

impl Triangle {
    /// Gathers three corners into a triangle and classifies it.
    pub fn assemble(corners: [Corner; 3], cull_faces: Option<FaceWinding>) -> Triangle {
        let mut triangle = Triangle { corners, state: TriangleState::Visible };

        if !corners.iter().all(|corner| corner.transformed.valid) {
            triangle.state = TriangleState::Degenerate;
        } else {
            let area = triangle.signed_area();

            if !(area.abs() > DEGENERATE_AREA) {
                triangle.state = TriangleState::Degenerate;
            } else if cull_faces == Some(FaceWinding::from_signed_area(area)) {
                triangle.state = TriangleState::Culled;
            }
        }

        triangle
    }

    /// Doubled signed screen-space area. Positive for triangles that are clockwise on screen.
    #[inline]
    pub fn signed_area(&self) -> f32 {
        let [ref a, ref b, ref c] = self.corners;
        let c = c.transformed.position;

        edge(&a.transformed.position, &b.transformed.position, c.x, c.y)
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.state == TriangleState::Visible
    }

    /// Prepares a visible triangle for scan conversion within the given dimensions.
    ///
    /// Returns `None` for triangles that are not visible or that cannot touch any pixel center.
    pub fn setup(&self, dimensions: Dimensions) -> Option<TriangleSetup> {
        if !self.is_visible() {
            return None;
        }

        let area = self.signed_area();

        let order = if area < 0.0 { [0, 2, 1] } else { [0, 1, 2] };

        let p0 = self.corners[order[0]].transformed.position;
        let p1 = self.corners[order[1]].transformed.position;
        let p2 = self.corners[order[2]].transformed.position;

        // Pixel centers sit at +0.5, so pixel `i` is a candidate iff `lo <= i + 0.5 <= hi`
        let span = |lo: f32, hi: f32, limit: u32| -> Option<(u32, u32)> {
            let first = (lo - 0.5).ceil().max(0.0);
            let last = (hi - 0.5).floor().min(limit as f32 - 1.0);

            if first > last { None } else { Some((first as u32, last as u32)) }
        };

        let (min_x, max_x) = span(p0.x.min(p1.x).min(p2.x), p0.x.max(p1.x).max(p2.x), dimensions.width)?;
        let (min_y, max_y) = span(p0.y.min(p1.y).min(p2.y), p0.y.max(p1.y).max(p2.y), dimensions.height)?;

        Some(TriangleSetup {
            triangle: self,
            order,
            area: area.abs(),
            owns: [owns_edge(&p1, &p2), owns_edge(&p2, &p0), owns_edge(&p0, &p1)],
            min: Coordinate::new(min_x, min_y),
            max: Coordinate::new(max_x, max_y),
        })
    }
}

/// Per-triangle constants for scan conversion
#[derive(Debug, Clone, Copy)]
pub struct TriangleSetup<'t> {
    triangle: &'t Triangle,
    order: [usize; 3],
    area: f32,
    owns: [bool; 3],
    /// Upper left corner of the screen-clipped bounding box, inclusive
    pub min: Coordinate,
    /// Lower right corner of the screen-clipped bounding box, inclusive
    pub max: Coordinate,
}

impl<'t> TriangleSetup<'t> {
    /// Barycentric weights of the pixel center, in corner order, if the pixel is covered.
    pub fn coverage(&self, pixel: Coordinate) -> Option<(f32, f32, f32)> {
        let (x, y) = pixel.center();

        let [i0, i1, i2] = self.order;

        let corners = &self.triangle.corners;

        let p0 = &corners[i0].transformed.position;
        let p1 = &corners[i1].transformed.position;
        let p2 = &corners[i2].transformed.position;

        let e0 = edge(p1, p2, x, y);
        let e1 = edge(p2, p0, x, y);
        let e2 = edge(p0, p1, x, y);

        let inside = |e: f32, owned: bool| e > 0.0 || (e == 0.0 && owned);

        if !(inside(e0, self.owns[0]) && inside(e1, self.owns[1]) && inside(e2, self.owns[2])) {
            return None;
        }

        let mut weights = [0.0; 3];

        weights[i0] = e0 / self.area;
        weights[i1] = e1 / self.area;
        weights[i2] = e2 / self.area;

        Some((weights[0], weights[1], weights[2]))
    }

    /// Produces the candidate fragment for a pixel, if the pixel is covered and the
    /// interpolated depth lies between the near and far planes.
    pub fn sample(&self, pixel: Coordinate, primitive: u32, interpolation: Interpolation) -> Option<Fragment> {
        let (u, v, w) = self.coverage(pixel)?;

        let [ref a, ref b, ref c] = self.triangle.corners;

        // Depth is affine in screen-space, so it always uses the screen weights
        let depth = Interpolate::barycentric_interpolate(u, &a.transformed.position.z,
                                                         v, &b.transformed.position.z,
                                                         w, &c.transformed.position.z);

        if !(depth >= 0.0 && depth <= 1.0) {
            return None;
        }

        let (u, v, w) = interpolation.weights((u, v, w), (a.transformed.inv_w,
                                                          b.transformed.inv_w,
                                                          c.transformed.inv_w));

        Some(Fragment {
            color: Interpolate::barycentric_interpolate(u, &a.color, v, &b.color, w, &c.color),
            normal: Interpolate::barycentric_interpolate(u, &a.normal, v, &b.normal, w, &c.normal),
            position: Interpolate::barycentric_interpolate(u, &a.position, v, &b.position, w, &c.position),
            depth,
            primitive,
        })
    }
}
