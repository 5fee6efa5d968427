//! Per-frame geometry buffers

use std::fmt::{Debug, Formatter, Result as FmtResult};

use nalgebra::{Point3, Vector3};

use crate::color::Color;
use crate::error::{RenderError, RenderResult};

/// A single vertex with its attributes, all in object-space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<f32>,
    /// Channel intensities in `[0, 1]`
    pub color: Color,
    /// Not required to be unit length
    pub normal: Vector3<f32>,
}

impl Vertex {
    #[inline]
    pub fn new(position: Point3<f32>, color: Color, normal: Vector3<f32>) -> Vertex {
        Vertex { position, color, normal }
    }
}

/// Immutable geometry for one frame: parallel vertex attribute arrays and triangle index triples.
///
/// Vertices are shared between triangles through the index list. For example (in 2D), for a rectangle
/// made of two triangles, you would define the four corner vertices:
///
/// ```text
/// vertex #: name         = (x,   y)
/// 0:        bottom_left  = (0.0, 0.0)
/// 1:        top_left     = (0.0, 1.0)
/// 2:        bottom_right = (1.0, 0.0)
/// 3:        top_right    = (1.0, 1.0)
/// ```
///
/// then you'd have your index list be something like:
///
/// ```text
/// [[0, 1, 2], // bottom half triangle
///  [1, 3, 2]] // top half triangle
/// ```
#[derive(Clone)]
pub struct Mesh {
    positions: Vec<Point3<f32>>,
    colors: Vec<Color>,
    normals: Vec<Vector3<f32>>,
    indices: Vec<[u32; 3]>,
}

fn triples(name: &'static str, data: &[f32]) -> RenderResult<Vec<Vector3<f32>>> {
    if data.len() % 3 != 0 {
        return Err(RenderError::RaggedArray { name, len: data.len() });
    }

    Ok(data.chunks_exact(3).map(|c| Vector3::new(c[0], c[1], c[2])).collect())
}

impl Mesh {
    /// Builds the geometry buffers from flat arrays of three floats per vertex
    /// and three indices per triangle.
    ///
    /// Mismatched lengths and out-of-range indices are rejected rather than truncated.
    pub fn from_flat(positions: &[f32], colors: &[f32], normals: &[f32], indices: &[u32]) -> RenderResult<Mesh> {
        let positions: Vec<Point3<f32>> = triples("position", positions)?.into_iter().map(Point3::from).collect();
        let colors = triples("color", colors)?;
        let normals = triples("normal", normals)?;

        if indices.len() % 3 != 0 {
            return Err(RenderError::RaggedArray { name: "index", len: indices.len() });
        }

        let indices = indices.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect();

        Mesh::from_parts(positions, colors, normals, indices)
    }

    /// Builds the geometry buffers from already separated attribute arrays
    pub fn from_parts(positions: Vec<Point3<f32>>,
                      colors: Vec<Color>,
                      normals: Vec<Vector3<f32>>,
                      indices: Vec<[u32; 3]>) -> RenderResult<Mesh> {
        let vertex_count = positions.len();

        if colors.len() != vertex_count {
            return Err(RenderError::MismatchedAttribute { name: "color", expected: vertex_count, actual: colors.len() });
        }

        if normals.len() != vertex_count {
            return Err(RenderError::MismatchedAttribute { name: "normal", expected: vertex_count, actual: normals.len() });
        }

        if indices.len() > u32::max_value() as usize {
            return Err(RenderError::TooManyTriangles { count: indices.len() });
        }

        for (triangle, corners) in indices.iter().enumerate() {
            if let Some(&index) = corners.iter().find(|&&index| index as usize >= vertex_count) {
                return Err(RenderError::IndexOutOfRange { triangle, index, vertex_count });
            }
        }

        Ok(Mesh { positions, colors, normals, indices })
    }

    /// Builds the geometry buffers from whole vertices
    pub fn from_vertices(vertices: &[Vertex], indices: Vec<[u32; 3]>) -> RenderResult<Mesh> {
        Mesh::from_parts(vertices.iter().map(|v| v.position).collect(),
                         vertices.iter().map(|v| v.color).collect(),
                         vertices.iter().map(|v| v.normal).collect(),
                         indices)
    }

    #[inline]
    pub fn vertex_count(&self) -> usize { self.positions.len() }

    #[inline]
    pub fn triangle_count(&self) -> usize { self.indices.len() }

    #[inline]
    pub fn positions(&self) -> &[Point3<f32>] { &self.positions }

    #[inline]
    pub fn colors(&self) -> &[Color] { &self.colors }

    #[inline]
    pub fn normals(&self) -> &[Vector3<f32>] { &self.normals }

    #[inline]
    pub fn indices(&self) -> &[[u32; 3]] { &self.indices }

    /// Gathers all attributes of one vertex
    #[inline]
    pub fn vertex(&self, index: usize) -> Vertex {
        Vertex::new(self.positions[index], self.colors[index], self.normals[index])
    }
}

impl Debug for Mesh {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "Mesh {{ vertices: {}, triangles: {} }}", self.positions.len(), self.indices.len())
    }
}
