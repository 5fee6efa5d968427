//! Primitive assembly stage.
//!
//! Gathers the three corners of every index triple, both the original object-space position and
//! the screen-space position produced by the vertex stage, along with colors and normals, into one
//! self-contained triangle record. Triangles that cannot produce fragments are tagged here so
//! rasterization can skip them cheaply.

use crate::geometry::{FaceWinding, ScreenVertex};
use crate::mesh::Mesh;
use crate::parallel::Grid;
use crate::primitive::{Corner, Triangle, TriangleState};

/// Number of triangles in each assembly state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssemblyCounts {
    pub visible: usize,
    pub degenerate: usize,
    pub culled: usize,
}

impl AssemblyCounts {
    pub fn tally(triangles: &[Triangle]) -> AssemblyCounts {
        triangles.iter().fold(AssemblyCounts::default(), |mut counts, triangle| {
            match triangle.state {
                TriangleState::Visible => counts.visible += 1,
                TriangleState::Degenerate => counts.degenerate += 1,
                TriangleState::Culled => counts.culled += 1,
            }

            counts
        })
    }
}

/// Assembles a single triangle from the mesh and the transformed vertices
#[inline]
pub fn assemble(mesh: &Mesh, screen_vertices: &[ScreenVertex], indices: &[u32; 3], cull_faces: Option<FaceWinding>) -> Triangle {
    let corner = |index: u32| {
        let index = index as usize;
        let vertex = mesh.vertex(index);

        Corner::new(vertex.position, screen_vertices[index], vertex.color, vertex.normal)
    };

    Triangle::assemble([corner(indices[0]), corner(indices[1]), corner(indices[2])], cull_faces)
}

/// Runs primitive assembly, writing one triangle per index triple.
pub fn run(grid: &mut Grid, mesh: &Mesh, screen_vertices: &[ScreenVertex], cull_faces: Option<FaceWinding>, output: &mut [Triangle]) {
    debug_assert_eq!(mesh.triangle_count(), output.len());
    debug_assert_eq!(mesh.vertex_count(), screen_vertices.len());

    let indices = mesh.indices();

    grid.map(output, |i, triangle| {
        *triangle = assemble(mesh, screen_vertices, &indices[i], cull_faces);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    use nalgebra::{Point3, Vector3};

    use crate::color::predefined::{green, red};
    use crate::mesh::Vertex;

    #[test]
    fn corners_keep_both_positions() {
        let vertices = [
            Vertex::new(Point3::new(-1.0, 1.0, 0.0), red(), Vector3::z()),
            Vertex::new(Point3::new(1.0, 1.0, 0.0), green(), Vector3::z()),
            Vertex::new(Point3::new(-1.0, -1.0, 0.0), red(), Vector3::z()),
            Vertex::new(Point3::new(-1.0, -1.0, 0.0), red(), Vector3::z()),
        ];

        let mesh = Mesh::from_vertices(&vertices, vec![[0, 1, 2], [0, 2, 3]]).unwrap();

        let screen = [
            ScreenVertex::screen(0.0, 0.0, 0.5),
            ScreenVertex::screen(4.0, 0.0, 0.5),
            ScreenVertex::screen(0.0, 4.0, 0.5),
            ScreenVertex::screen(0.0, 4.0, 0.5),
        ];

        let mut grid = Grid::new(2, 1);
        let mut triangles = vec![Triangle::default(); 2];

        run(&mut grid, &mesh, &screen, None, &mut triangles);

        let first = &triangles[0];

        assert_eq!(first.state, TriangleState::Visible);
        assert_eq!(first.corners[1].position, Point3::new(1.0, 1.0, 0.0));
        assert_eq!(first.corners[1].transformed.position, Point3::new(4.0, 0.0, 0.5));
        assert_eq!(first.corners[1].color, green());

        assert_eq!(triangles[1].state, TriangleState::Degenerate);

        assert_eq!(AssemblyCounts::tally(&triangles), AssemblyCounts { visible: 1, degenerate: 1, culled: 0 });
    }
}
