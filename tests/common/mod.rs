#![allow(dead_code)]

use gridraster::color::Color;
use gridraster::{Dimensions, Mesh, RasterConfig};

pub const BACKGROUND: [u8; 4] = [0, 0, 0, 255];

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Configuration with a small work chunk, so even tiny frames are split across threads
pub fn config() -> RasterConfig {
    RasterConfig::default().with_threads(4).with_chunk_size(3)
}

/// A corner given in pixel coordinates with a normalized depth
#[derive(Debug, Clone, Copy)]
pub struct Pixel(pub f32, pub f32, pub f32);

/// Collects triangles given in screen-space into a mesh, for use with `FrameParams::identity()`.
///
/// Each triangle gets its own three vertices, all with the triangle's color.
pub struct ScreenMesh {
    dimensions: Dimensions,
    positions: Vec<f32>,
    colors: Vec<f32>,
    normals: Vec<f32>,
    indices: Vec<u32>,
}

impl ScreenMesh {
    pub fn new(dimensions: Dimensions) -> ScreenMesh {
        ScreenMesh {
            dimensions,
            positions: Vec::new(),
            colors: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
        }
    }

    pub fn triangle(mut self, corners: [Pixel; 3], color: Color) -> ScreenMesh {
        let (width, height) = (self.dimensions.width as f32, self.dimensions.height as f32);

        for &Pixel(x, y, depth) in &corners {
            let index = self.positions.len() as u32 / 3;

            // Inverse of the viewport mapping
            self.positions.extend_from_slice(&[2.0 * x / width - 1.0, 1.0 - 2.0 * y / height, 2.0 * depth - 1.0]);
            self.colors.extend_from_slice(color.as_slice());
            self.normals.extend_from_slice(&[0.0, 0.0, 1.0]);
            self.indices.push(index);
        }

        self
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Builds the mesh with the triangles in the given order
    pub fn build_ordered(&self, order: &[usize]) -> Mesh {
        let indices: Vec<u32> = order.iter().flat_map(|&t| self.indices[t * 3..t * 3 + 3].iter().cloned()).collect();

        Mesh::from_flat(&self.positions, &self.colors, &self.normals, &indices).unwrap()
    }

    pub fn build(&self) -> Mesh {
        let order: Vec<usize> = (0..self.triangle_count()).collect();

        self.build_ordered(&order)
    }

    pub fn flat(&self) -> (&[f32], &[f32], &[f32], &[u32]) {
        (&self.positions, &self.colors, &self.normals, &self.indices)
    }
}

pub fn target(dimensions: Dimensions) -> Vec<[u8; 4]> {
    vec![[0u8; 4]; dimensions.area()]
}

/// Renders a row-major image as text, for assertion messages
pub fn show(image: &[[u8; 4]], dimensions: Dimensions) -> String {
    let mut out = String::new();

    for row in image.chunks(dimensions.width as usize) {
        for pixel in row {
            out.push_str(&format!("{:02x}{:02x}{:02x} ", pixel[0], pixel[1], pixel[2]));
        }

        out.push('\n');
    }

    out
}
