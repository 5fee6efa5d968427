//! Data-parallel software rasterizer in Rust
//!
//! Renders an indexed triangle mesh with per-vertex colors and normals into an 8-bit color image,
//! running every pipeline stage as a kernel over a pool of worker threads.
//!
//! ### Example:
//!
//! ```no_run
//! use gridraster::{Camera, Dimensions, Mesh, RasterConfig, Rasterizer};
//! use gridraster::nalgebra::Point3;
//!
//! let mesh = Mesh::from_flat(&[-1.0, -1.0, 0.0, 1.0, -1.0, 0.0, 0.0, 1.0, 0.0],
//!                            &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
//!                            &[0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
//!                            &[0, 1, 2]).unwrap();
//!
//! let dimensions = Dimensions::new(640, 480);
//! let camera = Camera::new(Point3::new(0.0, 0.0, 3.0), Point3::origin(), dimensions);
//!
//! let mut rasterizer = Rasterizer::new(dimensions, RasterConfig::default()).unwrap();
//! let mut image = vec![[0u8; 4]; dimensions.area()];
//!
//! for frame in 0..60 {
//!     rasterizer.render_frame(&mut image, &camera, frame as f32 / 60.0, &mesh).unwrap();
//! }
//!
//! rasterizer.release();
//! ```
//!
//! ### Features:
//!
//! * Vertex transform, primitive assembly, rasterization, fragment shading and composition,
//! each launched over the whole frame with a barrier in between.
//! * Nearest-wins depth resolution of concurrent fragment writes, either lock-free with a packed
//! depth and primitive id per pixel, or with a lock per pixel.
//! * Top-left fill rule, so triangles sharing an edge never overlap or leave gaps.
//! * Perspective-correct attribute interpolation.
//! * Built-in single point light shading, or user-defined fragment shaders.
//! * Built-in compatibility with the `image` crate, using the `image_compat` cargo feature.

#[macro_use]
extern crate log;

pub extern crate nalgebra;
extern crate num_cpus;
extern crate parking_lot;
extern crate scoped_threadpool;
extern crate thiserror;

#[cfg(feature = "image_compat")]
extern crate image;

pub mod error;
pub mod geometry;
pub mod color;
pub mod interpolate;
pub mod parallel;
pub mod mesh;
pub mod primitive;
pub mod framebuffer;
pub mod config;
pub mod camera;
pub mod pipeline;

#[cfg(feature = "image_compat")]
pub mod image_compat;

pub use error::{RenderError, RenderResult};
pub use geometry::{Coordinate, Dimensions, FaceWinding, HasDimensions, ScreenVertex};
pub use color::{Color, PixelFormat};
pub use interpolate::{Interpolate, Interpolation};
pub use mesh::{Mesh, Vertex};
pub use primitive::{Triangle, TriangleState};
pub use framebuffer::{ColorBuffer, DepthResolve, Fragment, FragmentBuffer};
pub use config::{Animation, DegeneratePolicy, Light, RasterConfig};
pub use camera::{Camera, FrameParams};
pub use pipeline::{rasterize, FrameStats, Rasterizer, ShadingUniforms};
