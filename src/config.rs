//! Session configuration

use nalgebra::{Isometry3, Matrix4, Point3, Unit, Vector3};

use crate::color::{predefined, Color, PixelFormat};
use crate::framebuffer::DepthResolve;
use crate::geometry::FaceWinding;
use crate::interpolate::Interpolation;
use crate::parallel::DEFAULT_CHUNK_SIZE;

/// A single point light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Point3<f32>,
    pub color: Color,
    pub intensity: f32,
}

impl Light {
    pub fn new_white(position: Point3<f32>, intensity: f32) -> Light {
        Light { position, color: predefined::white(), intensity }
    }

    pub fn new(position: Point3<f32>, intensity: f32, color: Color) -> Light {
        Light { position, intensity, color }
    }
}

impl Default for Light {
    fn default() -> Light {
        Light::new_white(Point3::new(0.0, 10.0, 10.0), 1.0)
    }
}

/// Procedural model rotation driven by the per-frame time value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    pub axis: Unit<Vector3<f32>>,
    pub radians_per_unit: f32,
}

impl Animation {
    /// No motion, the model matrix is always the identity
    pub fn still() -> Animation {
        Animation { axis: Vector3::y_axis(), radians_per_unit: 0.0 }
    }

    /// Rotation around `axis` at `radians_per_unit` radians per unit of time
    pub fn spin(axis: Unit<Vector3<f32>>, radians_per_unit: f32) -> Animation {
        Animation { axis, radians_per_unit }
    }

    /// Object-to-world transform at the given time
    pub fn model_matrix(&self, time: f32) -> Matrix4<f32> {
        let angle = time * self.radians_per_unit;

        if angle == 0.0 || !angle.is_finite() {
            return Matrix4::identity();
        }

        Isometry3::new(Vector3::zeros(), self.axis.into_inner() * angle).to_homogeneous()
    }
}

impl Default for Animation {
    fn default() -> Animation { Animation::still() }
}

/// What happens to triangles that cannot be rasterized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegeneratePolicy {
    /// Produce no fragments for them and keep going
    Skip,
    /// Fail the frame with `RenderError::DegenerateTriangle` before rasterization starts
    Reject,
}

impl Default for DegeneratePolicy {
    fn default() -> DegeneratePolicy { DegeneratePolicy::Skip }
}

/// Configuration of a pipeline session
#[derive(Debug, Clone, PartialEq)]
pub struct RasterConfig {
    /// Worker threads of the compute grid, `None` for one per logical CPU
    pub threads: Option<usize>,
    /// Elements claimed by a worker at a time
    pub chunk_size: usize,
    /// Color of pixels no triangle covers
    pub background: Color,
    pub light: Light,
    /// Fraction of the base color visible without direct light
    pub ambient: f32,
    /// Blinn-Phong specular strength, zero disables the term
    pub specular: f32,
    pub shininess: f32,
    pub interpolation: Interpolation,
    pub depth_resolve: DepthResolve,
    /// Screen-space winding of triangles to discard
    pub cull_faces: Option<FaceWinding>,
    pub degenerate_policy: DegeneratePolicy,
    pub pixel_format: PixelFormat,
    /// Alpha written for every presented pixel
    pub alpha: u8,
    pub animation: Animation,
}

impl Default for RasterConfig {
    fn default() -> RasterConfig {
        RasterConfig {
            threads: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
            background: predefined::black(),
            light: Light::default(),
            ambient: 0.1,
            specular: 0.0,
            shininess: 32.0,
            interpolation: Interpolation::default(),
            depth_resolve: DepthResolve::default(),
            cull_faces: None,
            degenerate_policy: DegeneratePolicy::default(),
            pixel_format: PixelFormat::default(),
            alpha: 255,
            animation: Animation::default(),
        }
    }
}

impl RasterConfig {
    pub fn with_threads(mut self, threads: usize) -> RasterConfig {
        self.threads = Some(threads);
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> RasterConfig {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_background(mut self, background: Color) -> RasterConfig {
        self.background = background;
        self
    }

    pub fn with_light(mut self, light: Light) -> RasterConfig {
        self.light = light;
        self
    }

    pub fn with_ambient(mut self, ambient: f32) -> RasterConfig {
        self.ambient = ambient;
        self
    }

    pub fn with_specular(mut self, specular: f32, shininess: f32) -> RasterConfig {
        self.specular = specular;
        self.shininess = shininess;
        self
    }

    pub fn with_interpolation(mut self, interpolation: Interpolation) -> RasterConfig {
        self.interpolation = interpolation;
        self
    }

    pub fn with_depth_resolve(mut self, depth_resolve: DepthResolve) -> RasterConfig {
        self.depth_resolve = depth_resolve;
        self
    }

    pub fn with_cull_faces(mut self, cull_faces: Option<FaceWinding>) -> RasterConfig {
        self.cull_faces = cull_faces;
        self
    }

    pub fn with_degenerate_policy(mut self, policy: DegeneratePolicy) -> RasterConfig {
        self.degenerate_policy = policy;
        self
    }

    pub fn with_pixel_format(mut self, pixel_format: PixelFormat, alpha: u8) -> RasterConfig {
        self.pixel_format = pixel_format;
        self.alpha = alpha;
        self
    }

    pub fn with_animation(mut self, animation: Animation) -> RasterConfig {
        self.animation = animation;
        self
    }

    /// Resolved worker thread count
    pub fn thread_count(&self) -> usize {
        match self.threads {
            Some(threads) if threads > 0 => threads,
            _ => num_cpus::get(),
        }
    }
}
