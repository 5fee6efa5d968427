//! The rasterization pipeline.
//!
//! A [`Rasterizer`](struct.Rasterizer.html) is a session bound to one output resolution. It owns
//! the compute grid and every per-pixel and scratch buffer, and renders frames by launching each
//! stage in turn:
//!
//! ```text
//! clear -> vertex -> assembly -> rasterization -> fragment shading -> composition
//! ```
//!
//! Each launch returns only once every element has been processed, so no stage ever observes
//! a partially written buffer. Any error is reported before the first stage that touches the
//! caller's destination buffer, so a frame is either presented whole or not at all.

use std::mem;
use std::time::{Duration, Instant};

use crate::camera::{Camera, FrameParams};
use crate::color::Color;
use crate::config::{DegeneratePolicy, RasterConfig};
use crate::error::{RenderError, RenderResult};
use crate::framebuffer::{new_fragment_buffer, ColorBuffer, Fragment, FragmentBuffer};
use crate::geometry::{Dimensions, HasDimensions, ScreenVertex};
use crate::mesh::Mesh;
use crate::parallel::Grid;
use crate::primitive::{Triangle, TriangleState};

pub mod stages;

use self::stages::assembly::AssemblyCounts;
use self::stages::{assembly, compose, fragment, rasterization, vertex};

pub use self::stages::{blinn_phong, unlit, ShadingUniforms};

/// Summary of one rendered frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    pub vertices: usize,
    pub triangles: usize,
    pub visible: usize,
    pub degenerate: usize,
    pub culled: usize,
    /// Candidate fragments submitted to the fragment buffer, including those that lost
    pub fragments: usize,
    pub elapsed: Duration,
}

/// Everything a session allocates, released together
struct Buffers {
    fragments: Box<dyn FragmentBuffer>,
    colors: ColorBuffer,
    screen_vertices: Vec<ScreenVertex>,
    triangles: Vec<Triangle>,
}

impl Buffers {
    fn allocate(config: &RasterConfig, dimensions: Dimensions) -> RenderResult<Buffers> {
        Ok(Buffers {
            fragments: new_fragment_buffer(config.depth_resolve, dimensions)?,
            colors: ColorBuffer::with_dimensions(dimensions, config.background)?,
            screen_vertices: Vec::new(),
            triangles: Vec::new(),
        })
    }
}

/// Grows or shrinks a scratch buffer, reporting allocation failure instead of aborting.
fn resize_scratch<T: Clone>(what: &'static str, buffer: &mut Vec<T>, len: usize, value: T) -> RenderResult<()> {
    if len > buffer.len() && buffer.try_reserve_exact(len - buffer.len()).is_err() {
        return Err(RenderError::ResourceExhausted {
            what,
            bytes: len.saturating_mul(mem::size_of::<T>()),
        });
    }

    buffer.resize(len, value);

    Ok(())
}

/// A rendering session at a fixed output resolution
pub struct Rasterizer {
    config: RasterConfig,
    dimensions: Dimensions,
    grid: Grid,
    buffers: Option<Buffers>,
}

impl Rasterizer {
    /// Creates a session and allocates its buffers.
    ///
    /// Allocation failure is reported here, before any frame is attempted.
    pub fn new(dimensions: Dimensions, config: RasterConfig) -> RenderResult<Rasterizer> {
        let dimensions = dimensions.validated()?;

        let grid = Grid::new(config.thread_count(), config.chunk_size);

        let mut rasterizer = Rasterizer { config, dimensions, grid, buffers: None };

        rasterizer.allocate()?;

        Ok(rasterizer)
    }

    #[inline]
    pub fn config(&self) -> &RasterConfig { &self.config }

    #[inline]
    pub fn dimensions(&self) -> Dimensions { self.dimensions }

    #[inline]
    pub fn thread_count(&self) -> usize { self.grid.thread_count() }

    /// Returns `true` if the session currently holds its buffers
    #[inline]
    pub fn is_allocated(&self) -> bool { self.buffers.is_some() }

    /// Allocates the session buffers if they were released. Does nothing otherwise.
    pub fn allocate(&mut self) -> RenderResult<()> {
        if self.buffers.is_none() {
            self.buffers = Some(Buffers::allocate(&self.config, self.dimensions)?);

            info!("allocated {}x{} {:?} fragment buffer on {} threads",
                  self.dimensions.width, self.dimensions.height, self.config.depth_resolve, self.grid.thread_count());
        }

        Ok(())
    }

    /// Frees the fragment, color and scratch buffers.
    ///
    /// The session remains usable, the next frame allocates them again.
    pub fn release(&mut self) {
        if self.buffers.take().is_some() {
            info!("released {}x{} session buffers", self.dimensions.width, self.dimensions.height);
        }
    }

    /// Shaded colors of the last frame, if the buffers are allocated
    pub fn color_buffer(&self) -> Option<&ColorBuffer> {
        self.buffers.as_ref().map(|buffers| &buffers.colors)
    }

    /// Depth resolution state of the last frame, if the buffers are allocated
    pub fn fragments(&self) -> Option<&dyn FragmentBuffer> {
        self.buffers.as_ref().map(|buffers| &*buffers.fragments)
    }

    /// Triangles assembled for the last frame, indexed by primitive id
    pub fn triangles(&self) -> Option<&[Triangle]> {
        self.buffers.as_ref().map(|buffers| &buffers.triangles[..])
    }

    /// Renders one frame of `mesh` as seen by `camera` at `time`, with the built-in lighting.
    pub fn render_frame(&mut self, target: &mut [[u8; 4]], camera: &Camera, time: f32, mesh: &Mesh) -> RenderResult<FrameStats> {
        if camera.resolution != self.dimensions {
            return Err(RenderError::ResolutionMismatch { session: self.dimensions, camera: camera.resolution });
        }

        let params = FrameParams::from_camera(camera, time, &self.config.animation)?;

        self.render(target, &params, mesh)
    }

    /// Renders one frame with explicit transforms and the built-in lighting.
    pub fn render(&mut self, target: &mut [[u8; 4]], params: &FrameParams, mesh: &Mesh) -> RenderResult<FrameStats> {
        self.render_with(target, params, mesh, blinn_phong)
    }

    /// Renders one frame with explicit transforms and a custom fragment shader.
    ///
    /// The shader is invoked once for every pixel covered by at least one triangle, with the
    /// nearest fragment at that pixel. Uncovered pixels receive the background color.
    pub fn render_with<S>(&mut self, target: &mut [[u8; 4]], params: &FrameParams, mesh: &Mesh, shader: S) -> RenderResult<FrameStats>
        where S: Fn(&Fragment, &ShadingUniforms) -> Color + Sync {
        let area = self.dimensions.area();

        if target.len() != area {
            return Err(RenderError::TargetSizeMismatch { expected: area, actual: target.len() });
        }

        let mut buffers = match self.buffers.take() {
            Some(buffers) => buffers,
            None => {
                let buffers = Buffers::allocate(&self.config, self.dimensions)?;

                info!("re-allocated {}x{} session buffers", self.dimensions.width, self.dimensions.height);

                buffers
            }
        };

        let result = run_frame(&mut self.grid, &self.config, &mut buffers, target, params, mesh, shader);

        self.buffers = Some(buffers);

        result
    }
}

fn run_frame<S>(grid: &mut Grid,
                config: &RasterConfig,
                buffers: &mut Buffers,
                target: &mut [[u8; 4]],
                params: &FrameParams,
                mesh: &Mesh,
                shader: S) -> RenderResult<FrameStats> where S: Fn(&Fragment, &ShadingUniforms) -> Color + Sync {
    let frame_start = Instant::now();

    let Buffers { ref mut fragments, ref mut colors, ref mut screen_vertices, ref mut triangles } = *buffers;

    let dimensions = colors.dimensions();

    resize_scratch("transformed vertices", screen_vertices, mesh.vertex_count(), ScreenVertex::invalid())?;
    resize_scratch("triangles", triangles, mesh.triangle_count(), Triangle::default())?;

    let start = Instant::now();

    fragments.clear(grid);
    colors.clear(grid, config.background);

    trace!("clear: {} pixels in {:?}", dimensions.area(), start.elapsed());

    let start = Instant::now();

    vertex::run(grid, mesh.positions(), &params.model_view_projection(), dimensions, screen_vertices);

    trace!("vertex stage: {} vertices in {:?}", mesh.vertex_count(), start.elapsed());

    let start = Instant::now();

    assembly::run(grid, mesh, screen_vertices, config.cull_faces, triangles);

    let counts = AssemblyCounts::tally(triangles);

    trace!("assembly stage: {:?} in {:?}", counts, start.elapsed());

    if config.degenerate_policy == DegeneratePolicy::Reject {
        if let Some(triangle) = triangles.iter().position(|t| t.state == TriangleState::Degenerate) {
            return Err(RenderError::DegenerateTriangle { triangle });
        }
    }

    let start = Instant::now();

    let submitted = rasterization::run(grid, triangles, &**fragments, config.interpolation);

    trace!("rasterization stage: {} fragments in {:?}", submitted, start.elapsed());

    let start = Instant::now();

    let uniforms = ShadingUniforms::new(config, params);

    fragment::run(grid, &**fragments, triangles, config.interpolation, &uniforms, config.background, shader, colors.pixels_mut());

    trace!("fragment stage: {} pixels in {:?}", dimensions.area(), start.elapsed());

    let start = Instant::now();

    compose::run(grid, colors.pixels(), target, config.pixel_format, config.alpha);

    trace!("compose stage: {} pixels in {:?}", dimensions.area(), start.elapsed());

    let stats = FrameStats {
        vertices: mesh.vertex_count(),
        triangles: mesh.triangle_count(),
        visible: counts.visible,
        degenerate: counts.degenerate,
        culled: counts.culled,
        fragments: submitted,
        elapsed: frame_start.elapsed(),
    };

    debug!("frame: {} triangles ({} visible, {} degenerate, {} culled), {} fragments in {:?}",
           stats.triangles, stats.visible, stats.degenerate, stats.culled, stats.fragments, stats.elapsed);

    Ok(stats)
}

/// Renders a single frame from flat arrays into `target`, then releases every buffer it allocated.
///
/// `positions`, `colors` and `normals` hold three floats per vertex, and `indices` three
/// vertex indices per triangle. The output resolution is taken from the camera.
pub fn rasterize(target: &mut [[u8; 4]],
                 camera: &Camera,
                 time: f32,
                 positions: &[f32],
                 colors: &[f32],
                 normals: &[f32],
                 indices: &[u32],
                 config: RasterConfig) -> RenderResult<FrameStats> {
    let mesh = Mesh::from_flat(positions, colors, normals, indices)?;

    camera.validate()?;

    let area = camera.resolution.area();

    if target.len() != area {
        return Err(RenderError::TargetSizeMismatch { expected: area, actual: target.len() });
    }

    let mut rasterizer = Rasterizer::new(camera.resolution, config)?;

    let stats = rasterizer.render_frame(target, camera, time, &mesh);

    rasterizer.release();

    stats
}
