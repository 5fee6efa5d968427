//! Camera description and the per-frame transforms derived from it

use nalgebra::{Isometry3, Matrix3, Matrix4, Perspective3, Point3, Vector3};

use crate::config::Animation;
use crate::error::{RenderError, RenderResult};
use crate::geometry::Dimensions;

/// Perspective camera looking from `eye` toward `center`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Point3<f32>,
    pub center: Point3<f32>,
    pub up: Vector3<f32>,
    pub resolution: Dimensions,
    /// Vertical field of view in radians
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(eye: Point3<f32>, center: Point3<f32>, resolution: Dimensions) -> Camera {
        Camera {
            eye,
            center,
            up: Vector3::y(),
            resolution,
            fov_y: 45.0f32.to_radians(),
            near: 0.1,
            far: 100.0,
        }
    }

    pub fn with_up(mut self, up: Vector3<f32>) -> Camera {
        self.up = up;
        self
    }

    pub fn with_fov(mut self, fov_y: f32) -> Camera {
        self.fov_y = fov_y;
        self
    }

    pub fn with_clip_planes(mut self, near: f32, far: f32) -> Camera {
        self.near = near;
        self.far = far;
        self
    }

    /// Checks the parameters can produce a view and projection
    pub fn validate(&self) -> RenderResult<()> {
        self.resolution.validated()?;

        if !(self.near > 0.0 && self.far > self.near && self.far.is_finite()) {
            return Err(RenderError::InvalidCamera("clip planes must satisfy 0 < near < far"));
        }

        if !(self.fov_y > 0.0 && self.fov_y < ::std::f32::consts::PI) {
            return Err(RenderError::InvalidCamera("field of view must be between 0 and pi"));
        }

        let forward = self.center - self.eye;

        if !(forward.norm() > 0.0) {
            return Err(RenderError::InvalidCamera("eye and center coincide"));
        }

        if !(forward.cross(&self.up).norm() > 0.0) {
            return Err(RenderError::InvalidCamera("up vector is parallel to the view direction"));
        }

        Ok(())
    }

    /// World-to-camera transform
    pub fn view(&self) -> Matrix4<f32> {
        Isometry3::look_at_rh(&self.eye, &self.center, &self.up).to_homogeneous()
    }

    /// Camera-to-clip transform
    pub fn projection(&self) -> Matrix4<f32> {
        Perspective3::new(self.resolution.aspect(), self.fov_y, self.near, self.far).to_homogeneous()
    }
}

/// Transforms shared by every element of one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameParams {
    /// Object-to-world
    pub model: Matrix4<f32>,
    /// The inverse transpose of the model matrix, multiplied by normals to get world-space normals
    pub normal_matrix: Matrix3<f32>,
    /// World-to-clip
    pub view_projection: Matrix4<f32>,
    /// World-space eye position, for view-dependent shading
    pub eye: Point3<f32>,
}

impl FrameParams {
    pub fn new(model: Matrix4<f32>, view_projection: Matrix4<f32>, eye: Point3<f32>) -> FrameParams {
        let linear = model.fixed_view::<3, 3>(0, 0).into_owned();

        FrameParams {
            model,
            normal_matrix: linear.try_inverse().map(|inverse| inverse.transpose()).unwrap_or_else(Matrix3::identity),
            view_projection,
            eye,
        }
    }

    /// Frame transforms for a camera at a point in time
    pub fn from_camera(camera: &Camera, time: f32, animation: &Animation) -> RenderResult<FrameParams> {
        camera.validate()?;

        Ok(FrameParams::new(animation.model_matrix(time),
                            camera.projection() * camera.view(),
                            camera.eye))
    }

    /// Parameters for geometry that is already in normalized device coordinates,
    /// with the eye on the +z axis.
    pub fn identity() -> FrameParams {
        FrameParams::new(Matrix4::identity(), Matrix4::identity(), Point3::new(0.0, 0.0, 1.0))
    }

    /// Object-to-clip transform
    #[inline]
    pub fn model_view_projection(&self) -> Matrix4<f32> {
        self.view_projection * self.model
    }
}
