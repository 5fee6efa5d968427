//! Fragment shading stage.
//!
//! Runs once per pixel after rasterization has finished. Slots still holding the background
//! sentinel receive the background color, every other slot is shaded from its winning fragment.
//! The shader only ever sees the nearest fragment of each pixel, so it runs at most once per pixel.

use nalgebra::{Matrix3, Matrix4, Point3};

use crate::camera::FrameParams;
use crate::color::Color;
use crate::config::{Light, RasterConfig};
use crate::framebuffer::{Fragment, FragmentBuffer};
use crate::interpolate::Interpolation;
use crate::parallel::Grid;
use crate::primitive::Triangle;

/// Values shared by every fragment shader invocation of a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadingUniforms {
    /// Object-to-world transform of fragment positions
    pub model: Matrix4<f32>,
    /// Object-to-world transform of fragment normals
    pub normal_matrix: Matrix3<f32>,
    /// World-space eye position
    pub eye: Point3<f32>,
    pub light: Light,
    pub ambient: f32,
    pub specular: f32,
    pub shininess: f32,
}

impl ShadingUniforms {
    pub fn new(config: &RasterConfig, params: &FrameParams) -> ShadingUniforms {
        ShadingUniforms {
            model: params.model,
            normal_matrix: params.normal_matrix,
            eye: params.eye,
            light: config.light,
            ambient: config.ambient,
            specular: config.specular,
            shininess: config.shininess,
        }
    }
}

fn saturate(value: f32) -> f32 {
    if value < 0.0 { 0.0 } else if value > 1.0 { 1.0 } else { value }
}

/// Returns the fragment's interpolated vertex color, without lighting
pub fn unlit(fragment: &Fragment, _: &ShadingUniforms) -> Color {
    fragment.color
}

/// Single point light evaluation in world-space: ambient plus Lambertian diffuse,
/// with an optional Blinn-Phong specular highlight.
///
/// Surfaces are lit from whichever side faces the eye. A fragment without a usable
/// normal only receives the ambient term.
// GLSL habits die hard
#[allow(non_snake_case)]
pub fn blinn_phong(fragment: &Fragment, uniforms: &ShadingUniforms) -> Color {
    let ShadingUniforms { ref model, ref normal_matrix, ref eye, ref light, ambient, specular, shininess } = *uniforms;

    let base = fragment.color;

    let position = model.transform_point(&fragment.position);

    let normal = match (normal_matrix * fragment.normal).try_normalize(::std::f32::EPSILON) {
        Some(normal) => normal,
        None => return base * ambient,
    };

    let view_dir = (*eye - position).try_normalize(::std::f32::EPSILON).unwrap_or(normal);
    let light_dir = (light.position - position).try_normalize(::std::f32::EPSILON).unwrap_or(normal);

    let normal = if normal.dot(&view_dir) < 0.0 { -normal } else { normal };

    let radiance = light.color * light.intensity;

    let NdotL = saturate(normal.dot(&light_dir));

    let mut color = base * ambient + base.component_mul(&radiance) * NdotL;

    if specular > 0.0 && NdotL > 0.0 {
        let halfway_vector = (light_dir + view_dir).try_normalize(::std::f32::EPSILON).unwrap_or(normal);

        let NdotH = saturate(normal.dot(&halfway_vector));

        color += radiance * (specular * NdotH.powf(shininess));
    }

    color
}

/// Runs fragment shading, writing one color per pixel.
pub fn run<S>(grid: &mut Grid,
              fragments: &dyn FragmentBuffer,
              triangles: &[Triangle],
              interpolation: Interpolation,
              uniforms: &ShadingUniforms,
              background: Color,
              shader: S,
              colors: &mut [Color]) where S: Fn(&Fragment, &ShadingUniforms) -> Color + Sync {
    debug_assert_eq!(fragments.dimensions().area(), colors.len());

    grid.map(colors, |i, color| {
        *color = match fragments.resolve(i, triangles, interpolation) {
            Some(ref fragment) => shader(fragment, uniforms),
            None => background,
        };
    });
}
