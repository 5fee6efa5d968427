//! Interpolation utilities

use nalgebra::{Point3, Vector3};

/// Describes a type that can be interpolated with barycentric coordinates.
///
/// This is required for any fragment attribute produced by rasterization.
///
/// See [This document](https://classes.soe.ucsc.edu/cmps160/Fall10/resources/barycentricInterpolation.pdf) for more information.
pub trait Interpolate {
    /// Interpolate the three values with their corresponding barycentric coordinate weight
    fn barycentric_interpolate(u: f32, x1: &Self, v: f32, x2: &Self, w: f32, x3: &Self) -> Self;
}

impl Interpolate for f32 {
    #[inline(always)]
    fn barycentric_interpolate(u: f32, ux: &f32, v: f32, vx: &f32, w: f32, wx: &f32) -> f32 {
        ux * u + vx * v + wx * w
    }
}

impl Interpolate for Vector3<f32> {
    #[inline]
    fn barycentric_interpolate(u: f32, ux: &Self, v: f32, vx: &Self, w: f32, wx: &Self) -> Self {
        ux * u + vx * v + wx * w
    }
}

impl Interpolate for Point3<f32> {
    #[inline]
    fn barycentric_interpolate(u: f32, ux: &Self, v: f32, vx: &Self, w: f32, wx: &Self) -> Self {
        Point3::from(Interpolate::barycentric_interpolate(u, &ux.coords,
                                                          v, &vx.coords,
                                                          w, &wx.coords))
    }
}

/// How vertex attributes are interpolated across a triangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpolation {
    /// Weights are corrected by each corner's `1/w`, so attributes vary linearly
    /// across the surface in object-space rather than on screen.
    PerspectiveCorrect,
    /// Screen-space barycentric weights are used directly.
    ///
    /// This is exact for orthographic projections and an approximation otherwise.
    Linear,
}

impl Default for Interpolation {
    fn default() -> Interpolation { Interpolation::PerspectiveCorrect }
}

impl Interpolation {
    /// Adjusts screen-space barycentric weights for attribute interpolation.
    ///
    /// Depth is always interpolated with the unadjusted weights.
    #[inline]
    pub fn weights(self, (u, v, w): (f32, f32, f32), inv_w: (f32, f32, f32)) -> (f32, f32, f32) {
        match self {
            Interpolation::Linear => (u, v, w),
            Interpolation::PerspectiveCorrect => {
                let (pu, pv, pw) = (u * inv_w.0, v * inv_w.1, w * inv_w.2);

                let sum = pu + pv + pw;

                if sum.abs() <= ::std::f32::EPSILON {
                    (u, v, w)
                } else {
                    (pu / sum, pv / sum, pw / sum)
                }
            }
        }
    }
}
