//! Shaded color buffer

use crate::color::Color;
use crate::error::RenderResult;
use crate::geometry::{Coordinate, Dimensions, HasDimensions};
use crate::parallel::Grid;

use super::allocate;

/// Final displayable color per pixel, in row-major order
#[derive(Debug, Clone)]
pub struct ColorBuffer {
    dimensions: Dimensions,
    pixels: Vec<Color>,
}

impl ColorBuffer {
    pub fn with_dimensions(dimensions: Dimensions, background: Color) -> RenderResult<ColorBuffer> {
        Ok(ColorBuffer {
            dimensions,
            pixels: allocate("color buffer", dimensions.area(), || background)?,
        })
    }

    /// Fills the whole buffer with one color
    pub fn clear(&mut self, grid: &mut Grid, background: Color) {
        grid.map(&mut self.pixels, |_, pixel| *pixel = background);
    }

    #[inline]
    pub fn pixels(&self) -> &[Color] { &self.pixels }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Color] { &mut self.pixels }

    /// Color at the given coordinate, if it is in bounds
    #[inline]
    pub fn get(&self, coord: Coordinate) -> Option<&Color> {
        if self.dimensions.in_bounds(coord) {
            self.pixels.get(coord.into_index(self.dimensions))
        } else {
            None
        }
    }
}

impl HasDimensions for ColorBuffer {
    #[inline]
    fn dimensions(&self) -> Dimensions { self.dimensions }
}
