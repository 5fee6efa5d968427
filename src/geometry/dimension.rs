use crate::error::{RenderError, RenderResult};

use super::Coordinate;

/// Defines types with set dimensions
pub trait HasDimensions {
    /// Returns the dimensions of the object
    fn dimensions(&self) -> Dimensions;

    /// Checks if the given coordinate is within the dimension bounds of the current object
    #[inline]
    fn in_bounds(&self, coord: Coordinate) -> bool {
        self.dimensions().in_bounds(coord)
    }
}

/// Output resolution in pixels
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    #[inline(always)]
    pub fn new(width: u32, height: u32) -> Dimensions {
        Dimensions { width, height }
    }

    /// Returns the dimensions if both are non-zero.
    pub fn validated(self) -> RenderResult<Dimensions> {
        if self.width == 0 || self.height == 0 {
            Err(RenderError::InvalidDimensions { width: self.width, height: self.height })
        } else {
            Ok(self)
        }
    }

    /// Returns the number of pixels as `usize` by multiplying the current width and height
    #[inline]
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Width over height
    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Checks if the given coordinate is within the dimension bounds
    #[inline]
    pub fn in_bounds(&self, coord: Coordinate) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    /// Row-major coordinate of a linear pixel index
    #[inline]
    pub fn coordinate(&self, index: usize) -> Coordinate {
        let width = self.width as usize;

        Coordinate::new((index % width) as u32, (index / width) as u32)
    }
}
