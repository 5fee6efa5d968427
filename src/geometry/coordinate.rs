use super::Dimensions;

/// Integer pixel coordinate, with the origin in the upper left corner
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd)]
pub struct Coordinate {
    pub x: u32,
    pub y: u32,
}

impl Coordinate {
    #[inline]
    pub fn new(x: u32, y: u32) -> Coordinate {
        Coordinate { x, y }
    }

    /// Row-major index of this coordinate within a buffer of the given dimensions
    #[inline]
    pub fn into_index(self, dimensions: Dimensions) -> usize {
        let Coordinate { x, y } = self;
        x as usize + y as usize * dimensions.width as usize
    }

    /// Real sample position of the pixel, which is its center.
    #[inline]
    pub fn center(self) -> (f32, f32) {
        (self.x as f32 + 0.5, self.y as f32 + 0.5)
    }
}
