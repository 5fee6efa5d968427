//! Frame composer stage.
//!
//! Converts the shaded floating-point colors into the caller's 8-bit pixel layout.

use crate::color::{Color, PixelFormat};
use crate::parallel::Grid;

/// Runs composition, writing one packed pixel per color.
pub fn run(grid: &mut Grid, colors: &[Color], target: &mut [[u8; 4]], format: PixelFormat, alpha: u8) {
    debug_assert_eq!(colors.len(), target.len());

    grid.map(target, |i, pixel| {
        *pixel = format.pack(&colors[i], alpha);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::color::rgb;

    #[test]
    fn packs_every_pixel_in_order() {
        let mut grid = Grid::new(2, 1);

        let colors = [rgb(1.0, 0.0, 0.0), rgb(0.0, 0.5, 2.0), rgb(-1.0, 0.0, 1.0)];
        let mut target = [[0u8; 4]; 3];

        run(&mut grid, &colors, &mut target, PixelFormat::Bgra8, 200);

        assert_eq!(target, [[0, 0, 255, 200], [255, 128, 0, 200], [255, 0, 0, 200]]);
    }
}
