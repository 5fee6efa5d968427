//! Conversion of rendered frames into `image` buffers

use image::RgbaImage;

use crate::color::PixelFormat;
use crate::framebuffer::ColorBuffer;
use crate::geometry::HasDimensions;

pub trait ImageColorBuffer {
    /// Quantizes the buffer into a new RGBA image with the given alpha
    fn copy_to_image(&self, alpha: u8) -> Option<RgbaImage>;
}

impl ImageColorBuffer for ColorBuffer {
    fn copy_to_image(&self, alpha: u8) -> Option<RgbaImage> {
        let mut raw = Vec::with_capacity(self.pixels().len() * 4);

        for color in self.pixels() {
            raw.extend_from_slice(&PixelFormat::Rgba8.pack(color, alpha));
        }

        let dimensions = self.dimensions();

        RgbaImage::from_raw(dimensions.width, dimensions.height, raw)
    }
}

/// Wraps a composed `Rgba8` frame as an image, `None` if its size does not match
pub fn frame_to_image(frame: &[[u8; 4]], width: u32, height: u32) -> Option<RgbaImage> {
    let raw = frame.iter().flat_map(|pixel| pixel.iter().cloned()).collect();

    RgbaImage::from_raw(width, height, raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::color::rgb;
    use crate::geometry::Dimensions;
    use crate::parallel::Grid;

    #[test]
    fn color_buffer_exports_as_rgba() {
        let mut buffer = ColorBuffer::with_dimensions(Dimensions::new(2, 1), rgb(0.0, 0.0, 0.0)).unwrap();

        buffer.clear(&mut Grid::new(1, 1), rgb(1.0, 0.0, 0.0));

        let image = buffer.copy_to_image(255).unwrap();

        assert_eq!(image.dimensions(), (2, 1));
        assert_eq!(image.get_pixel(1, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn frame_size_must_match() {
        assert!(frame_to_image(&[[0; 4]; 3], 2, 2).is_none());
        assert!(frame_to_image(&[[0; 4]; 4], 2, 2).is_some());
    }
}
