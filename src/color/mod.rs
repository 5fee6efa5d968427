//! Color type definitions for fragments, shading and the composed frame

use nalgebra::Vector3;

pub mod predefined;

/// RGB 32-bit floating point color with channels nominally in `[0, 1]`
pub type Color = Vector3<f32>;

/// Creates a color from its three channels
#[inline(always)]
pub fn rgb(r: f32, g: f32, b: f32) -> Color {
    Color::new(r, g, b)
}

/// Channel ordering of the presentable 8-bit output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// Red, green, blue, alpha
    Rgba8,
    /// Blue, green, red, alpha
    Bgra8,
}

impl Default for PixelFormat {
    fn default() -> PixelFormat { PixelFormat::Rgba8 }
}

/// Clamps a channel intensity to `[0, 1]` and quantizes it to 8 bits.
///
/// NaN quantizes to zero.
#[inline]
pub fn quantize(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }

    (value.max(0.0).min(1.0) * 255.0).round() as u8
}

impl PixelFormat {
    /// Quantizes and orders a color for presentation
    #[inline]
    pub fn pack(self, color: &Color, alpha: u8) -> [u8; 4] {
        let (r, g, b) = (quantize(color.x), quantize(color.y), quantize(color.z));

        match self {
            PixelFormat::Rgba8 => [r, g, b, alpha],
            PixelFormat::Bgra8 => [b, g, r, alpha],
        }
    }
}
