//! Pipeline stages, each launched as one kernel over the compute grid

pub mod vertex;
pub mod assembly;
pub mod rasterization;
pub mod fragment;
pub mod compose;

pub use self::fragment::{ShadingUniforms, blinn_phong, unlit};
pub use self::rasterization::rasterize_triangle;
