//! Error types for pipeline sessions and frames

use thiserror::Error;

use crate::geometry::Dimensions;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("{width}x{height} is not a valid output resolution")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("unable to allocate {bytes} bytes for the {what}")]
    ResourceExhausted { what: &'static str, bytes: usize },
    #[error("{name} array has {len} elements, which is not a multiple of 3")]
    RaggedArray { name: &'static str, len: usize },
    #[error("{name} array has {actual} elements, expected {expected} to match the positions")]
    MismatchedAttribute { name: &'static str, expected: usize, actual: usize },
    #[error("triangle {triangle} references vertex {index}, but only {vertex_count} vertices exist")]
    IndexOutOfRange { triangle: usize, index: u32, vertex_count: usize },
    #[error("{count} triangles exceed the addressable primitive range")]
    TooManyTriangles { count: usize },
    #[error("destination buffer holds {actual} pixels, expected {expected}")]
    TargetSizeMismatch { expected: usize, actual: usize },
    #[error("camera resolution {camera:?} does not match the session resolution {session:?}")]
    ResolutionMismatch { session: Dimensions, camera: Dimensions },
    #[error("invalid camera: {0}")]
    InvalidCamera(&'static str),
    #[error("triangle {triangle} is degenerate or has a vertex behind the camera")]
    DegenerateTriangle { triangle: usize },
}

pub type RenderResult<T> = Result<T, RenderError>;
