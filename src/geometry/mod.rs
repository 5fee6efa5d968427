//! Screen-space geometry structures

pub mod dimension;
pub mod coordinate;
pub mod winding;
pub mod screenvertex;

pub use self::dimension::{Dimensions, HasDimensions};
pub use self::coordinate::Coordinate;
pub use self::winding::FaceWinding;
pub use self::screenvertex::ScreenVertex;
