//! Per-pixel buffers owned by a pipeline session.
//!
//! The fragment buffer is the only state rasterization threads share, and is resolved
//! with the nearest-wins rule: after rasterization, each slot holds the candidate with
//! the smallest depth, ties going to the smaller primitive id. Two constructions are
//! provided, a lock-free one packing depth and primitive id into a single atomic word,
//! and one guarding a full fragment record with a per-pixel lock.

use std::mem;

use nalgebra::{Point3, Vector3};

use crate::color::Color;
use crate::error::{RenderError, RenderResult};
use crate::geometry::{Dimensions, HasDimensions};
use crate::interpolate::Interpolation;
use crate::parallel::Grid;
use crate::primitive::Triangle;

pub mod atomic;
pub mod locked;
pub mod color;

pub use self::atomic::AtomicFragmentBuffer;
pub use self::locked::LockedFragmentBuffer;
pub use self::color::ColorBuffer;

/// A candidate surface sample produced by rasterizing one triangle at one pixel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fragment {
    /// Interpolated vertex color
    pub color: Color,
    /// Interpolated object-space normal, not normalized
    pub normal: Vector3<f32>,
    /// Interpolated object-space surface point
    pub position: Point3<f32>,
    /// Normalized depth in `[0, 1]`, smaller is nearer
    pub depth: f32,
    /// Index of the triangle this fragment came from
    pub primitive: u32,
}

/// Ordering key of the sentinel "no fragment" state, farther than anything
pub const EMPTY_KEY: u64 = u64::max_value();

impl Fragment {
    /// Total order used for depth resolution: depth first, then primitive id.
    ///
    /// Depth must be non-negative, where the IEEE-754 bit pattern sorts the same as the value.
    #[inline]
    pub fn key(&self) -> u64 {
        pack_key(self.depth, self.primitive)
    }
}

#[inline]
pub fn pack_key(depth: f32, primitive: u32) -> u64 {
    // Folds -0.0 into +0.0
    let depth = if depth <= 0.0 { 0.0f32 } else { depth };

    (u64::from(depth.to_bits()) << 32) | u64::from(primitive)
}

#[inline]
pub fn unpack_key(key: u64) -> (f32, u32) {
    (f32::from_bits((key >> 32) as u32), key as u32)
}

/// Which construction is used to resolve concurrent fragment writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthResolve {
    /// Compare-and-swap on a packed depth and primitive id. Attributes of the winner are
    /// re-interpolated from its triangle when the buffer is read.
    Atomic,
    /// A lock per pixel, held for the compare-and-replace of the whole fragment.
    Locked,
}

impl Default for DepthResolve {
    fn default() -> DepthResolve { DepthResolve::Atomic }
}

/// Per-pixel storage of the winning fragment
pub trait FragmentBuffer: HasDimensions + Send + Sync {
    /// Resets every slot to the background sentinel
    fn clear(&mut self, grid: &mut Grid);

    /// Offers a candidate fragment to a slot, keeping it only if it is nearer than the
    /// current occupant. Safe to call from any number of threads at once.
    ///
    /// Returns whether the candidate was the winner at the time it was checked in,
    /// it may still be overtaken by a nearer candidate later.
    fn submit(&self, index: usize, fragment: &Fragment) -> bool;

    /// Depth of the current occupant, `None` for the background sentinel
    fn depth(&self, index: usize) -> Option<f32>;

    /// The winning fragment of a slot, `None` for the background sentinel.
    ///
    /// Only meaningful after every submission for the frame has completed.
    fn resolve(&self, index: usize, triangles: &[Triangle], interpolation: Interpolation) -> Option<Fragment>;
}

/// Creates an empty fragment buffer of the given kind
pub fn new_fragment_buffer(kind: DepthResolve, dimensions: Dimensions) -> RenderResult<Box<dyn FragmentBuffer>> {
    Ok(match kind {
        DepthResolve::Atomic => Box::new(AtomicFragmentBuffer::with_dimensions(dimensions)?),
        DepthResolve::Locked => Box::new(LockedFragmentBuffer::with_dimensions(dimensions)?),
    })
}

/// Allocates a buffer of `len` elements, reporting allocation failure instead of aborting.
pub(crate) fn allocate<T, F>(what: &'static str, len: usize, mut init: F) -> RenderResult<Vec<T>> where F: FnMut() -> T {
    let exhausted = RenderError::ResourceExhausted {
        what,
        bytes: len.saturating_mul(mem::size_of::<T>()),
    };

    let mut buffer = Vec::new();

    if buffer.try_reserve_exact(len).is_err() {
        return Err(exhausted);
    }

    buffer.extend((0..len).map(|_| init()));

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_orders_by_depth_then_primitive() {
        assert!(pack_key(0.2, 9) < pack_key(0.8, 0));
        assert!(pack_key(0.5, 1) < pack_key(0.5, 2));
        assert!(pack_key(1.0, u32::max_value()) < EMPTY_KEY);
        assert_eq!(pack_key(-0.0, 3), pack_key(0.0, 3));
    }

    #[test]
    fn key_round_trips() {
        assert_eq!(unpack_key(pack_key(0.375, 42)), (0.375, 42));
    }

    #[test]
    fn oversized_allocation_is_reported() {
        let result = allocate::<u64, _>("test buffer", usize::max_value() / 4, || 0);

        match result {
            Err(RenderError::ResourceExhausted { what, .. }) => assert_eq!(what, "test buffer"),
            other => panic!("expected exhaustion, got {:?}", other.map(|b| b.len())),
        }
    }
}
