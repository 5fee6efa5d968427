//! Lock-free fragment buffer

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::RenderResult;
use crate::geometry::{Dimensions, HasDimensions};
use crate::interpolate::Interpolation;
use crate::parallel::Grid;
use crate::primitive::Triangle;

use super::{allocate, unpack_key, Fragment, FragmentBuffer, EMPTY_KEY};

/// Fragment buffer storing one packed `(depth, primitive)` word per pixel.
///
/// A submission only ever lowers the stored key, so the final value is the minimum over
/// all candidates no matter how submissions interleave. The winner's attributes are a pure
/// function of its triangle and the pixel, and are recomputed on read.
pub struct AtomicFragmentBuffer {
    dimensions: Dimensions,
    slots: Vec<AtomicU64>,
}

impl AtomicFragmentBuffer {
    pub fn with_dimensions(dimensions: Dimensions) -> RenderResult<AtomicFragmentBuffer> {
        Ok(AtomicFragmentBuffer {
            dimensions,
            slots: allocate("fragment buffer", dimensions.area(), || AtomicU64::new(EMPTY_KEY))?,
        })
    }

    /// Raw packed key of a slot
    #[inline]
    pub fn key(&self, index: usize) -> u64 {
        self.slots[index].load(Ordering::Relaxed)
    }
}

impl HasDimensions for AtomicFragmentBuffer {
    #[inline]
    fn dimensions(&self) -> Dimensions { self.dimensions }
}

impl FragmentBuffer for AtomicFragmentBuffer {
    fn clear(&mut self, grid: &mut Grid) {
        grid.map(&mut self.slots, |_, slot| *slot.get_mut() = EMPTY_KEY);
    }

    fn submit(&self, index: usize, fragment: &Fragment) -> bool {
        let slot = &self.slots[index];

        let candidate = fragment.key();

        // Stage barriers order these stores with the reads of the next stage,
        // so only atomicity of the slot itself is needed here.
        let mut current = slot.load(Ordering::Relaxed);

        while candidate < current {
            match slot.compare_exchange_weak(current, candidate, Ordering::Relaxed, Ordering::Relaxed) {
                Ok(_) => return true,
                Err(actual) => current = actual,
            }
        }

        false
    }

    fn depth(&self, index: usize) -> Option<f32> {
        match self.key(index) {
            EMPTY_KEY => None,
            key => Some(unpack_key(key).0),
        }
    }

    fn resolve(&self, index: usize, triangles: &[Triangle], interpolation: Interpolation) -> Option<Fragment> {
        let key = self.key(index);

        if key == EMPTY_KEY {
            return None;
        }

        let (_, primitive) = unpack_key(key);

        let pixel = self.dimensions.coordinate(index);

        triangles.get(primitive as usize)
                 .and_then(|triangle| triangle.setup(self.dimensions))
                 .and_then(|setup| setup.sample(pixel, primitive, interpolation))
    }
}
