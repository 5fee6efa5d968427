//! Fragment buffer with a lock per pixel

use parking_lot::Mutex;

use crate::error::RenderResult;
use crate::geometry::{Dimensions, HasDimensions};
use crate::interpolate::Interpolation;
use crate::parallel::Grid;
use crate::primitive::Triangle;

use super::{allocate, Fragment, FragmentBuffer};

/// Fragment buffer holding full fragment records, each behind its own lock.
///
/// The lock is held for the whole compare-and-replace, so a fragment is never observed
/// partially written.
pub struct LockedFragmentBuffer {
    dimensions: Dimensions,
    slots: Vec<Mutex<Option<Fragment>>>,
}

impl LockedFragmentBuffer {
    pub fn with_dimensions(dimensions: Dimensions) -> RenderResult<LockedFragmentBuffer> {
        Ok(LockedFragmentBuffer {
            dimensions,
            slots: allocate("fragment buffer", dimensions.area(), || Mutex::new(None))?,
        })
    }
}

impl HasDimensions for LockedFragmentBuffer {
    #[inline]
    fn dimensions(&self) -> Dimensions { self.dimensions }
}

impl FragmentBuffer for LockedFragmentBuffer {
    fn clear(&mut self, grid: &mut Grid) {
        grid.map(&mut self.slots, |_, slot| *slot.get_mut() = None);
    }

    fn submit(&self, index: usize, fragment: &Fragment) -> bool {
        let mut slot = self.slots[index].lock();

        let nearer = match *slot {
            Some(ref current) => fragment.key() < current.key(),
            None => true,
        };

        if nearer {
            *slot = Some(*fragment);
        }

        nearer
    }

    fn depth(&self, index: usize) -> Option<f32> {
        let slot = *self.slots[index].lock();

        slot.map(|fragment| fragment.depth)
    }

    fn resolve(&self, index: usize, _: &[Triangle], _: Interpolation) -> Option<Fragment> {
        *self.slots[index].lock()
    }
}
