//! Tile staging: shared scratch for one team's worth of elements
//!
//! A [`Tile`] copies one team-sized chunk of the caller's buffer into
//! cache-line-aligned scratch, lets the lanes mutate it round-by-round,
//! and copies it back out on writeback. The scratch is the only memory
//! shared between lanes during a sort.
//!
//! Race freedom rests on two rules the networks uphold:
//!
//! 1. Within a round, each scratch slot is written by at most one lane
//!    (the bitonic network's pair owner, or the odd-even network's
//!    own-slot writer).
//! 2. A write in one round and any other lane's access to the same slot
//!    are always separated by a barrier rendezvous.
//!
//! Loading happens before the lane threads are spawned and writeback
//! after they are joined, so the spawn and join edges stand in for the
//! load-side and writeback-side barriers of the round loop.

use std::cell::UnsafeCell;

use aligned_vec::AVec;

use crate::team::TeamSize;

/// Shared scratch holding one tile of elements for the duration of a
/// single sort call. Created by [`Tile::load`], consumed by
/// [`Tile::writeback`]; never reused across sorts.
pub struct Tile<T> {
    slots: AVec<UnsafeCell<T>>,
}

// The slots are only touched concurrently under the single-writer-per-
// slot and barrier-separation rules documented on the module; with
// those upheld, sharing the tile across lane threads is sound.
unsafe impl<T: Send> Sync for Tile<T> {}

impl<T: Copy> Tile<T> {
    /// Stage one team's worth of elements into aligned scratch.
    ///
    /// # Arguments
    ///
    /// * `team` - The team size; exactly `team.lanes()` elements are read
    /// * `range` - The tile's range of the caller's buffer; its length
    ///   must equal the lane count (validated by the entry points)
    pub fn load(team: TeamSize, range: &[T]) -> Tile<T> {
        debug_assert_eq!(range.len(), team.lanes());
        Tile {
            slots: AVec::from_iter(64, range.iter().map(|&v| UnsafeCell::new(v))),
        }
    }

    /// Number of slots in the tile (equals the lane count).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the tile is empty. Only a zero-lane team would produce
    /// this, and [`TeamSize`] rejects zero, so this is `false` for every
    /// tile the crate constructs.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Commit the sorted scratch back to the caller's buffer.
    ///
    /// Consuming `self` enforces the one-sort lifetime: a tile cannot
    /// outlive its writeback.
    pub fn writeback(mut self, range: &mut [T]) {
        debug_assert_eq!(range.len(), self.slots.len());
        for (out, slot) in range.iter_mut().zip(self.slots.iter_mut()) {
            *out = *slot.get_mut();
        }
    }

    /// Read one slot from a lane.
    ///
    /// # Safety
    ///
    /// No lane may be writing `slot` concurrently: the caller must be
    /// reading pre-round state, i.e. the last write to `slot` happened
    /// before a barrier the calling lane has already passed.
    pub(crate) unsafe fn lane_read(&self, slot: usize) -> T {
        debug_assert!(slot < self.slots.len());
        *self.slots[slot].get()
    }

    /// Write one slot from a lane.
    ///
    /// # Safety
    ///
    /// The calling lane must be the round's unique writer of `slot`, and
    /// every other lane's access to `slot` must be separated from this
    /// write by a barrier.
    pub(crate) unsafe fn lane_write(&self, slot: usize, value: T) {
        debug_assert!(slot < self.slots.len());
        *self.slots[slot].get() = value;
    }

    /// Exclusive view of the scratch for the lockstep executor, which
    /// steps all lanes on one thread and needs no sharing.
    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        let cells: &mut [UnsafeCell<T>] = &mut self.slots;
        // UnsafeCell<T> is repr(transparent) over T and the borrow is
        // exclusive, so reinterpreting the slice is sound.
        unsafe { &mut *(cells as *mut [UnsafeCell<T>] as *mut [T]) }
    }
}
