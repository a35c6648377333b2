//! Arena - one flat word buffer split into three equal regions.
//!
//! The buffer is sized for a graph of `capacity` nodes (a power of two) and
//! holds `3 * capacity` words. Region `X` always starts at
//! `index(X) * capacity` and is `len` words long, so shrinking or regrowing
//! within capacity is a length change only: no reallocation, no data moves.

use std::cell::Cell;
use std::fmt;
use std::ops::Range;

use tracing::{debug, trace};

use crate::clear::{Clear, ClearSpec};
use crate::error::ViewError;
use crate::views::Views;

/// A single arena cell.
pub type Word = isize;

/// Sentinel meaning "not yet visited" / "no parent".
pub const UNDEFINED: Word = -1;

/// Bits per word, as seen by bit-set views.
pub const WORD_BITS: usize = Word::BITS as usize;

/// Number of regions carved out of the buffer.
pub const REGION_COUNT: usize = 3;

/// One of the three equal-length regions of an [`Arena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Region {
    /// First region, starts at word 0.
    A = 0,
    /// Second region, starts at word `capacity`.
    B = 1,
    /// Third region, starts at word `2 * capacity`.
    C = 2,
}

impl Region {
    /// All regions in buffer order.
    pub const ALL: [Region; REGION_COUNT] = [Region::A, Region::B, Region::C];

    /// Position of the region in the buffer (0, 1 or 2).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Two adjacent regions, the only legal backing for a dual-stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegionPair {
    /// Regions A and B.
    AB,
    /// Regions B and C.
    BC,
}

impl RegionPair {
    /// Build a pair from two regions.
    ///
    /// Only `(A, B)` and `(B, C)` are accepted; everything else is a
    /// [`ViewError::NotAdjacent`].
    pub fn new(first: Region, second: Region) -> Result<Self, ViewError> {
        match (first, second) {
            (Region::A, Region::B) => Ok(RegionPair::AB),
            (Region::B, Region::C) => Ok(RegionPair::BC),
            _ => Err(ViewError::NotAdjacent { first, second }),
        }
    }

    /// The lower region of the pair.
    #[inline]
    pub const fn lower(self) -> Region {
        match self {
            RegionPair::AB => Region::A,
            RegionPair::BC => Region::B,
        }
    }

    /// The upper region of the pair.
    #[inline]
    pub const fn upper(self) -> Region {
        match self {
            RegionPair::AB => Region::B,
            RegionPair::BC => Region::C,
        }
    }
}

/// Smallest power of two that can hold `size` nodes.
///
/// # Panics
/// Panics if the resulting buffer length overflows `usize`. This is in the
/// same class as an allocation failure and is not recoverable.
pub fn capacity_for(size: usize) -> usize {
    match size
        .checked_next_power_of_two()
        .filter(|cap| cap.checked_mul(REGION_COUNT).is_some())
    {
        Some(cap) => cap,
        None => panic!("arena size {size} overflows the addressable buffer length"),
    }
}

/// Reusable scratch storage for graph traversals.
///
/// Create one per graph size class, call [`Arena::reset`] before every run,
/// then open a generation with [`Arena::views`] to get typed views. The
/// borrow checker keeps every view inside its generation: `reset` needs
/// `&mut self`, which cannot be taken while a view is alive.
pub struct Arena {
    /// Flat backing storage, always `3 * capacity` words
    buffer: Vec<Word>,

    /// Logical region length (current graph size)
    len: usize,

    /// Region stride; `len <= capacity`
    capacity: usize,
}

impl Arena {
    /// Create an arena for a graph of `size` nodes.
    ///
    /// The buffer starts zero-filled.
    pub fn new(size: usize) -> Self {
        let capacity = capacity_for(size);
        Self {
            buffer: vec![0; capacity * REGION_COUNT],
            len: size,
            capacity,
        }
    }

    /// Prepare the arena for a graph of `size` nodes and clear regions.
    ///
    /// - Same size: nothing is resized.
    /// - Within capacity: regions are re-sliced in place.
    /// - Beyond capacity: the buffer is replaced by a fresh zero-filled one.
    ///   Zero fills are skipped since they would be redundant, but
    ///   [`Clear::Undefined`] fills still run.
    ///
    /// # Complexity
    /// O(regions cleared) within capacity, O(new capacity) when growing.
    pub fn reset(&mut self, size: usize, clear: ClearSpec) {
        let mut clear = clear;

        if size == self.len {
            // No resize necessary
        } else if size <= self.capacity {
            trace!(from = self.len, to = size, capacity = self.capacity, "re-slicing regions");
            self.len = size;
        } else {
            let old_capacity = self.capacity;
            let capacity = capacity_for(size);

            // Release the old buffer before asking for the new one
            self.buffer = Vec::new();
            self.buffer = vec![0; capacity * REGION_COUNT];
            self.len = size;
            self.capacity = capacity;

            debug!(old_capacity, new_capacity = capacity, size, "arena reallocated");
            clear = clear.without_zero_fills();
        }

        self.clear(clear);
    }

    /// Apply a clear policy to the current regions without resizing.
    pub fn clear(&mut self, clear: ClearSpec) {
        for region in Region::ALL {
            let fill = match clear.get(region) {
                Clear::Keep => continue,
                Clear::Zero => 0,
                Clear::Undefined => UNDEFINED,
            };
            trace!(?region, fill, len = self.len, "clearing region");
            self.region_mut(region).fill(fill);
        }
    }

    /// Open a generation: a handle that hands out typed views.
    ///
    /// Views from one generation may alias each other freely. They all end
    /// when the returned handle's borrow ends.
    #[inline]
    pub fn views(&mut self) -> Views<'_> {
        let cells = Cell::from_mut(self.buffer.as_mut_slice()).as_slice_of_cells();
        Views::new(cells, self.len, self.capacity)
    }

    /// Current region length (graph size).
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the regions are empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Largest size reachable without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Read a region.
    #[inline]
    pub fn region(&self, region: Region) -> &[Word] {
        &self.buffer[self.region_range(region)]
    }

    /// Write a region directly (outside any generation).
    #[inline]
    pub fn region_mut(&mut self, region: Region) -> &mut [Word] {
        let range = self.region_range(region);
        &mut self.buffer[range]
    }

    /// The whole backing buffer, including words past `len` in each region.
    #[inline]
    pub fn as_slice(&self) -> &[Word] {
        &self.buffer
    }

    /// Mutable access to the whole backing buffer.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Word] {
        &mut self.buffer
    }

    /// Address of the backing buffer; changes only when `reset` reallocates.
    #[inline]
    pub fn as_ptr(&self) -> *const Word {
        self.buffer.as_ptr()
    }

    /// Memory held by the backing buffer in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.buffer.len() * std::mem::size_of::<Word>()
    }

    #[inline]
    fn region_range(&self, region: Region) -> Range<usize> {
        let start = region.index() * self.capacity;
        start..start + self.len
    }
}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("len", &self.len)
            .field("capacity", &self.capacity)
            .field("buffer_len", &self.buffer.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_is_next_power_of_two() {
        assert_eq!(capacity_for(0), 1);
        assert_eq!(capacity_for(1), 1);
        assert_eq!(capacity_for(5), 8);
        assert_eq!(capacity_for(8), 8);
        assert_eq!(capacity_for(9), 16);
    }

    #[test]
    #[should_panic(expected = "overflows")]
    fn test_capacity_overflow_is_fatal() {
        capacity_for(usize::MAX);
    }

    #[test]
    fn test_arena_creation() {
        let arena = Arena::new(8);
        assert_eq!(arena.len(), 8);
        assert_eq!(arena.capacity(), 8);
        assert_eq!(arena.as_slice().len(), 24);
        assert!(arena.as_slice().iter().all(|&w| w == 0));
        assert_eq!(arena.memory_bytes(), 24 * std::mem::size_of::<Word>());
    }

    #[test]
    fn test_empty_arena() {
        let mut arena = Arena::new(0);
        assert!(arena.is_empty());
        assert!(arena.region(Region::B).is_empty());

        arena.reset(3, ClearSpec::none());
        assert_eq!(arena.len(), 3);
        assert_eq!(arena.capacity(), 4);
    }

    #[test]
    fn test_regions_are_disjoint() {
        let mut arena = Arena::new(4);
        arena.region_mut(Region::A).fill(1);
        arena.region_mut(Region::B).fill(2);
        arena.region_mut(Region::C).fill(3);

        assert_eq!(arena.as_slice(), &[1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3]);
    }

    #[test]
    fn test_shrink_keeps_region_starts() {
        let mut arena = Arena::new(8);
        arena.reset(3, ClearSpec::none());
        arena.region_mut(Region::B).fill(7);

        // B still starts at the old stride
        assert_eq!(&arena.as_slice()[8..11], &[7, 7, 7]);
        assert_eq!(arena.as_slice()[11], 0);
    }

    #[test]
    fn test_reset_within_capacity_does_not_reallocate() {
        let mut arena = Arena::new(8);
        let ptr = arena.as_ptr();

        arena.reset(2, ClearSpec::none());
        assert_eq!(arena.as_ptr(), ptr);
        arena.reset(8, ClearSpec::none().zero(Region::A));
        assert_eq!(arena.as_ptr(), ptr);
        assert_eq!(arena.capacity(), 8);
    }

    #[test]
    fn test_same_size_reset_only_clears() {
        let mut arena = Arena::new(4);
        arena.as_mut_slice().fill(9);

        arena.reset(4, ClearSpec::none().undefined(Region::C));

        assert_eq!(arena.region(Region::A), &[9, 9, 9, 9]);
        assert_eq!(arena.region(Region::C), &[UNDEFINED; 4]);
    }

    #[test]
    fn test_grow_reallocates_and_honors_undefined() {
        let mut arena = Arena::new(4);
        arena.as_mut_slice().fill(5);

        arena.reset(
            9,
            ClearSpec::none().zero(Region::A).undefined(Region::B),
        );

        assert_eq!(arena.len(), 9);
        assert_eq!(arena.capacity(), 16);
        assert_eq!(arena.as_slice().len(), 48);
        assert_eq!(arena.region(Region::A), &[0; 9]);
        assert_eq!(arena.region(Region::B), &[UNDEFINED; 9]);
        assert_eq!(arena.region(Region::C), &[0; 9]);
    }

    #[test]
    fn test_region_pair_adjacency() {
        assert_eq!(RegionPair::new(Region::A, Region::B), Ok(RegionPair::AB));
        assert_eq!(RegionPair::new(Region::B, Region::C), Ok(RegionPair::BC));
        assert_eq!(
            RegionPair::new(Region::A, Region::C),
            Err(ViewError::NotAdjacent {
                first: Region::A,
                second: Region::C
            })
        );
        assert!(RegionPair::new(Region::B, Region::A).is_err());
        assert!(RegionPair::new(Region::B, Region::B).is_err());
        assert_eq!(RegionPair::BC.lower(), Region::B);
        assert_eq!(RegionPair::BC.upper(), Region::C);
    }
}
