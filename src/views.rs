//! Generation handle - hands out typed views over arena regions.
//!
//! A [`Views`] is obtained from [`Arena::views`](crate::Arena::views) and
//! borrows the arena mutably for its whole lifetime. Inside that borrow the
//! buffer is a slice of `Cell`s, so any number of views may alias the same
//! words and see each other's writes at once. Once every view is dropped
//! the arena can be reset again.

use std::cell::Cell;
use std::fmt;

use crate::arena::{Region, RegionPair, Word};
use crate::bitset::{words_for_bits, BitsetView};
use crate::dual_stack::DualStack;
use crate::error::ViewError;
use crate::queue::QueueView;
use crate::stack::StackView;

/// One generation of an arena.
#[derive(Clone, Copy)]
pub struct Views<'a> {
    buffer: &'a [Cell<Word>],
    len: usize,
    capacity: usize,
}

impl<'a> Views<'a> {
    pub(crate) fn new(buffer: &'a [Cell<Word>], len: usize, capacity: usize) -> Self {
        debug_assert!(len <= capacity);
        debug_assert_eq!(buffer.len(), capacity * crate::arena::REGION_COUNT);
        Self {
            buffer,
            len,
            capacity,
        }
    }

    /// Region length for this generation.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Region stride; also the word capacity of every region.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The `len` words of `region`, shared with every other view.
    #[inline]
    pub fn region(&self, region: Region) -> &'a [Cell<Word>] {
        let start = region.index() * self.capacity;
        &self.buffer[start..start + self.len]
    }

    /// All `capacity` words reserved for `region`.
    #[inline]
    fn region_words(&self, region: Region) -> &'a [Cell<Word>] {
        let start = region.index() * self.capacity;
        &self.buffer[start..start + self.capacity]
    }

    /// An empty FIFO queue over `region`.
    #[inline]
    pub fn queue(&self, region: Region) -> QueueView<'a> {
        QueueView::new(self.region(region))
    }

    /// An empty LIFO stack over `region`.
    #[inline]
    pub fn stack(&self, region: Region) -> StackView<'a> {
        StackView::new(self.region(region))
    }

    /// Split `region` into `n` zeroed bit sets of `len` bits each.
    ///
    /// # Panics
    /// Panics if the partition does not fit; see [`try_bitsets`](Self::try_bitsets).
    pub fn bitsets(&self, n: usize, region: Region) -> Vec<BitsetView<'a>> {
        match self.try_bitsets(n, region) {
            Ok(bitsets) => bitsets,
            Err(err) => panic!("{err}"),
        }
    }

    /// Split `region` into `n` zeroed bit sets of `len` bits each.
    ///
    /// Each set takes `words_for_bits(len)` words, tiled from the start of
    /// the region. Only the words handed out are zeroed.
    ///
    /// # Complexity
    /// O(n * words_for_bits(len))
    pub fn try_bitsets(&self, n: usize, region: Region) -> Result<Vec<BitsetView<'a>>, ViewError> {
        let per_set = words_for_bits(self.len);
        let words = self.partition(n, per_set, region)?;
        Ok((0..n)
            .map(move |i| BitsetView::new(&words[i * per_set..(i + 1) * per_set], self.len))
            .collect())
    }

    /// Allocation-free form of [`bitsets`](Self::bitsets) for a fixed count.
    ///
    /// # Panics
    /// Panics if `N` sets do not fit in the region.
    pub fn bitset_array<const N: usize>(&self, region: Region) -> [BitsetView<'a>; N] {
        let per_set = words_for_bits(self.len);
        let words = match self.partition(N, per_set, region) {
            Ok(words) => words,
            Err(err) => panic!("{err}"),
        };
        std::array::from_fn(move |i| BitsetView::new(&words[i * per_set..(i + 1) * per_set], self.len))
    }

    fn partition(
        &self,
        n: usize,
        per_set: usize,
        region: Region,
    ) -> Result<&'a [Cell<Word>], ViewError> {
        let available = self.capacity;
        let requested = n.checked_mul(per_set).unwrap_or(usize::MAX);
        if requested > available {
            return Err(ViewError::BitsetOverflow {
                requested,
                available,
            });
        }

        let words = &self.region_words(region)[..requested];
        for word in words {
            word.set(0);
        }
        Ok(words)
    }

    /// A dual-stack over an adjacent region pair.
    ///
    /// The lower region holds the `below` links, the upper one the
    /// membership state. Both are filled with `UNDEFINED`.
    pub fn dual_stack(&self, pair: RegionPair) -> DualStack<'a> {
        DualStack::new(self.region(pair.lower()), self.region(pair.upper()))
    }

    /// A dual-stack over `first` and `second`, which must be adjacent.
    pub fn try_dual_stack(&self, first: Region, second: Region) -> Result<DualStack<'a>, ViewError> {
        RegionPair::new(first, second).map(|pair| self.dual_stack(pair))
    }
}

impl fmt::Debug for Views<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Views")
            .field("len", &self.len)
            .field("capacity", &self.capacity)
            .finish()
    }
}
