//! Bit-set view - a fixed-length bit set tiled over arena words.
//!
//! A view covers `words_for_bits(bit_len)` contiguous words. Bounds are
//! settled when [`Views::bitsets`](crate::Views::bitsets) carves the region;
//! per-bit access only debug-asserts the index.

use std::cell::Cell;
use std::fmt;

use crate::arena::{Word, WORD_BITS};

const SHIFT: u32 = WORD_BITS.trailing_zeros();
const MASK: usize = WORD_BITS - 1;

/// Minimum number of words required to cover `nbits` bits.
#[inline]
pub const fn words_for_bits(nbits: usize) -> usize {
    nbits.div_ceil(WORD_BITS)
}

/// A bit set of `bit_len` bits stored in aliased arena words.
///
/// Words are read as `usize` bit patterns, so any value written to the
/// region through another view shows up here unchanged.
#[derive(Clone, Copy)]
pub struct BitsetView<'a> {
    words: &'a [Cell<Word>],
    bit_len: usize,
}

impl<'a> BitsetView<'a> {
    /// Bind a bit set of `bit_len` bits to `words`.
    ///
    /// # Panics
    /// Panics if `words` is not exactly `words_for_bits(bit_len)` long.
    pub fn new(words: &'a [Cell<Word>], bit_len: usize) -> Self {
        assert_eq!(
            words.len(),
            words_for_bits(bit_len),
            "bit-set of {bit_len} bits needs {} words",
            words_for_bits(bit_len)
        );
        Self { words, bit_len }
    }

    #[inline]
    fn locate(&self, i: usize) -> (&'a Cell<Word>, usize) {
        debug_assert!(i < self.bit_len, "bit {i} out of range 0..{}", self.bit_len);
        (&self.words[i >> SHIFT], 1 << (i & MASK))
    }

    #[inline]
    fn load(cell: &Cell<Word>) -> usize {
        cell.get() as usize
    }

    #[inline]
    fn store(cell: &Cell<Word>, bits: usize) {
        cell.set(bits as Word);
    }

    /// Word `index` with bits past `bit_len` masked off.
    #[inline]
    fn logical_word(&self, index: usize) -> usize {
        let word = Self::load(&self.words[index]);
        let tail = self.bit_len & MASK;
        if tail != 0 && index == self.words.len() - 1 {
            word & ((1 << tail) - 1)
        } else {
            word
        }
    }

    /// Returns true if bit `i` is set.
    #[inline]
    pub fn get(&self, i: usize) -> bool {
        let (cell, bit) = self.locate(i);
        Self::load(cell) & bit != 0
    }

    /// Set bit `i`.
    #[inline]
    pub fn set(&self, i: usize) {
        let (cell, bit) = self.locate(i);
        Self::store(cell, Self::load(cell) | bit);
    }

    /// Clear bit `i`.
    #[inline]
    pub fn clear(&self, i: usize) {
        let (cell, bit) = self.locate(i);
        Self::store(cell, Self::load(cell) & !bit);
    }

    /// Flip bit `i`.
    #[inline]
    pub fn toggle(&self, i: usize) {
        let (cell, bit) = self.locate(i);
        Self::store(cell, Self::load(cell) ^ bit);
    }

    /// Set bit `i` if it was clear. Returns true if it changed.
    #[inline]
    pub fn compare_and_set(&self, i: usize) -> bool {
        let (cell, bit) = self.locate(i);
        let word = Self::load(cell);
        if word & bit == 0 {
            Self::store(cell, word | bit);
            true
        } else {
            false
        }
    }

    /// Clear bit `i` if it was set. Returns true if it changed.
    #[inline]
    pub fn compare_and_clear(&self, i: usize) -> bool {
        let (cell, bit) = self.locate(i);
        let word = Self::load(cell);
        if word & bit != 0 {
            Self::store(cell, word & !bit);
            true
        } else {
            false
        }
    }

    /// Flip bit `i` if its current value equals `state`.
    pub fn compare_and_toggle(&self, i: usize, state: bool) -> bool {
        if state {
            self.compare_and_clear(i)
        } else {
            self.compare_and_set(i)
        }
    }

    /// Number of set bits within `bit_len`.
    pub fn count_ones(&self) -> usize {
        (0..self.words.len())
            .map(|index| self.logical_word(index).count_ones() as usize)
            .sum()
    }

    /// Offsets of set bits, ascending.
    pub fn offsets(&self) -> Offsets<'a> {
        Offsets {
            view: *self,
            index: 0,
            current: if self.words.is_empty() { 0 } else { self.logical_word(0) },
        }
    }

    /// Append offsets of set bits to `out`.
    pub fn append_offsets(&self, out: &mut Vec<usize>) {
        out.extend(self.offsets());
    }

    /// Clear every bit.
    pub fn reset(&self) {
        for cell in self.words {
            cell.set(0);
        }
    }

    /// Number of logical bits.
    #[inline]
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// The aliased words backing this bit set.
    #[inline]
    pub fn words(&self) -> &'a [Cell<Word>] {
        self.words
    }
}

impl fmt::Debug for BitsetView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.offsets()).finish()
    }
}

/// Iterator over set-bit offsets of a [`BitsetView`].
pub struct Offsets<'a> {
    view: BitsetView<'a>,
    index: usize,
    /// Remaining bits of the word at `index`
    current: usize,
}

impl Iterator for Offsets<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        loop {
            if self.current != 0 {
                let bit = self.current.trailing_zeros() as usize;
                self.current &= self.current - 1;
                return Some((self.index << SHIFT) + bit);
            }
            self.index += 1;
            if self.index >= self.view.words.len() {
                return None;
            }
            self.current = self.view.logical_word(self.index);
        }
    }
}
