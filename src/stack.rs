//! Stack view - a fixed-capacity LIFO bound to one arena region.

use std::cell::Cell;
use std::fmt;

use crate::arena::Word;
use crate::error::ViewError;

/// LIFO stack over a region's words.
///
/// Same fixed-capacity rule as [`QueueView`](crate::QueueView).
pub struct StackView<'a> {
    cells: &'a [Cell<Word>],
    /// Number of stacked elements; the top lives at `len - 1`
    len: usize,
}

impl<'a> StackView<'a> {
    /// Bind an empty stack to `cells`.
    #[inline]
    pub fn new(cells: &'a [Cell<Word>]) -> Self {
        Self { cells, len: 0 }
    }

    /// Push onto the top.
    ///
    /// # Panics
    /// Panics if the stack is full.
    #[inline]
    pub fn push(&mut self, value: Word) {
        if let Err(err) = self.try_push(value) {
            panic!("{err}");
        }
    }

    /// Push onto the top, or report that the stack is full.
    #[inline]
    pub fn try_push(&mut self, value: Word) -> Result<(), ViewError> {
        let Some(slot) = self.cells.get(self.len) else {
            return Err(ViewError::Full {
                capacity: self.capacity(),
            });
        };
        slot.set(value);
        self.len += 1;
        Ok(())
    }

    /// Remove and return the top.
    #[inline]
    pub fn pop(&mut self) -> Option<Word> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        Some(self.cells[self.len].get())
    }

    /// Top of the stack without removing it.
    #[inline]
    pub fn peek(&self) -> Option<Word> {
        self.len.checked_sub(1).map(|top| self.cells[top].get())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Fixed capacity (the region length).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    /// Always false: region views never grow.
    #[inline]
    pub const fn auto_grow(&self) -> bool {
        false
    }

    /// Empty the stack. Stored words are left as they are.
    #[inline]
    pub fn reset(&mut self) {
        self.len = 0;
    }

    /// The aliased words backing this stack.
    #[inline]
    pub fn backing(&self) -> &'a [Cell<Word>] {
        self.cells
    }
}

impl fmt::Debug for StackView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackView")
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .finish()
    }
}
