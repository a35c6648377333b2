//! Queue view - a fixed-capacity FIFO ring bound to one arena region.

use std::cell::Cell;
use std::fmt;

use crate::arena::Word;
use crate::error::ViewError;

/// FIFO queue over a region's words.
///
/// Capacity is the region length at the time the view was made. The view
/// never grows: growing would mean moving words the arena shares with other
/// views, so pushing past capacity is fatal.
pub struct QueueView<'a> {
    /// Aliased region storage
    cells: &'a [Cell<Word>],
    /// Slot of the oldest element
    head: usize,
    /// Number of queued elements
    len: usize,
}

impl<'a> QueueView<'a> {
    /// Bind an empty queue to `cells`.
    #[inline]
    pub fn new(cells: &'a [Cell<Word>]) -> Self {
        Self {
            cells,
            head: 0,
            len: 0,
        }
    }

    /// Append to the back of the queue.
    ///
    /// # Panics
    /// Panics if the queue is full.
    #[inline]
    pub fn push(&mut self, value: Word) {
        if let Err(err) = self.try_push(value) {
            panic!("{err}");
        }
    }

    /// Append to the back of the queue, or report that it is full.
    ///
    /// # Complexity
    /// O(1)
    #[inline]
    pub fn try_push(&mut self, value: Word) -> Result<(), ViewError> {
        let capacity = self.capacity();
        if self.len == capacity {
            return Err(ViewError::Full { capacity });
        }

        let mut tail = self.head + self.len;
        if tail >= capacity {
            tail -= capacity;
        }
        self.cells[tail].set(value);
        self.len += 1;
        Ok(())
    }

    /// Remove and return the front of the queue.
    ///
    /// # Complexity
    /// O(1)
    #[inline]
    pub fn pop(&mut self) -> Option<Word> {
        if self.len == 0 {
            return None;
        }

        let value = self.cells[self.head].get();
        self.head += 1;
        if self.head == self.capacity() {
            self.head = 0;
        }
        self.len -= 1;
        Some(value)
    }

    /// Front of the queue without removing it.
    #[inline]
    pub fn peek(&self) -> Option<Word> {
        (self.len > 0).then(|| self.cells[self.head].get())
    }

    /// Number of queued elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if nothing is queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if the next push would fail.
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

    /// Empty the queue. Stored words are left as they are.
    #[inline]
    pub fn reset(&mut self) {
        self.head = 0;
        self.len = 0;
    }

    /// The aliased words backing this queue.
    #[inline]
    pub fn backing(&self) -> &'a [Cell<Word>] {
        self.cells
    }
}

impl fmt::Debug for QueueView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueueView")
            .field("head", &self.head)
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(n: usize) -> Vec<Cell<Word>> {
        (0..n).map(|_| Cell::new(0)).collect()
    }

    #[test]
    fn test_fifo_order() {
        let storage = cells(4);
        let mut queue = QueueView::new(&storage);

        queue.push(10);
        queue.push(20);
        queue.push(30);

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.peek(), Some(10));
        assert_eq!(queue.pop(), Some(10));
        assert_eq!(queue.pop(), Some(20));
        assert_eq!(queue.pop(), Some(30));
        assert!(queue.pop().is_none());
    }

    #[test]
    fn test_wraparound() {
        let storage = cells(3);
        let mut queue = QueueView::new(&storage);

        for round in 0..5 {
            queue.push(round);
            queue.push(round + 100);
            assert_eq!(queue.pop(), Some(round));
            assert_eq!(queue.pop(), Some(round + 100));
        }
        assert!(queue.is_empty());
    }

    #[test]
    fn test_full_is_reported() {
        let storage = cells(2);
        let mut queue = QueueView::new(&storage);

        queue.push(1);
        queue.push(2);
        assert!(queue.is_full());
        assert_eq!(queue.try_push(3), Err(ViewError::Full { capacity: 2 }));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    #[should_panic(expected = "view is full")]
    fn test_push_past_capacity_panics() {
        let storage = cells(1);
        let mut queue = QueueView::new(&storage);
        queue.push(1);
        queue.push(2);
    }

    #[test]
    fn test_zero_capacity() {
        let storage = cells(0);
        let mut queue = QueueView::new(&storage);
        assert!(queue.is_full());
        assert!(queue.try_push(1).is_err());
        assert!(queue.pop().is_none());
    }

    #[test]
    fn test_reset_keeps_words() {
        let storage = cells(2);
        let mut queue = QueueView::new(&storage);
        queue.push(7);
        queue.reset();

        assert!(queue.is_empty());
        assert!(!queue.auto_grow());
        assert_eq!(storage[0].get(), 7);
    }
}
