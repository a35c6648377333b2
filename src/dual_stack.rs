//! Dual-stack - two cooperating stacks with O(1) promotion.
//!
//! Spans two adjacent regions used as parallel arrays indexed by value:
//!
//! | Array   | Slot `v` holds                                            |
//! |---------|-----------------------------------------------------------|
//! | `below` | next value down `v`'s stack, or `END`                     |
//! | `state` | `UNDEFINED`, `PROMOTED`, `RETIRED`, or (primary) the value |
//! |         | above `v`, or `END` when `v` is the primary top           |
//!
//! The primary stack is therefore doubly linked, which lets a member be
//! spliced out from any depth. The promoted stack only ever pushes and pops
//! at the top, so `below` alone is enough there.

use std::cell::Cell;
use std::fmt;

use crate::arena::{Word, UNDEFINED};
use crate::error::ViewError;

/// List terminator stored in link slots.
pub const END: Word = -2;

/// `state` marker for promoted values.
pub const PROMOTED: Word = -3;

/// `state` marker for values popped off either stack.
pub const RETIRED: Word = -4;

/// Where a value currently sits.
///
/// Transitions only move forward:
/// `Absent -> Primary -> Promoted -> Retired`, plus `Primary -> Retired`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Membership {
    /// Never pushed in this generation.
    Absent,
    /// On the primary stack.
    Primary,
    /// On the promoted stack.
    Promoted,
    /// Popped off one of the stacks.
    Retired,
}

/// Primary and promoted stacks sharing two arena regions.
///
/// Values are node indices in `0..len`, each owning one slot in both
/// arrays, so membership checks and promotion never search.
pub struct DualStack<'a> {
    below: &'a [Cell<Word>],
    state: &'a [Cell<Word>],
    primary_top: Word,
    promoted_top: Word,
    primary_len: usize,
    promoted_len: usize,
}

impl<'a> DualStack<'a> {
    /// Bind an empty dual-stack to two equal-length arrays.
    ///
    /// Both arrays are filled with [`UNDEFINED`].
    ///
    /// # Panics
    /// Panics if the arrays differ in length.
    pub fn new(below: &'a [Cell<Word>], state: &'a [Cell<Word>]) -> Self {
        assert_eq!(
            below.len(),
            state.len(),
            "dual-stack regions must have equal length"
        );
        for cell in below.iter().chain(state) {
            cell.set(UNDEFINED);
        }

        Self {
            below,
            state,
            primary_top: END,
            promoted_top: END,
            primary_len: 0,
            promoted_len: 0,
        }
    }

    /// Number of slots (the value domain is `0..len`).
    #[inline]
    pub fn len(&self) -> usize {
        self.state.len()
    }

    /// Returns true if both stacks are empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.primary_len == 0 && self.promoted_len == 0
    }

    #[inline]
    pub fn primary_len(&self) -> usize {
        self.primary_len
    }

    #[inline]
    pub fn promoted_len(&self) -> usize {
        self.promoted_len
    }

    #[inline]
    fn check(&self, value: usize) -> Result<usize, ViewError> {
        if value < self.len() {
            Ok(value)
        } else {
            Err(ViewError::ValueOutOfRange {
                value,
                len: self.len(),
            })
        }
    }

    /// Current membership of `value`.
    ///
    /// # Panics
    /// Panics if `value` is outside `0..len`.
    #[inline]
    pub fn membership(&self, value: usize) -> Membership {
        match self.state[value].get() {
            UNDEFINED => Membership::Absent,
            PROMOTED => Membership::Promoted,
            RETIRED => Membership::Retired,
            _ => Membership::Primary,
        }
    }

    /// Push `value` onto the primary stack, or promote it if it is already
    /// there. Returns the resulting membership.
    ///
    /// Promoted and retired values are left alone.
    ///
    /// # Panics
    /// Panics if `value` is outside `0..len`.
    #[inline]
    pub fn push_or_promote(&mut self, value: usize) -> Membership {
        match self.try_push_or_promote(value) {
            Ok(membership) => membership,
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible [`push_or_promote`](Self::push_or_promote).
    ///
    /// # Complexity
    /// O(1)
    pub fn try_push_or_promote(&mut self, value: usize) -> Result<Membership, ViewError> {
        let value = self.check(value)?;

        Ok(match self.membership(value) {
            Membership::Absent => {
                self.push_primary(value);
                Membership::Primary
            }
            Membership::Primary => {
                self.unlink_primary(value);
                self.push_promoted(value);
                Membership::Promoted
            }
            settled => settled,
        })
    }

    /// Remove and return the top of the primary stack.
    ///
    /// # Complexity
    /// O(1)
    pub fn pop_primary(&mut self) -> Option<usize> {
        let value = slot(self.primary_top)?;
        self.unlink_primary(value);
        self.retire(value);
        Some(value)
    }

    /// Remove and return the top of the promoted stack.
    ///
    /// # Complexity
    /// O(1)
    pub fn pop_promoted(&mut self) -> Option<usize> {
        let value = slot(self.promoted_top)?;
        self.promoted_top = self.below[value].get();
        self.promoted_len -= 1;
        self.retire(value);
        Some(value)
    }

    /// Top of the primary stack.
    #[inline]
    pub fn peek_primary(&self) -> Option<usize> {
        slot(self.primary_top)
    }

    /// Top of the promoted stack.
    #[inline]
    pub fn peek_promoted(&self) -> Option<usize> {
        slot(self.promoted_top)
    }

    /// Primary members from top to bottom.
    pub fn primary_iter(&self) -> Chain<'a> {
        Chain {
            below: self.below,
            cursor: self.primary_top,
        }
    }

    /// Promoted members from top to bottom.
    pub fn promoted_iter(&self) -> Chain<'a> {
        Chain {
            below: self.below,
            cursor: self.promoted_top,
        }
    }

    fn push_primary(&mut self, value: usize) {
        let link = value as Word;
        self.below[value].set(self.primary_top);
        self.state[value].set(END);
        if let Some(top) = slot(self.primary_top) {
            self.state[top].set(link);
        }
        self.primary_top = link;
        self.primary_len += 1;
    }

    /// Splice `value` out of the primary list.
    fn unlink_primary(&mut self, value: usize) {
        let below = self.below[value].get();
        let above = self.state[value].get();
        debug_assert!(above >= 0 || above == END, "value {value} is not a primary member");

        match slot(above) {
            Some(above) => self.below[above].set(below),
            None => {
                debug_assert_eq!(self.primary_top, value as Word);
                self.primary_top = below;
            }
        }
        if let Some(below) = slot(below) {
            self.state[below].set(above);
        }
        self.primary_len -= 1;
    }

    fn push_promoted(&mut self, value: usize) {
        self.below[value].set(self.promoted_top);
        self.state[value].set(PROMOTED);
        self.promoted_top = value as Word;
        self.promoted_len += 1;
    }

    #[inline]
    fn retire(&mut self, value: usize) {
        self.below[value].set(END);
        self.state[value].set(RETIRED);
    }
}

/// Link word to slot index; `None` for `END`.
#[inline]
fn slot(link: Word) -> Option<usize> {
    usize::try_from(link).ok()
}

impl fmt::Debug for DualStack<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DualStack")
            .field("primary", &self.primary_iter().collect::<Vec<_>>())
            .field("promoted", &self.promoted_iter().collect::<Vec<_>>())
            .finish()
    }
}

/// Walks one stack of a [`DualStack`] from top to bottom.
pub struct Chain<'a> {
    below: &'a [Cell<Word>],
    cursor: Word,
}

impl Iterator for Chain<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let value = slot(self.cursor)?;
        self.cursor = self.below[value].get();
        Some(value)
    }
}
