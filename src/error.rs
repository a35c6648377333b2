//! Misuse errors for views.
//!
//! Every condition here means the caller broke a sizing or aliasing rule.
//! The panicking entry points (`push`, `bitsets`, ...) treat them as fatal;
//! the `try_*` twins hand them back for callers that want to check first.

use thiserror::Error;

use crate::arena::Region;

/// A view was used in a way that would corrupt neighbouring aliases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ViewError {
    /// Push on a fixed-capacity queue or stack that is already full.
    #[error("view is full (capacity {capacity}); views over arena regions cannot grow")]
    Full {
        /// Fixed capacity of the view.
        capacity: usize,
    },

    /// Bit-set partition does not fit in the region.
    #[error("bit-set partition needs {requested} words but the region holds {available}")]
    BitsetOverflow {
        /// Words needed: `n * words_for_bits(len)`.
        requested: usize,
        /// Word capacity of the region.
        available: usize,
    },

    /// Dual-stack requested over regions that are not an adjacent pair.
    #[error("regions {first:?} and {second:?} are not an adjacent pair")]
    NotAdjacent {
        /// Lower region of the request.
        first: Region,
        /// Upper region of the request.
        second: Region,
    },

    /// Dual-stack value outside `0..len`.
    #[error("value {value} is outside the dual-stack domain 0..{len}")]
    ValueOutOfRange {
        /// Offending value.
        value: usize,
        /// Number of slots in the dual-stack.
        len: usize,
    },
}
