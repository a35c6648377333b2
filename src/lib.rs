//! # Graph-Scratch
//!
//! Reusable scratch memory for graph traversals (BFS, DFS, SCC, ...).
//!
//! ## Design Principles
//!
//! - **One Buffer**: Three equal regions carved from a single flat allocation
//! - **Aliasing Views**: Queues, stacks and bit sets reinterpret the same words
//! - **No Per-Run Allocation**: `reset` re-slices in place until capacity runs out
//! - **O(1) Promotion**: The dual-stack moves values between stacks via index links
//!
//! ## Architecture
//!
//! ```text
//! Arena ── reset(size, ClearSpec) ──> [A | B | C]   (stride = capacity)
//!   │
//!   └── views() -> Views<'_>   (one generation, borrows the arena)
//!         ├── queue(C) / stack(C)      fixed-capacity FIFO / LIFO
//!         ├── bitsets(n, C)            n tiled bit sets of len bits
//!         └── dual_stack(AB | BC)      primary + promoted stacks
//! ```
//!
//! ## Example
//!
//! ```
//! use graph_scratch::{Arena, ClearSpec, Region, RegionPair, Membership};
//!
//! let mut arena = Arena::new(8);
//! arena.reset(6, ClearSpec::none().zero(Region::C));
//!
//! let views = arena.views();
//! let mut stack = views.dual_stack(RegionPair::AB);
//! let [seen] = views.bitset_array::<1>(Region::C);
//!
//! seen.set(3);
//! stack.push_or_promote(3);
//! assert_eq!(stack.push_or_promote(3), Membership::Promoted);
//! assert_eq!(stack.pop_promoted(), Some(3));
//! ```

pub mod arena;
pub mod bitset;
pub mod clear;
pub mod dual_stack;
pub mod error;
pub mod queue;
pub mod stack;
pub mod trace;
pub mod views;

// Re-exports for convenience
pub use arena::{Arena, Region, RegionPair, Word, UNDEFINED, WORD_BITS};
pub use bitset::{words_for_bits, BitsetView};
pub use clear::{Clear, ClearSpec};
pub use dual_stack::{DualStack, Membership};
pub use error::ViewError;
pub use queue::QueueView;
pub use stack::StackView;
pub use trace::{Op, ReplaySummary, Replayer, TraceError};
pub use views::Views;
