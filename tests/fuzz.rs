//! Fuzz Test - Compares arena views against naive reference structures.
//!
//! Each reference is slow but obviously correct: vectors with linear
//! search. The views must agree with them after every operation.

use graph_scratch::{Arena, ClearSpec, Membership, Region, RegionPair, Word};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// Simple reference dual-stack for verification
struct ReferenceDualStack {
    primary: Vec<usize>,
    promoted: Vec<usize>,
    retired: Vec<usize>,
}

impl ReferenceDualStack {
    fn new() -> Self {
        Self {
            primary: Vec::new(),
            promoted: Vec::new(),
            retired: Vec::new(),
        }
    }

    fn membership(&self, value: usize) -> Membership {
        if self.primary.contains(&value) {
            Membership::Primary
        } else if self.promoted.contains(&value) {
            Membership::Promoted
        } else if self.retired.contains(&value) {
            Membership::Retired
        } else {
            Membership::Absent
        }
    }

    fn push_or_promote(&mut self, value: usize) -> Membership {
        match self.membership(value) {
            Membership::Absent => {
                self.primary.push(value);
                Membership::Primary
            }
            Membership::Primary => {
                self.primary.retain(|&v| v != value);
                self.promoted.push(value);
                Membership::Promoted
            }
            settled => settled,
        }
    }

    fn pop_primary(&mut self) -> Option<usize> {
        let value = self.primary.pop()?;
        self.retired.push(value);
        Some(value)
    }

    fn pop_promoted(&mut self) -> Option<usize> {
        let value = self.promoted.pop()?;
        self.retired.push(value);
        Some(value)
    }
}

#[test]
fn test_fuzz_dual_stack() {
    const SEED: u64 = 0xFEEDFACE;
    const RUNS: usize = 200;
    const OPS: usize = 500;

    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    let mut arena = Arena::new(1);

    for run in 0..RUNS {
        let size = rng.gen_range(1..200);
        arena.reset(size, ClearSpec::none());
        let pair = if rng.gen_bool(0.5) { RegionPair::AB } else { RegionPair::BC };

        let views = arena.views();
        let mut stack = views.dual_stack(pair);
        let mut reference = ReferenceDualStack::new();

        for i in 0..OPS {
            match rng.gen_range(0..10) {
                0..=5 => {
                    let value = rng.gen_range(0..size);
                    assert_eq!(
                        stack.push_or_promote(value),
                        reference.push_or_promote(value),
                        "push_or_promote({value}) mismatch at run {run} op {i}"
                    );
                }
                6 | 7 => assert_eq!(stack.pop_primary(), reference.pop_primary(), "run {run} op {i}"),
                _ => assert_eq!(stack.pop_promoted(), reference.pop_promoted(), "run {run} op {i}"),
            }

            assert_eq!(stack.primary_len(), reference.primary.len());
            assert_eq!(stack.promoted_len(), reference.promoted.len());
        }

        // Full order check: iterators walk top to bottom
        let primary: Vec<usize> = reference.primary.iter().rev().copied().collect();
        let promoted: Vec<usize> = reference.promoted.iter().rev().copied().collect();
        assert_eq!(stack.primary_iter().collect::<Vec<_>>(), primary, "run {run}");
        assert_eq!(stack.promoted_iter().collect::<Vec<_>>(), promoted, "run {run}");
        for value in 0..size {
            assert_eq!(stack.membership(value), reference.membership(value));
        }
    }
}

#[test]
fn test_fuzz_queue_and_stack() {
    const SEED: u64 = 0xC0FFEE;
    const OPS: usize = 20_000;

    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    let mut arena = Arena::new(64);
    let views = arena.views();
    let mut queue = views.queue(Region::A);
    let mut stack = views.stack(Region::B);
    let mut ref_queue: VecDeque<Word> = VecDeque::new();
    let mut ref_stack: Vec<Word> = Vec::new();

    for i in 0..OPS {
        let value: Word = rng.gen_range(-1000..1000);
        if rng.gen_bool(0.55) {
            let pushed = queue.try_push(value).is_ok();
            assert_eq!(pushed, ref_queue.len() < 64, "queue push at op {i}");
            if pushed {
                ref_queue.push_back(value);
            }
        } else {
            assert_eq!(queue.pop(), ref_queue.pop_front(), "queue pop at op {i}");
        }

        if rng.gen_bool(0.55) {
            let pushed = stack.try_push(value).is_ok();
            assert_eq!(pushed, ref_stack.len() < 64, "stack push at op {i}");
            if pushed {
                ref_stack.push(value);
            }
        } else {
            assert_eq!(stack.pop(), ref_stack.pop(), "stack pop at op {i}");
        }

        assert_eq!(queue.len(), ref_queue.len());
        assert_eq!(queue.peek(), ref_queue.front().copied());
        assert_eq!(stack.peek(), ref_stack.last().copied());
    }
}

#[test]
fn test_fuzz_bitsets() {
    const SEED: u64 = 0xB175;
    const OPS: usize = 10_000;

    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    let size = 300;
    let mut arena = Arena::new(size);
    let views = arena.views();
    let sets = views.bitsets(3, Region::C);
    let mut reference = vec![vec![false; size]; 3];

    for i in 0..OPS {
        let which = rng.gen_range(0..3);
        let bit = rng.gen_range(0..size);
        let (set, model) = (&sets[which], &mut reference[which]);

        match rng.gen_range(0..5) {
            0 => {
                set.set(bit);
                model[bit] = true;
            }
            1 => {
                set.clear(bit);
                model[bit] = false;
            }
            2 => {
                set.toggle(bit);
                model[bit] = !model[bit];
            }
            3 => {
                assert_eq!(set.compare_and_set(bit), !model[bit], "op {i}");
                model[bit] = true;
            }
            _ => {
                assert_eq!(set.compare_and_clear(bit), model[bit], "op {i}");
                model[bit] = false;
            }
        }
        assert_eq!(set.get(bit), model[bit]);
    }

    for (set, model) in sets.iter().zip(&reference) {
        let expected: Vec<usize> = (0..size).filter(|&i| model[i]).collect();
        assert_eq!(set.offsets().collect::<Vec<_>>(), expected);
        assert_eq!(set.count_ones(), expected.len());
    }
}
