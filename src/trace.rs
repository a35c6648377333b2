//! Operation traces - replay recorded arena runs deterministically.
//!
//! A trace is a CSV file with the header `op,arg,a,b,c`:
//!
//! | op             | arg         | a / b / c                          |
//! |----------------|-------------|------------------------------------|
//! | `reset`        | new size    | `keep`, `zero` or `undefined`       |
//! | `push`         | value       |                                    |
//! | `pop_primary`  |             |                                    |
//! | `pop_promoted` |             |                                    |
//! | `enqueue`      | value       |                                    |
//! | `dequeue`      |             |                                    |
//!
//! Every `reset` row starts a new run with a fresh dual-stack over regions
//! A and B and a fresh queue over region C.

use std::hash::{Hash, Hasher};
use std::io;
use std::path::Path;

use rustc_hash::FxHasher;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::arena::{Arena, Region, RegionPair, Word};
use crate::clear::ClearSpec;
use crate::error::ViewError;

/// Raw CSV row.
#[derive(Debug, Deserialize)]
pub struct TraceRow {
    pub op: String,
    #[serde(default)]
    pub arg: Option<Word>,
    #[serde(default)]
    pub a: Option<crate::Clear>,
    #[serde(default)]
    pub b: Option<crate::Clear>,
    #[serde(default)]
    pub c: Option<crate::Clear>,
}

/// A decoded trace operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    /// `Arena::reset(size, clear)`, then open a new run.
    Reset { size: usize, clear: ClearSpec },
    /// `push_or_promote(value)` on the run's dual-stack.
    Push(usize),
    PopPrimary,
    PopPromoted,
    /// Push onto the run's queue.
    Enqueue(Word),
    Dequeue,
}

/// Failure while reading or replaying a trace.
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("trace csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: unknown op {op:?}")]
    UnknownOp { line: usize, op: String },

    #[error("line {line}: op {op:?} needs an arg")]
    MissingArg { line: usize, op: String },

    #[error("line {line}: op {op:?} needs a non-negative arg, got {value}")]
    NegativeArg { line: usize, op: String, value: Word },

    #[error("replay misuse: {0}")]
    View(#[from] ViewError),
}

impl TraceRow {
    /// Decode the row; `line` is only used for error messages.
    pub fn to_op(&self, line: usize) -> Result<Op, TraceError> {
        let arg = || {
            self.arg.ok_or_else(|| TraceError::MissingArg {
                line,
                op: self.op.clone(),
            })
        };
        let index = || {
            arg().and_then(|value| {
                usize::try_from(value).map_err(|_| TraceError::NegativeArg {
                    line,
                    op: self.op.clone(),
                    value,
                })
            })
        };

        match self.op.as_str() {
            "reset" => Ok(Op::Reset {
                size: index()?,
                clear: ClearSpec::new(
                    self.a.unwrap_or_default(),
                    self.b.unwrap_or_default(),
                    self.c.unwrap_or_default(),
                ),
            }),
            "push" => Ok(Op::Push(index()?)),
            "pop_primary" => Ok(Op::PopPrimary),
            "pop_promoted" => Ok(Op::PopPromoted),
            "enqueue" => Ok(Op::Enqueue(arg()?)),
            "dequeue" => Ok(Op::Dequeue),
            other => Err(TraceError::UnknownOp {
                line,
                op: other.to_string(),
            }),
        }
    }
}

/// Decode a whole trace from any reader.
pub fn read_trace<R: io::Read>(reader: R) -> Result<Vec<Op>, TraceError> {
    decode(csv_builder().from_reader(reader))
}

/// Decode a trace file.
pub fn read_trace_path<P: AsRef<Path>>(path: P) -> Result<Vec<Op>, TraceError> {
    decode(csv_builder().from_path(path)?)
}

fn csv_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.trim(csv::Trim::All).flexible(true);
    builder
}

fn decode<R: io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<Op>, TraceError> {
    let mut ops = Vec::new();
    for (i, row) in reader.deserialize::<TraceRow>().enumerate() {
        // Line 1 is the header
        ops.push(row?.to_op(i + 2)?);
    }
    Ok(ops)
}

/// Totals and digest of a replay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Runs replayed (one per `reset`, plus a leading run if any).
    pub runs: usize,
    /// Non-reset operations applied.
    pub ops: usize,
    /// Values popped or dequeued.
    pub popped: usize,
    /// Digest of every observable result and the final memberships.
    pub state_hash: u64,
}

/// Replays traces against an owned arena.
#[derive(Debug)]
pub struct Replayer {
    arena: Arena,
}

impl Replayer {
    /// Replayer whose leading run (before any `reset`) has `size` nodes.
    pub fn new(size: usize) -> Self {
        Self {
            arena: Arena::new(size),
        }
    }

    /// The arena as left by the last replay.
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Replay `ops`, splitting them into runs at each `reset`.
    pub fn run(&mut self, ops: &[Op]) -> Result<ReplaySummary, TraceError> {
        let mut hasher = FxHasher::default();
        let mut summary = ReplaySummary::default();
        let mut i = 0;

        while i < ops.len() {
            if let Op::Reset { size, clear } = ops[i] {
                self.arena.reset(size, clear);
                i += 1;
            }
            let end = ops[i..]
                .iter()
                .position(|op| matches!(op, Op::Reset { .. }))
                .map_or(ops.len(), |offset| i + offset);

            self.run_once(&ops[i..end], &mut hasher, &mut summary)?;
            i = end;
        }

        summary.state_hash = hasher.finish();
        debug!(runs = summary.runs, ops = summary.ops, "replay finished");
        Ok(summary)
    }

    fn run_once(
        &mut self,
        ops: &[Op],
        hasher: &mut FxHasher,
        summary: &mut ReplaySummary,
    ) -> Result<(), TraceError> {
        let views = self.arena.views();
        let mut stack = views.dual_stack(RegionPair::AB);
        let mut queue = views.queue(Region::C);

        views.len().hash(hasher);
        for op in ops {
            match *op {
                Op::Push(value) => stack.try_push_or_promote(value)?.hash(hasher),
                Op::PopPrimary => record(stack.pop_primary(), hasher, summary),
                Op::PopPromoted => record(stack.pop_promoted(), hasher, summary),
                Op::Enqueue(value) => queue.try_push(value)?,
                Op::Dequeue => record(queue.pop(), hasher, summary),
                // Run boundaries are split off by `run`
                Op::Reset { .. } => continue,
            }
            summary.ops += 1;
        }

        for value in 0..views.len() {
            stack.membership(value).hash(hasher);
        }
        summary.runs += 1;
        Ok(())
    }
}

fn record<T: Hash>(value: Option<T>, hasher: &mut FxHasher, summary: &mut ReplaySummary) {
    if value.is_some() {
        summary.popped += 1;
    }
    value.hash(hasher);
}
