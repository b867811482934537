//! # Karst DB Iteration
//!
//! Lazy, pull-based iteration protocol for Karst DB query evaluation.
//!
//! This crate provides:
//! - The `Iteration` trait: `has_next`/`next`/`close` with a single declared
//!   failure type per pipeline
//! - Base building blocks: `CloseState` (run-cleanup-exactly-once bookkeeping)
//!   and `Lookahead` (one-element buffering over a produce-or-end source)
//! - Composition operators: `UnionIteration` (bag union over N sources),
//!   `DistinctIteration` (opt-in duplicate suppression)
//! - Leaf adapters: `EmptyIteration`, `IteratorIteration`, `ConvertedIteration`
//!
//! ## Design Principles
//!
//! 1. **Single-pass, single-consumer**: an iteration is owned by whichever
//!    component last received it; ownership transfers on every hand-off
//! 2. **Close everywhere**: every exit path (exhaustion, early termination,
//!    failure) releases held resources exactly once; drained iterations
//!    auto-close so well-behaved consumers never leak
//! 3. **Errors pass through**: combinators never wrap or reclassify the
//!    declared failure type of their sources

pub mod adapters;
pub mod close_state;
pub mod distinct;
pub mod empty;
pub mod lookahead;
pub mod protocol;
pub mod union;

pub use adapters::{ConvertedIteration, IteratorIteration};
pub use close_state::CloseState;
pub use distinct::DistinctIteration;
pub use empty::EmptyIteration;
pub use lookahead::{Lookahead, Produce};
pub use protocol::{BoxedIteration, Iteration, NextError};
pub use union::UnionIteration;
