//! Duplicate suppression
//!
//! Wraps an iteration and filters out elements that were already returned,
//! keeping first-seen order. Memory grows with the number of distinct
//! elements returned so far, which is unbounded on large result sets; this
//! wrapper is therefore opt-in, never applied by default.

use crate::lookahead::{Lookahead, Produce};
use crate::protocol::{BoxedIteration, Iteration, NextError};
use std::collections::HashSet;
use std::hash::Hash;

struct DistinctSource<E, X> {
    source: BoxedIteration<E, X>,
    seen: HashSet<E>,
}

impl<E, X> Produce for DistinctSource<E, X>
where
    E: Eq + Hash + Clone,
{
    type Item = E;
    type Error = X;

    fn produce(&mut self) -> Result<Option<E>, X> {
        // Skip and discard repeats until a novel element (or the end) shows up.
        loop {
            match self.source.pull()? {
                Some(element) => {
                    if self.seen.insert(element.clone()) {
                        return Ok(Some(element));
                    }
                }
                None => return Ok(None),
            }
        }
    }

    fn release(&mut self) -> Result<(), X> {
        self.seen = HashSet::new();
        self.source.close()
    }
}

/// An iteration over the distinct elements of a source, in first-seen order.
///
/// Caution: keeps every returned element in memory until closed. Wrap only
/// when duplicate filtering is worth that cost.
pub struct DistinctIteration<E, X>
where
    E: Eq + Hash + Clone,
{
    inner: Lookahead<DistinctSource<E, X>>,
}

impl<E, X> DistinctIteration<E, X>
where
    E: Eq + Hash + Clone,
{
    /// Wraps a source with duplicate suppression.
    ///
    /// Callers holding a source that may already be distinct should check
    /// [`is_distinct`](Iteration::is_distinct) first; wrapping twice wastes
    /// a second seen-set.
    pub fn new(source: BoxedIteration<E, X>) -> Self {
        Self {
            inner: Lookahead::new(DistinctSource {
                source,
                seen: HashSet::new(),
            }),
        }
    }

    /// Number of distinct elements returned so far.
    pub fn distinct_count(&self) -> usize {
        self.inner.producer().seen.len()
    }
}

impl<E, X> Iteration for DistinctIteration<E, X>
where
    E: Eq + Hash + Clone,
{
    type Item = E;
    type Error = X;

    fn has_next(&mut self) -> Result<bool, X> {
        self.inner.has_next()
    }

    fn next(&mut self) -> Result<E, NextError<X>> {
        self.inner.next()
    }

    fn close(&mut self) -> Result<(), X> {
        self.inner.close()
    }

    fn is_distinct(&self) -> bool {
        true
    }
}
