//! Leaf and seam adapters
//!
//! `IteratorIteration` lifts a plain `std::iter::Iterator` into the
//! protocol (the shape in-memory scans and test fixtures produce), and
//! `ConvertedIteration` moves a pipeline across a declared-failure seam by
//! mapping the error type through `From` without touching elements.

use crate::close_state::CloseState;
use crate::protocol::{Iteration, NextError};
use std::marker::PhantomData;

/// Adapts a standard iterator into an infallible [`Iteration`].
///
/// Elements already materialized behind the iterator are simply handed
/// through; close drops the remaining tail.
pub struct IteratorIteration<I: Iterator, X> {
    iter: I,
    buffered: Option<I::Item>,
    state: CloseState,
    _marker: PhantomData<fn() -> X>,
}

impl<I: Iterator, X> IteratorIteration<I, X> {
    /// Wraps a standard iterator.
    pub fn new(iter: I) -> Self {
        Self {
            iter,
            buffered: None,
            state: CloseState::new(),
            _marker: PhantomData,
        }
    }
}

impl<I: Iterator, X> Iteration for IteratorIteration<I, X> {
    type Item = I::Item;
    type Error = X;

    fn has_next(&mut self) -> Result<bool, X> {
        if self.state.is_closed() {
            return Ok(false);
        }
        if self.buffered.is_none() {
            self.buffered = self.iter.next();
        }
        Ok(self.buffered.is_some())
    }

    fn next(&mut self) -> Result<Self::Item, NextError<X>> {
        self.has_next()?;
        self.buffered.take().ok_or(NextError::NoMoreElements)
    }

    fn close(&mut self) -> Result<(), X> {
        if self.state.mark_closed() {
            self.buffered = None;
        }
        Ok(())
    }
}

/// Carries an iteration across an error-type seam.
///
/// The wrapped iteration's declared failure is converted through `From`
/// exactly once, at this boundary; elements, ordering, exhaustion behavior,
/// and the empty/distinct markers all pass through untouched.
pub struct ConvertedIteration<I, X> {
    inner: I,
    _marker: PhantomData<fn() -> X>,
}

impl<I, X> ConvertedIteration<I, X> {
    /// Wraps an iteration whose error type converts into `X`.
    pub fn new(inner: I) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }
}

impl<I, X> Iteration for ConvertedIteration<I, X>
where
    I: Iteration,
    X: From<I::Error>,
{
    type Item = I::Item;
    type Error = X;

    fn has_next(&mut self) -> Result<bool, X> {
        self.inner.has_next().map_err(X::from)
    }

    fn next(&mut self) -> Result<Self::Item, NextError<X>> {
        self.inner.next().map_err(|e| match e {
            NextError::NoMoreElements => NextError::NoMoreElements,
            NextError::Source(e) => NextError::Source(X::from(e)),
        })
    }

    fn close(&mut self) -> Result<(), X> {
        self.inner.close().map_err(X::from)
    }

    fn is_known_empty(&self) -> bool {
        self.inner.is_known_empty()
    }

    fn is_distinct(&self) -> bool {
        self.inner.is_distinct()
    }
}
