//! The iteration that produces nothing

use crate::protocol::{Iteration, NextError};
use std::marker::PhantomData;

/// An iteration with no elements and no resources.
///
/// Reports [`is_known_empty`](Iteration::is_known_empty), which lets union
/// factories return the other side unwrapped instead of paying for a
/// combinator.
pub struct EmptyIteration<E, X> {
    _marker: PhantomData<fn() -> (E, X)>,
}

impl<E, X> EmptyIteration<E, X> {
    /// Creates an empty iteration.
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<E, X> Default for EmptyIteration<E, X> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, X> Iteration for EmptyIteration<E, X> {
    type Item = E;
    type Error = X;

    fn has_next(&mut self) -> Result<bool, X> {
        Ok(false)
    }

    fn next(&mut self) -> Result<E, NextError<X>> {
        Err(NextError::NoMoreElements)
    }

    fn close(&mut self) -> Result<(), X> {
        Ok(())
    }

    fn is_known_empty(&self) -> bool {
        true
    }
}
