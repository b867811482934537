//! The pull-iteration protocol
//!
//! `Iteration` is the unit of composition for query evaluation: a stateful,
//! single-pass, lazily-evaluated sequence whose operations may fail with one
//! declared error type. Base scans, join evaluators, and union combinators
//! all implement it, and compose by pulling from each other on demand.

use thiserror::Error;

/// Error returned by [`Iteration::next`].
///
/// Keeps the contract violation "pulled past exhaustion" distinct from the
/// pipeline's declared failure type: a consumer that respects `has_next`
/// never sees `NoMoreElements`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NextError<X> {
    /// `next` was called on an exhausted or closed iteration.
    #[error("iteration has no more elements")]
    NoMoreElements,
    /// The underlying source failed while producing an element.
    #[error("{0}")]
    Source(X),
}

impl<X> NextError<X> {
    /// Unwraps the source failure, if that is what this is.
    pub fn into_source(self) -> Option<X> {
        match self {
            NextError::NoMoreElements => None,
            NextError::Source(e) => Some(e),
        }
    }
}

impl<X> From<X> for NextError<X> {
    fn from(e: X) -> Self {
        NextError::Source(e)
    }
}

/// A lazy, single-pass, closeable sequence of elements.
///
/// # Lifecycle
///
/// Created by a producer (storage scan, join evaluator, union combinator),
/// consumed by exactly one puller, and closed either by the consumer or by
/// an enclosing scope on early termination. Pulling is single-threaded per
/// instance; `close` is idempotent, so redundant closes from different exit
/// paths need no reconciliation.
///
/// # Contract
///
/// - Once closed, `has_next` reports `false` and `next` fails with
///   [`NextError::NoMoreElements`]; a closed iteration never resumes
///   producing data.
/// - `close` runs its cleanup exactly once; every later call is an `Ok(())`
///   no-op. When several delegate closes fail, every delegate still gets its
///   close attempt and the first failure is surfaced.
/// - Combinators propagate a source's declared failure unmodified; they never
///   wrap or reclassify it.
pub trait Iteration {
    /// The element type produced by this iteration.
    type Item;
    /// The single declared failure type of this pipeline.
    type Error;

    /// Returns `true` when another element is available.
    ///
    /// May perform underlying work (advance a cursor, pull from a delegate)
    /// and therefore may fail.
    fn has_next(&mut self) -> Result<bool, Self::Error>;

    /// Returns the next element.
    ///
    /// Fails with [`NextError::NoMoreElements`] when called past exhaustion;
    /// that failure does not mutate iteration state, so post-exhaustion
    /// pulls are harmless (and repeatable).
    fn next(&mut self) -> Result<Self::Item, NextError<Self::Error>>;

    /// Releases all resources held by this iteration and its delegates.
    ///
    /// Idempotent: the first call performs cleanup, every later call is a
    /// no-op returning `Ok(())`.
    fn close(&mut self) -> Result<(), Self::Error>;

    /// True when this iteration is statically known to produce no elements.
    ///
    /// Union factories use this to elide wrapping an empty side.
    fn is_known_empty(&self) -> bool {
        false
    }

    /// True when this iteration already suppresses duplicate elements.
    ///
    /// [`DistinctIteration`](crate::DistinctIteration) reports `true`, so
    /// callers layering duplicate suppression can skip re-wrapping.
    fn is_distinct(&self) -> bool {
        false
    }

    /// Pulls one element if available, combining `has_next` and `next`.
    ///
    /// A no-more-elements failure that appears between the two calls (the
    /// source was closed out from under the pull) reads as ordinary
    /// exhaustion rather than an error.
    fn pull(&mut self) -> Result<Option<Self::Item>, Self::Error> {
        if self.has_next()? {
            match self.next() {
                Ok(item) => Ok(Some(item)),
                Err(NextError::NoMoreElements) => Ok(None),
                Err(NextError::Source(e)) => Err(e),
            }
        } else {
            Ok(None)
        }
    }
}

/// Boxed iteration for dynamic dispatch.
///
/// Combinators compose over boxed sources so that pipelines of arbitrary
/// shape share one element and error type.
pub type BoxedIteration<E, X> = Box<dyn Iteration<Item = E, Error = X> + Send>;

impl<I: Iteration + ?Sized> Iteration for Box<I> {
    type Item = I::Item;
    type Error = I::Error;

    fn has_next(&mut self) -> Result<bool, Self::Error> {
        (**self).has_next()
    }

    fn next(&mut self) -> Result<Self::Item, NextError<Self::Error>> {
        (**self).next()
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        (**self).close()
    }

    fn is_known_empty(&self) -> bool {
        (**self).is_known_empty()
    }

    fn is_distinct(&self) -> bool {
        (**self).is_distinct()
    }
}
