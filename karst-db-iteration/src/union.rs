//! Bag union over multiple sources
//!
//! Concatenates the elements of an ordered sequence of sources, preserving
//! each source's internal order and every duplicate ('bag' union: nothing is
//! filtered). Sources are consumed lazily, one at a time, and each source is
//! closed the moment it is drained. Arity-specialized strategies keep the
//! common shapes cheap: a single source passes through, the two-source form
//! planner trees produce avoids the source-sequence machinery, and the
//! arbitrary-size form streams its sequence of sources.
//!
//! Closing a union early closes the in-progress source AND every remaining
//! not-yet-opened source; every close is attempted even when earlier ones
//! fail, and the first failure is surfaced.

use crate::empty::EmptyIteration;
use crate::lookahead::{Lookahead, Produce};
use crate::protocol::{BoxedIteration, Iteration, NextError};

/// Lazily consumed sequence of union sources.
type Sources<E, X> = Box<dyn Iterator<Item = BoxedIteration<E, X>> + Send>;

/// Arity-specialized union strategy.
enum UnionSources<E, X> {
    /// One source; pass-through with close-on-drain.
    Single(Option<BoxedIteration<E, X>>),
    /// Two sources in fixed left-then-right order.
    Dual {
        first: Option<BoxedIteration<E, X>>,
        second: Option<BoxedIteration<E, X>>,
    },
    /// Arbitrarily many sources, pulled from the sequence one at a time.
    Many {
        current: Option<BoxedIteration<E, X>>,
        pending: Sources<E, X>,
    },
}

/// Pulls the next element from one slot, closing the source when drained.
///
/// The slot is re-filled when the source stays live (element produced, or a
/// failure the caller will surface), so a later close still reaches it.
fn advance<E, X>(slot: &mut Option<BoxedIteration<E, X>>) -> Result<Option<E>, X> {
    if let Some(mut iter) = slot.take() {
        match iter.pull() {
            Ok(Some(item)) => {
                *slot = Some(iter);
                return Ok(Some(item));
            }
            Ok(None) => iter.close()?,
            Err(e) => {
                *slot = Some(iter);
                return Err(e);
            }
        }
    }
    Ok(None)
}

/// Closes every source in order, attempting all, surfacing the first failure.
fn close_collecting<E, X>(
    sources: impl IntoIterator<Item = BoxedIteration<E, X>>,
) -> Result<(), X> {
    let mut first_failure = None;
    let mut suppressed = 0usize;
    for mut iter in sources {
        if let Err(e) = iter.close() {
            if first_failure.is_none() {
                first_failure = Some(e);
            } else {
                suppressed += 1;
            }
        }
    }
    if suppressed > 0 {
        tracing::warn!(
            suppressed,
            "multiple union sources failed to close; surfacing the first failure"
        );
    }
    match first_failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

impl<E, X> Produce for UnionSources<E, X> {
    type Item = E;
    type Error = X;

    fn produce(&mut self) -> Result<Option<E>, X> {
        match self {
            UnionSources::Single(slot) => advance(slot),
            UnionSources::Dual { first, second } => {
                if let Some(item) = advance(first)? {
                    return Ok(Some(item));
                }
                advance(second)
            }
            UnionSources::Many { current, pending } => loop {
                if let Some(item) = advance(current)? {
                    return Ok(Some(item));
                }
                match pending.next() {
                    Some(next_source) => *current = Some(next_source),
                    // The source sequence itself is exhausted.
                    None => return Ok(None),
                }
            },
        }
    }

    fn release(&mut self) -> Result<(), X> {
        match self {
            UnionSources::Single(slot) => close_collecting(slot.take()),
            UnionSources::Dual { first, second } => {
                close_collecting(first.take().into_iter().chain(second.take()))
            }
            UnionSources::Many { current, pending } => {
                close_collecting(current.take().into_iter().chain(pending))
            }
        }
    }
}

/// Bag union of an ordered sequence of sources.
///
/// Built on [`Lookahead`]: draining the last source auto-closes the union.
pub struct UnionIteration<E, X> {
    inner: Lookahead<UnionSources<E, X>>,
}

impl<E: 'static, X: 'static> UnionIteration<E, X> {
    /// Union of one source: a pass-through that closes the source on drain.
    pub fn single(source: BoxedIteration<E, X>) -> Self {
        Self {
            inner: Lookahead::new(UnionSources::Single(Some(source))),
        }
    }

    /// Union of two sources, left then right.
    ///
    /// When either side is statically known to be empty the other side is
    /// returned as-is, so the binary operator trees a planner produces pay
    /// no combinator overhead for trivial unions.
    pub fn dual(
        left: BoxedIteration<E, X>,
        right: BoxedIteration<E, X>,
    ) -> BoxedIteration<E, X>
    where
        E: Send,
        X: Send,
    {
        if right.is_known_empty() {
            return left;
        }
        if left.is_known_empty() {
            return right;
        }
        Box::new(Self {
            inner: Lookahead::new(UnionSources::Dual {
                first: Some(left),
                second: Some(right),
            }),
        })
    }

    /// Union of a known list of sources, folding the trivial arities.
    pub fn from_sources(mut sources: Vec<BoxedIteration<E, X>>) -> BoxedIteration<E, X>
    where
        E: Send,
        X: Send,
    {
        match sources.len() {
            0 => Box::new(EmptyIteration::new()),
            1 => Box::new(Self::single(sources.remove(0))),
            _ => Box::new(Self::streamed(sources)),
        }
    }

    /// Union of an arbitrary, lazily consumed sequence of sources.
    ///
    /// Sources not yet reached stay unopened until the union gets there;
    /// closing the union early still closes every one of them.
    pub fn streamed<S>(sources: S) -> Self
    where
        S: IntoIterator<Item = BoxedIteration<E, X>>,
        S::IntoIter: Send + 'static,
    {
        Self {
            inner: Lookahead::new(UnionSources::Many {
                current: None,
                pending: Box::new(sources.into_iter()),
            }),
        }
    }
}

impl<E: 'static, X: 'static> Iteration for UnionIteration<E, X> {
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
}
