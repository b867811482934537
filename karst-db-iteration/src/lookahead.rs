//! Lookahead base for produce-or-end sources
//!
//! Most operators are naturally written as "compute the next element, or
//! signal end-of-sequence". [`Lookahead`] turns that shape into the full
//! `has_next`/`next` protocol by buffering at most one produced element,
//! and auto-closes once the producer signals end so a fully-drained
//! iteration releases its resources without an explicit `close` call from
//! the consumer.

use crate::close_state::CloseState;
use crate::protocol::{Iteration, NextError};

/// A source that computes elements one at a time.
///
/// Implementors supply only "produce next or signal end" and "release
/// resources"; [`Lookahead`] supplies the protocol methods on top.
pub trait Produce {
    /// The element type produced.
    type Item;
    /// The declared failure type.
    type Error;

    /// Computes the next element, or `Ok(None)` at end-of-sequence.
    ///
    /// May block on I/O in leaf sources; the lookahead base itself never
    /// blocks beyond delegating here.
    fn produce(&mut self) -> Result<Option<Self::Item>, Self::Error>;

    /// Releases held resources. Runs exactly once, on whichever exit path
    /// closes the iteration first.
    fn release(&mut self) -> Result<(), Self::Error>;
}

/// Turns a [`Produce`] source into an [`Iteration`], buffering one element.
pub struct Lookahead<P: Produce> {
    producer: P,
    buffered: Option<P::Item>,
    state: CloseState,
}

impl<P: Produce> Lookahead<P> {
    /// Wraps a producer.
    pub fn new(producer: P) -> Self {
        Self {
            producer,
            buffered: None,
            state: CloseState::new(),
        }
    }

    /// Whether this iteration has been closed.
    pub fn is_closed(&self) -> bool {
        self.state.is_closed()
    }

    /// Read access to the wrapped producer.
    pub fn producer(&self) -> &P {
        &self.producer
    }

    /// Fills the one-element buffer if it is empty and the iteration is
    /// still open. Auto-closes on end-of-sequence.
    fn fill(&mut self) -> Result<(), P::Error> {
        if self.buffered.is_none() && !self.state.is_closed() {
            match self.producer.produce()? {
                Some(item) => self.buffered = Some(item),
                None => self.close()?,
            }
        }
        Ok(())
    }
}

impl<P: Produce> Iteration for Lookahead<P> {
    type Item = P::Item;
    type Error = P::Error;

    fn has_next(&mut self) -> Result<bool, Self::Error> {
        self.fill()?;
        Ok(self.buffered.is_some())
    }

    fn next(&mut self) -> Result<Self::Item, NextError<Self::Error>> {
        self.fill()?;
        self.buffered.take().ok_or(NextError::NoMoreElements)
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        if self.state.mark_closed() {
            self.buffered = None;
            self.producer.release()
        } else {
            Ok(())
        }
    }
}

impl<P: Produce> Drop for Lookahead<P> {
    fn drop(&mut self) {
        if self.state.mark_closed() {
            self.buffered = None;
            if self.producer.release().is_err() {
                tracing::debug!("iteration dropped unclosed and its release failed");
            }
        }
    }
}
