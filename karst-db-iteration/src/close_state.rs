//! Idempotent-close bookkeeping
//!
//! Every wrapper that owns resources routes its cleanup through one
//! [`CloseState`] check instead of tracking closed-ness itself. This is what
//! makes "close from two different exit paths" (normal exhaustion, early
//! close by the caller, unwinding, drop) safe to leave unreconciled.

use std::sync::atomic::{AtomicBool, Ordering};

/// A closed flag that transitions exactly once.
///
/// Atomic so the flag can be observed from a `Drop` running on a different
/// thread than the puller, and shared with out-of-band closers by leaf
/// producers that need one.
#[derive(Debug, Default)]
pub struct CloseState {
    closed: AtomicBool,
}

impl CloseState {
    /// Creates a new, open state.
    pub const fn new() -> Self {
        Self {
            closed: AtomicBool::new(false),
        }
    }

    /// Whether `mark_closed` has been called.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Marks the state closed.
    ///
    /// Returns `true` for exactly one caller: the one that performed the
    /// open-to-closed transition and therefore must run the cleanup hook.
    pub fn mark_closed(&self) -> bool {
        !self.closed.swap(true, Ordering::AcqRel)
    }
}
