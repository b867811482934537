//! Shared fixtures: fake sources that record their close calls.

use karst_db_iteration::{BoxedIteration, Iteration, NextError};
use std::sync::{Arc, Mutex};

/// Shared record of which sources were closed, in order.
#[derive(Clone, Default)]
pub struct CloseLog {
    closes: Arc<Mutex<Vec<&'static str>>>,
}

impl CloseLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, name: &'static str) {
        self.closes.lock().unwrap().push(name);
    }

    pub fn closes(&self) -> Vec<&'static str> {
        self.closes.lock().unwrap().clone()
    }

    pub fn close_count(&self, name: &'static str) -> usize {
        self.closes.lock().unwrap().iter().filter(|n| **n == name).count()
    }
}

/// A source over a fixed value list that records close calls and can be
/// armed to fail on close.
pub struct TrackedSource {
    name: &'static str,
    values: Vec<i32>,
    log: CloseLog,
    fail_on_close: bool,
    closed: bool,
}

impl TrackedSource {
    pub fn new(name: &'static str, values: Vec<i32>, log: &CloseLog) -> Self {
        Self {
            name,
            values,
            log: log.clone(),
            fail_on_close: false,
            closed: false,
        }
    }

    /// Same, but the (first) close call fails after recording itself.
    pub fn failing_close(name: &'static str, values: Vec<i32>, log: &CloseLog) -> Self {
        Self {
            fail_on_close: true,
            ..Self::new(name, values, log)
        }
    }

    pub fn boxed(self) -> BoxedIteration<i32, String> {
        Box::new(self)
    }
}

impl Iteration for TrackedSource {
    type Item = i32;
    type Error = String;

    fn has_next(&mut self) -> Result<bool, String> {
        Ok(!self.closed && !self.values.is_empty())
    }

    fn next(&mut self) -> Result<i32, NextError<String>> {
        if self.closed || self.values.is_empty() {
            return Err(NextError::NoMoreElements);
        }
        Ok(self.values.remove(0))
    }

    fn close(&mut self) -> Result<(), String> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.log.record(self.name);
        if self.fail_on_close {
            Err(format!("{}: close failed", self.name))
        } else {
            Ok(())
        }
    }
}
