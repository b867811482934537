//! Lazy result collections
//!
//! A `QueryResult` is a result collection that keeps an open handle to the
//! backend for lazy retrieval of individual elements, and must therefore be
//! closed (or dropped) after use to free whatever the pipeline below it
//! holds - cursors, read locks, connections.
//!
//! By default a result is a bag: it may contain duplicates. Duplicate
//! filtering can be switched on per result, but not lightly - the filter
//! keeps every returned element in memory.

use crate::error::ApiError;
use karst_db_core::Statement;
use karst_db_iteration::{
    BoxedIteration, ConvertedIteration, DistinctIteration, Iteration, NextError,
};
use std::hash::Hash;

/// A lazily retrieved collection of query results.
///
/// Exposes the pull protocol itself (delegating to the held pipeline, so
/// the close cascade passes straight through) plus repository conveniences:
/// opt-in duplicate filtering, drain-to-vec, and a standard iterator view.
pub struct QueryResult<T> {
    inner: BoxedIteration<T, ApiError>,
}

impl<T> QueryResult<T> {
    /// Wraps a pipeline.
    pub fn new(inner: BoxedIteration<T, ApiError>) -> Self {
        Self { inner }
    }

    /// Switches on duplicate filtering for the remainder of this result.
    ///
    /// Elements returned from now on are tracked in a seen-set and repeats
    /// are skipped. A no-op when the held pipeline already filters
    /// duplicates. Caution: memory grows with the number of distinct
    /// elements returned, unbounded on large results.
    pub fn enable_duplicate_filter(&mut self)
    where
        T: Eq + Hash + Clone + Send + 'static,
    {
        if self.inner.is_distinct() {
            return;
        }
        let source = std::mem::replace(
            &mut self.inner,
            Box::new(karst_db_iteration::EmptyIteration::new()),
        );
        self.inner = Box::new(DistinctIteration::new(source));
    }

    /// Drains the remaining elements into a vec and closes the pipeline.
    pub fn into_vec(mut self) -> Result<Vec<T>, ApiError> {
        let mut out = Vec::new();
        while let Some(item) = self.inner.pull()? {
            out.push(item);
        }
        self.inner.close()?;
        Ok(out)
    }

    /// A standard iterator view over the remaining elements.
    ///
    /// Yields `Result` items; after the first failure the view fuses. The
    /// result itself stays owned by the caller and still needs its close
    /// (or drop) afterwards.
    pub fn iter(&mut self) -> ResultIter<'_, T> {
        ResultIter {
            result: self,
            failed: false,
        }
    }
}

impl QueryResult<Statement> {
    /// Wraps a leaf statement scan, adapting it across the error seam from
    /// the storage boundary's failure kind to the repository's.
    pub fn from_core_scan<I>(scan: I) -> Self
    where
        I: Iteration<Item = Statement, Error = karst_db_core::Error> + Send + 'static,
    {
        Self::new(Box::new(ConvertedIteration::new(scan)))
    }
}

/// Statement-valued query result, as returned by repository lookups.
pub type StatementResult = QueryResult<Statement>;

impl<T> Iteration for QueryResult<T> {
    type Item = T;
    type Error = ApiError;

    fn has_next(&mut self) -> Result<bool, ApiError> {
        self.inner.has_next()
    }

    fn next(&mut self) -> Result<T, NextError<ApiError>> {
        self.inner.next()
    }

    fn close(&mut self) -> Result<(), ApiError> {
        self.inner.close()
    }

    fn is_distinct(&self) -> bool {
        self.inner.is_distinct()
    }

    fn is_known_empty(&self) -> bool {
        self.inner.is_known_empty()
    }
}

impl<T> Drop for QueryResult<T> {
    fn drop(&mut self) {
        // Delegate closes are idempotent, so closing after an explicit
        // close (or after into_vec) is a no-op.
        if let Err(e) = self.inner.close() {
            tracing::debug!(error = %e, "query result dropped; close failed");
        }
    }
}

/// Standard iterator adapter over a `QueryResult`.
pub struct ResultIter<'a, T> {
    result: &'a mut QueryResult<T>,
    failed: bool,
}

impl<T> Iterator for ResultIter<'_, T> {
    type Item = Result<T, ApiError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.result.inner.pull() {
            Ok(Some(item)) => Some(Ok(item)),
            Ok(None) => None,
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

impl<'a, T> IntoIterator for &'a mut QueryResult<T> {
    type Item = Result<T, ApiError>;
    type IntoIter = ResultIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
