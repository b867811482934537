//! Left outer join
//!
//! A streaming nested-loop join between a left solution iteration and a
//! per-left-row right iteration produced by a precompiled step. Every left
//! row is emitted at least once: paired with each right row that passes the
//! (optional) join condition, or alone when none does.
//!
//! The condition is evaluated against a scope-projected view of the right
//! row, so variables bound only as evaluation-order artifacts never leak
//! into the filter. A condition that fails to evaluate for a row counts as
//! "no match" for that row; any other failure aborts the join.

use crate::binding::BindingSet;
use crate::error::{QueryError, Result};
use crate::step::{BindingIteration, EvaluationStep, JoinCondition};
use karst_db_iteration::{Iteration, Lookahead, NextError, Produce};
use std::collections::HashSet;
use std::sync::Arc;

struct LeftJoinSource {
    left: BindingIteration,
    /// The right iteration for the current left row; `None` both before the
    /// first left row and after the current right side was drained.
    right: Option<BindingIteration>,
    right_step: Box<dyn EvaluationStep>,
    condition: Option<Box<dyn JoinCondition>>,
    /// Names in scope for the condition.
    scope: HashSet<Arc<str>>,
    /// The current left row, held until a right row matches; emitted bare
    /// when its right side drains without one.
    pending_left: Option<BindingSet>,
}

/// Pulls right rows until one passes the condition or the right side ends.
fn drain_right(
    right: &mut BindingIteration,
    condition: Option<&dyn JoinCondition>,
    scope: &HashSet<Arc<str>>,
) -> std::result::Result<Option<BindingSet>, NextError<QueryError>> {
    while right.has_next()? {
        let row = right.next()?;
        let Some(condition) = condition else {
            return Ok(Some(row));
        };
        // Limit the condition's view to the variables in the join's scope.
        let scoped = row.retained(scope);
        match condition.evaluate(&scoped) {
            Ok(true) => return Ok(Some(row)),
            Ok(false) => {}
            Err(QueryError::ConditionEvaluation(reason)) => {
                // Not evaluable for this row: counts as no match, keep scanning.
                tracing::debug!(%reason, "join condition did not evaluate; skipping right row");
            }
            Err(e) => return Err(NextError::Source(e)),
        }
    }
    Ok(None)
}

impl LeftJoinSource {
    fn produce_inner(
        &mut self,
    ) -> std::result::Result<Option<BindingSet>, NextError<QueryError>> {
        loop {
            // Drain the active right side: the first passing row wins.
            if let Some(mut right) = self.right.take() {
                let drained = drain_right(&mut right, self.condition.as_deref(), &self.scope);
                self.right = Some(right);
                if let Some(row) = drained? {
                    // The current left row has a match; no fallback for it.
                    self.pending_left = None;
                    return Ok(Some(row));
                }
                if let Some(mut exhausted) = self.right.take() {
                    exhausted.close()?;
                }
                if let Some(fallback) = self.pending_left.take() {
                    // Join produced nothing for this left row: emit it bare.
                    return Ok(Some(fallback));
                }
            }

            // Advance to the next left row and evaluate its right side.
            if !self.left.has_next()? {
                return Ok(None);
            }
            let left_bindings = self.left.next()?;
            self.right = Some(self.right_step.evaluate(&left_bindings)?);
            self.pending_left = Some(left_bindings);
        }
    }
}

impl Produce for LeftJoinSource {
    type Item = BindingSet;
    type Error = QueryError;

    fn produce(&mut self) -> Result<Option<BindingSet>> {
        match self.produce_inner() {
            Ok(row) => Ok(row),
            // A delegate reported no-more-elements mid-pull. That reads as
            // "the pipeline was closed out from under us from another
            // thread", and ends the join quietly - though it is genuinely
            // indistinguishable from a delegate wrongly reporting
            // exhaustion after a has_next.
            Err(NextError::NoMoreElements) => Ok(None),
            Err(NextError::Source(e)) => Err(e),
        }
    }

    fn release(&mut self) -> Result<()> {
        self.pending_left = None;
        let left_result = self.left.close();
        // The right side gets its close attempt even when the left one fails.
        let right_result = match self.right.take() {
            Some(mut right) => right.close(),
            None => Ok(()),
        };
        left_result.and(right_result)
    }
}

/// Left outer join over solution iterations.
///
/// Emits, in left order: for each left row, the right rows that pass the
/// condition (in right order), or the bare left row when none does. Built
/// on [`Lookahead`], so a fully drained join closes its delegates itself.
pub struct LeftJoinIteration {
    inner: Lookahead<LeftJoinSource>,
}

impl LeftJoinIteration {
    /// Creates a left join.
    ///
    /// # Arguments
    ///
    /// * `left` - the required-side iteration, consumed in order
    /// * `right_step` - produces the optional-side iteration for each left row
    /// * `condition` - optional filter over the joined row, `None` accepts all
    /// * `scope` - the variable names the condition is allowed to observe
    pub fn new(
        left: BindingIteration,
        right_step: Box<dyn EvaluationStep>,
        condition: Option<Box<dyn JoinCondition>>,
        scope: HashSet<Arc<str>>,
    ) -> Self {
        Self {
            inner: Lookahead::new(LeftJoinSource {
                left,
                right: None,
                right_step,
                condition,
                scope,
                pending_left: None,
            }),
        }
    }
}

impl Iteration for LeftJoinIteration {
    type Item = BindingSet;
    type Error = QueryError;

    fn has_next(&mut self) -> Result<bool> {
        self.inner.has_next()
    }

    fn next(&mut self) -> std::result::Result<BindingSet, NextError<QueryError>> {
        self.inner.next()
    }

    fn close(&mut self) -> Result<()> {
        self.inner.close()
    }
}
