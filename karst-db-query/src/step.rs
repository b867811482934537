//! Evaluation seams between the algebra evaluator and the operators
//!
//! The operators in this crate never see query algebra. They receive
//! precompiled steps: an `EvaluationStep` producing a fresh solution
//! iteration for a given input row, and a `JoinCondition` deciding whether
//! a (scoped) row passes a filter. The algebra evaluator compiles subtrees
//! into these once per query, then the operators call them once per row.

use crate::binding::BindingSet;
use crate::error::Result;
use karst_db_iteration::BoxedIteration;

/// A pipeline of solutions with the query pipeline's declared failure kind.
pub type BindingIteration = BoxedIteration<BindingSet, crate::error::QueryError>;

/// A precompiled query subtree.
///
/// `evaluate` produces a fresh, caller-owned iteration of the subtree's
/// solutions given the bindings of the current input row. Called once per
/// row by dependent operators (the right side of a left join is the
/// canonical example).
pub trait EvaluationStep: Send {
    /// Evaluates this subtree against one input row.
    fn evaluate(&self, bindings: &BindingSet) -> Result<BindingIteration>;
}

impl<F> EvaluationStep for F
where
    F: Fn(&BindingSet) -> Result<BindingIteration> + Send,
{
    fn evaluate(&self, bindings: &BindingSet) -> Result<BindingIteration> {
        self(bindings)
    }
}

/// A precompiled boolean-valued condition expression.
///
/// Evaluated against a scope-projected row. A failure of kind
/// [`QueryError::ConditionEvaluation`](crate::QueryError::ConditionEvaluation)
/// means the expression could not be evaluated for this row (unbound
/// variable, type mismatch); join evaluators treat that as "false" rather
/// than a pipeline failure.
pub trait JoinCondition: Send {
    /// Whether the condition holds for the given (scoped) row.
    fn evaluate(&self, bindings: &BindingSet) -> Result<bool>;
}

impl<F> JoinCondition for F
where
    F: Fn(&BindingSet) -> Result<bool> + Send,
{
    fn evaluate(&self, bindings: &BindingSet) -> Result<bool> {
        self(bindings)
    }
}
