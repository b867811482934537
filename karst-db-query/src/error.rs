//! Error types for query evaluation

use thiserror::Error;

/// Result type for query operations
pub type Result<T> = std::result::Result<T, QueryError>;

/// Query evaluation errors - the single declared failure kind of binding
/// pipelines.
///
/// `ConditionEvaluation` is the one locally-recoverable kind: the left-join
/// evaluator treats it as "condition is false" for the row at hand instead
/// of aborting the join. Every other kind propagates unmodified through the
/// operator tree.
#[derive(Error, Debug)]
pub enum QueryError {
    /// Error from karst-db-core (storage boundary)
    #[error("Core error: {0}")]
    Core(#[from] karst_db_core::Error),

    /// Failure evaluating a query subtree
    #[error("Evaluation error: {0}")]
    Evaluation(String),

    /// Failure evaluating a join/filter condition expression
    #[error("Condition evaluation error: {0}")]
    ConditionEvaluation(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl QueryError {
    /// Create an evaluation error
    pub fn evaluation(msg: impl Into<String>) -> Self {
        QueryError::Evaluation(msg.into())
    }

    /// Create a condition evaluation error
    pub fn condition(msg: impl Into<String>) -> Self {
        QueryError::ConditionEvaluation(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        QueryError::Internal(msg.into())
    }
}
