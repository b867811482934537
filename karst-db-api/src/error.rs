//! Error types for the repository surface

use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, ApiError>;

/// The failure kind repository-facing pipelines declare.
///
/// Lower-layer failures convert in exactly once, at the wrapper boundary;
/// inside a pipeline the kind never changes.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Error from the query evaluation layer
    #[error("Query error: {0}")]
    Query(#[from] karst_db_query::QueryError),

    /// Error from the storage boundary
    #[error("Core error: {0}")]
    Core(#[from] karst_db_core::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl ApiError {
    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        ApiError::Other(msg.into())
    }
}
