//! # Karst DB API
//!
//! Repository-facing surface over the execution core.
//!
//! This crate provides:
//! - `ApiError`: the single failure kind repository-facing pipelines declare
//! - `QueryResult<T>`: a result wrapper keeping a live handle to the backend
//!   for lazy retrieval, with opt-in duplicate filtering and a standard
//!   iterator view for for-loop consumption
//! - `StatementResult`: the statement-valued form, with a constructor that
//!   adapts leaf storage scans across the error seam

pub mod error;
pub mod result;

pub use error::{ApiError, Result};
pub use result::{QueryResult, ResultIter, StatementResult};
