//! # Karst DB Query
//!
//! Query evaluation primitives built on the pull-iteration protocol.
//!
//! This crate provides:
//! - `BindingSet`: an immutable-per-step variable-to-term mapping
//! - `EvaluationStep` / `JoinCondition`: the precompiled-subtree seams the
//!   algebra evaluator plugs into the operators
//! - `LeftJoinIteration`: a streaming nested-loop left outer join with a
//!   scoped filter condition and left-row fallback
//!
//! Operators here are parametric in nothing: they fix the element type to
//! `BindingSet` and the declared failure type to `QueryError`, which is the
//! single failure category query pipelines carry end to end.

pub mod binding;
pub mod error;
pub mod left_join;
pub mod step;

pub use binding::BindingSet;
pub use error::{QueryError, Result};
pub use left_join::LeftJoinIteration;
pub use step::{BindingIteration, EvaluationStep, JoinCondition};
